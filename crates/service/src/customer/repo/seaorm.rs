use sea_orm::DatabaseConnection;

use crate::customer::domain::Customer;
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository over the `customer` table.
#[derive(Clone)]
pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let rows = models::customer::list(&self.db).await?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        Ok(models::customer::find(&self.db, id).await?.map(Customer::from))
    }

    async fn save(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let saved = match customer.id {
            None => models::customer::insert(&self.db, &customer.name, &customer.email).await?,
            Some(id) => models::customer::update(&self.db, id, &customer.name, &customer.email).await?,
        };
        Ok(Customer::from(saved))
    }

    async fn delete(&self, customer: &Customer) -> Result<(), ServiceError> {
        if let Some(id) = customer.id {
            models::customer::delete(&self.db, id).await?;
        }
        Ok(())
    }
}
