use async_trait::async_trait;

use super::domain::Customer;
use crate::errors::ServiceError;

/// Storage collaborator for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// All customers in the store's natural order.
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError>;
    /// Insert when `customer.id` is `None`, otherwise overwrite the stored row.
    /// Saving an id that is no longer stored fails with `ServiceError::NotFound`.
    async fn save(&self, customer: Customer) -> Result<Customer, ServiceError>;
    async fn delete(&self, customer: &Customer) -> Result<(), ServiceError>;
}

/// In-memory repository for tests, benches and running without a database.
pub mod memory {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::RwLock;

    #[derive(Default)]
    pub struct InMemoryCustomerRepository {
        rows: RwLock<BTreeMap<i64, Customer>>, // ordered by id
        last_id: RwLock<i64>,
        unavailable: AtomicBool,
    }

    impl InMemoryCustomerRepository {
        /// Make every call fail with `ServiceError::Db` until reset.
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        pub async fn len(&self) -> usize {
            self.rows.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.rows.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("store unavailable".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CustomerRepository for InMemoryCustomerRepository {
        async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
            self.check_available()?;
            let rows = self.rows.read().await;
            Ok(rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
            self.check_available()?;
            let rows = self.rows.read().await;
            Ok(rows.get(&id).cloned())
        }

        async fn save(&self, mut customer: Customer) -> Result<Customer, ServiceError> {
            self.check_available()?;
            let mut rows = self.rows.write().await;
            let id = match customer.id {
                // update only; a vanished row is not resurrected
                Some(id) if !rows.contains_key(&id) => {
                    return Err(ServiceError::NotFound(format!("customer {id} not found")));
                }
                Some(id) => id,
                None => {
                    let mut last_id = self.last_id.write().await;
                    *last_id += 1;
                    *last_id
                }
            };
            customer.id = Some(id);
            rows.insert(id, customer.clone());
            Ok(customer)
        }

        async fn delete(&self, customer: &Customer) -> Result<(), ServiceError> {
            self.check_available()?;
            if let Some(id) = customer.id {
                self.rows.write().await.remove(&id);
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn save_assigns_increasing_ids() {
            let repo = InMemoryCustomerRepository::default();
            let a = repo.save(Customer::new("A", "a@example.com")).await.unwrap();
            let b = repo.save(Customer::new("B", "b@example.com")).await.unwrap();
            assert_eq!(a.id, Some(1));
            assert_eq!(b.id, Some(2));
            assert_eq!(repo.len().await, 2);
        }

        #[tokio::test]
        async fn save_with_id_overwrites() {
            let repo = InMemoryCustomerRepository::default();
            let mut a = repo.save(Customer::new("A", "a@example.com")).await.unwrap();
            a.name = "A2".into();
            repo.save(a.clone()).await.unwrap();
            assert_eq!(repo.len().await, 1);
            assert_eq!(repo.find_by_id(1).await.unwrap(), Some(a));
        }

        #[tokio::test]
        async fn save_after_delete_is_not_found() {
            let repo = InMemoryCustomerRepository::default();
            let a = repo.save(Customer::new("A", "a@example.com")).await.unwrap();
            repo.delete(&a).await.unwrap();

            let mut stale = a.clone();
            stale.name = "A2".into();
            let res = repo.save(stale).await;
            assert!(matches!(res, Err(ServiceError::NotFound(_))));
            assert!(repo.is_empty().await);
        }

        #[tokio::test]
        async fn save_with_unknown_id_is_not_found() {
            let repo = InMemoryCustomerRepository::default();
            let mut c = Customer::new("X", "x@example.com");
            c.id = Some(10);
            assert!(matches!(repo.save(c).await, Err(ServiceError::NotFound(_))));
            let next = repo.save(Customer::new("Y", "y@example.com")).await.unwrap();
            assert_eq!(next.id, Some(1));
        }

        #[tokio::test]
        async fn find_all_is_ordered_and_delete_removes() {
            let repo = InMemoryCustomerRepository::default();
            let a = repo.save(Customer::new("A", "a@example.com")).await.unwrap();
            let b = repo.save(Customer::new("B", "b@example.com")).await.unwrap();
            assert_eq!(repo.find_all().await.unwrap(), vec![a.clone(), b.clone()]);

            repo.delete(&a).await.unwrap();
            assert_eq!(repo.find_all().await.unwrap(), vec![b]);
            assert!(repo.find_by_id(1).await.unwrap().is_none());
        }

        #[tokio::test]
        async fn unavailable_store_fails_every_call() {
            let repo = InMemoryCustomerRepository::default();
            repo.set_unavailable(true);
            assert!(matches!(repo.find_all().await, Err(ServiceError::Db(_))));
            assert!(matches!(repo.save(Customer::new("A", "a@example.com")).await, Err(ServiceError::Db(_))));
            repo.set_unavailable(false);
            assert!(repo.is_empty().await);
        }
    }
}
