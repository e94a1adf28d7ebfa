use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{Customer, CustomerInput};
use super::repository::CustomerRepository;
use super::validation::validate_customer;
use crate::errors::ServiceError;

/// Customer business service, independent of the web framework.
/// Validation always runs before the repository is touched.
#[derive(Clone)]
pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.find_all().await
    }

    /// Validate and insert a new customer; any `id` in the input is ignored.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::customer::{domain::CustomerInput, repository::memory::InMemoryCustomerRepository, CustomerService};
    /// let svc = CustomerService::new(Arc::new(InMemoryCustomerRepository::default()));
    /// let created = tokio_test::block_on(svc.create(CustomerInput::new("John Doe", "john@example.com"))).unwrap();
    /// assert_eq!(created.id, Some(1));
    /// assert_eq!(created.name, "John Doe");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CustomerInput) -> Result<Customer, ServiceError> {
        if let Err(errors) = validate_customer(&input) {
            warn!(%errors, "customer_create_rejected");
            return Err(ServiceError::Validation(errors));
        }
        let saved = self.repo.save(Customer::new(input.name, input.email)).await?;
        info!(id = ?saved.id, "customer_created");
        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Overwrite `name` and `email` of an existing customer. The stored id is kept.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i64, input: CustomerInput) -> Result<Customer, ServiceError> {
        if let Err(errors) = validate_customer(&input) {
            warn!(%errors, "customer_update_rejected");
            return Err(ServiceError::Validation(errors));
        }
        let mut existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("customer"))?;
        existing.name = input.name;
        existing.email = input.email;
        let updated = self.repo.save(existing).await?;
        info!("customer_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let existing = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("customer"))?;
        self.repo.delete(&existing).await?;
        info!("customer_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::repository::memory::InMemoryCustomerRepository;

    fn setup() -> (Arc<InMemoryCustomerRepository>, CustomerService) {
        let repo = Arc::new(InMemoryCustomerRepository::default());
        let svc = CustomerService::new(repo.clone());
        (repo, svc)
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let (_, svc) = setup();
        let created = svc.create(CustomerInput::new("John Doe", "john@example.com")).await.unwrap();
        let id = created.id.expect("assigned id");

        let found = svc.get(id).await.unwrap().expect("found");
        assert_eq!(found.name, "John Doe");
        assert_eq!(found.email, "john@example.com");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn create_ignores_client_id() {
        let (_, svc) = setup();
        let mut input = CustomerInput::new("John Doe", "john@example.com");
        input.id = Some(42);
        let created = svc.create(input).await.unwrap();
        assert_eq!(created.id, Some(1));
    }

    #[tokio::test]
    async fn invalid_create_leaves_store_untouched() {
        let (repo, svc) = setup();
        let err = svc.create(CustomerInput::new("", "bad")).await.unwrap_err();
        match err {
            ServiceError::Validation(v) => {
                assert!(v.has_field("name"));
                assert!(v.has_field("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found_without_mutation() {
        let (repo, svc) = setup();
        svc.create(CustomerInput::new("Jane Doe", "jane@example.com")).await.unwrap();

        assert!(svc.get(999).await.unwrap().is_none());
        let upd = svc.update(999, CustomerInput::new("X", "x@example.com")).await;
        assert!(matches!(upd, Err(ServiceError::NotFound(_))));
        let del = svc.delete(999).await;
        assert!(matches!(del, Err(ServiceError::NotFound(_))));

        let all = svc.list().await.unwrap();
        assert_eq!(repo.len().await, 1);
        assert_eq!(all[0].name, "Jane Doe");
    }

    #[tokio::test]
    async fn update_changes_only_name_and_email_and_is_idempotent() {
        let (_, svc) = setup();
        let created = svc.create(CustomerInput::new("John Doe", "john@example.com")).await.unwrap();
        let id = created.id.unwrap();

        let mut input = CustomerInput::new("John Updated", "johnupdated@example.com");
        input.id = Some(77);
        let first = svc.update(id, input.clone()).await.unwrap();
        assert_eq!(first.id, Some(id));
        assert_eq!(first.name, "John Updated");
        assert_eq!(first.email, "johnupdated@example.com");

        let second = svc.update(id, input).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(svc.list().await.unwrap(), vec![second]);
        assert!(svc.get(77).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn invalid_update_keeps_stored_state() {
        let (_, svc) = setup();
        let created = svc.create(CustomerInput::new("John Doe", "john@example.com")).await.unwrap();
        let id = created.id.unwrap();

        let err = svc.update(id, CustomerInput::new("John", "not-an-email")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(svc.get(id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn invalid_update_on_missing_id_reports_validation_first() {
        let (_, svc) = setup();
        let err = svc.update(5, CustomerInput::new("", "")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (_, svc) = setup();
        let created = svc.create(CustomerInput::new("John Doe", "john@example.com")).await.unwrap();
        let id = created.id.unwrap();
        svc.delete(id).await.unwrap();
        assert!(svc.get(id).await.unwrap().is_none());
        assert!(matches!(svc.delete(id).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_returns_exactly_created_customers() {
        let (_, svc) = setup();
        assert!(svc.list().await.unwrap().is_empty());
        let a = svc.create(CustomerInput::new("A", "a@example.com")).await.unwrap();
        let b = svc.create(CustomerInput::new("B", "b@example.com")).await.unwrap();
        let all = svc.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&a));
        assert!(all.contains(&b));
    }

    #[tokio::test]
    async fn store_failure_propagates_as_db_error() {
        let (repo, svc) = setup();
        repo.set_unavailable(true);
        assert!(matches!(svc.list().await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.create(CustomerInput::new("A", "a@example.com")).await, Err(ServiceError::Db(_))));
    }
}
