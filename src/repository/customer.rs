//! Customer repository: validation rules, unique-email enforcement, and
//! lookups.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use entity_store::{validate_base, FileStore, StoreError};

use super::Repository;
use crate::entities::Customer;

/// Field-level checks layered on the base validation.
pub fn validate_customer(customer: &Customer) -> Result<(), StoreError> {
    validate_base(customer)?;

    if customer.first_name.trim().is_empty() || customer.last_name.trim().is_empty() {
        return Err(StoreError::validation(
            "customer",
            "first and last name must not be empty",
        ));
    }
    if customer.email.trim().is_empty() || !customer.email.contains('@') {
        return Err(StoreError::validation(
            "customer",
            format!("email {:?} is not valid", customer.email),
        ));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    store: Arc<FileStore<Customer>>,
}

impl CustomerRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let store = FileStore::new(data_dir).with_validator(validate_customer);
        Self {
            store: Arc::new(store),
        }
    }

    /// Exact, case-insensitive email lookup.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, StoreError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Ok(None);
        }
        let mut matched = self
            .store
            .find(move |c: &Customer| c.email.to_lowercase() == email)
            .await?;
        Ok(matched.pop())
    }

    /// Case-insensitive substring match over the full name.
    pub async fn find_by_name(&self, fragment: &str) -> Result<Vec<Customer>, StoreError> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .find(move |c: &Customer| c.full_name().to_lowercase().contains(&fragment))
            .await
    }

    /// Reject a write that would duplicate another active customer's email.
    async fn ensure_email_free(&self, email: &str, own_id: Option<i32>) -> Result<(), StoreError> {
        if let Some(existing) = self.find_by_email(email).await? {
            if own_id != Some(existing.id) {
                return Err(StoreError::conflict(
                    "customer",
                    format!("email {email:?} is already registered (customer {})", existing.id),
                ));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl Repository for CustomerRepository {
    type Entity = Customer;

    fn store(&self) -> &FileStore<Customer> {
        &self.store
    }

    async fn create(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.ensure_email_free(&customer.email, None).await?;
        self.store.create(customer).await
    }

    async fn update(&self, customer: Customer) -> Result<Customer, StoreError> {
        self.ensure_email_free(&customer.email, Some(customer.id))
            .await?;
        self.store.update(customer).await
    }
}
