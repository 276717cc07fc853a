//! Adoption repository: validation rules and workflow lookups.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use entity_store::{validate_base, FileStore, StoreError};

use super::Repository;
use crate::entities::{Adoption, AdoptionStatus};

/// Field-level checks layered on the base validation.
pub fn validate_adoption(adoption: &Adoption) -> Result<(), StoreError> {
    validate_base(adoption)?;

    if adoption.customer_id <= 0 {
        return Err(StoreError::validation(
            "adoption",
            format!("customer id must be positive (got {})", adoption.customer_id),
        ));
    }
    if adoption.animal_id <= 0 {
        return Err(StoreError::validation(
            "adoption",
            format!("animal id must be positive (got {})", adoption.animal_id),
        ));
    }
    if adoption.status.is_open() {
        if let Some(employee_id) = adoption.employee_id {
            if employee_id <= 0 {
                return Err(StoreError::validation(
                    "adoption",
                    format!("employee id must be positive (got {employee_id})"),
                ));
            }
        }
    }
    if adoption.adoption_type.trim().is_empty() {
        return Err(StoreError::validation(
            "adoption",
            "adoption type must not be empty",
        ));
    }

    match adoption.adoption_date {
        Some(date) => {
            // One-year grace window for post-dated adoptions.
            if date > Utc::now() + Duration::days(365) {
                return Err(StoreError::validation(
                    "adoption",
                    "adoption date must not be more than a year in the future",
                ));
            }
        }
        None => {
            if matches!(
                adoption.status,
                AdoptionStatus::Approved | AdoptionStatus::Completed
            ) {
                return Err(StoreError::validation(
                    "adoption",
                    format!("adoption date is required when status is {:?}", adoption.status),
                ));
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct AdoptionRepository {
    store: Arc<FileStore<Adoption>>,
}

impl AdoptionRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let store = FileStore::new(data_dir).with_validator(validate_adoption);
        Self {
            store: Arc::new(store),
        }
    }

    /// Adoptions referencing an animal; a non-positive id returns an empty
    /// list by convention.
    pub async fn find_by_animal(&self, animal_id: i32) -> Result<Vec<Adoption>, StoreError> {
        if animal_id <= 0 {
            return Ok(Vec::new());
        }
        self.store
            .find(move |a: &Adoption| a.animal_id == animal_id)
            .await
    }

    pub async fn find_by_customer(&self, customer_id: i32) -> Result<Vec<Adoption>, StoreError> {
        if customer_id <= 0 {
            return Ok(Vec::new());
        }
        self.store
            .find(move |a: &Adoption| a.customer_id == customer_id)
            .await
    }

    pub async fn find_by_status(&self, status: AdoptionStatus) -> Result<Vec<Adoption>, StoreError> {
        self.store.find(move |a: &Adoption| a.status == status).await
    }

    /// The open (Pending or Approved) adoption for an animal, if one exists.
    pub async fn find_open_for_animal(
        &self,
        animal_id: i32,
    ) -> Result<Option<Adoption>, StoreError> {
        if animal_id <= 0 {
            return Ok(None);
        }
        let mut open = self
            .store
            .find(move |a: &Adoption| a.animal_id == animal_id && a.status.is_open())
            .await?;
        Ok(open.pop())
    }

    pub async fn find_applied_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Adoption>, StoreError> {
        self.store
            .find(move |a: &Adoption| a.application_date >= from && a.application_date <= to)
            .await
    }
}

#[async_trait]
impl Repository for AdoptionRepository {
    type Entity = Adoption;

    fn store(&self) -> &FileStore<Adoption> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_adoption_requires_positive_references() {
        let adoption = Adoption::new(0, 1, "standard");
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));

        let adoption = Adoption::new(1, -2, "standard");
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));

        assert!(validate_adoption(&Adoption::new(1, 1, "standard")).is_ok());
    }

    #[test]
    fn test_validate_adoption_rejects_blank_type() {
        let adoption = Adoption::new(1, 1, "  ");
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));
    }

    #[test]
    fn test_validate_adoption_employee_id_checked_while_open() {
        let mut adoption = Adoption::new(1, 1, "standard");
        adoption.employee_id = Some(0);
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));

        // Terminal statuses skip the employee-id positivity check.
        adoption.status = AdoptionStatus::Rejected;
        assert!(validate_adoption(&adoption).is_ok());
    }

    #[test]
    fn test_validate_adoption_date_rules() {
        // Approved requires a set adoption date.
        let mut adoption = Adoption::new(1, 1, "standard");
        adoption.status = AdoptionStatus::Approved;
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));

        adoption.adoption_date = Some(Utc::now());
        assert!(validate_adoption(&adoption).is_ok());

        // Beyond the one-year grace window is rejected.
        adoption.adoption_date = Some(Utc::now() + Duration::days(400));
        assert!(matches!(
            validate_adoption(&adoption),
            Err(StoreError::Validation { .. })
        ));
    }
}
