//! Employee repository: validation rules and lookups.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use entity_store::{validate_base, FileStore, StoreError};

use super::Repository;
use crate::entities::Employee;

/// Field-level checks layered on the base validation.
pub fn validate_employee(employee: &Employee) -> Result<(), StoreError> {
    validate_base(employee)?;

    if employee.first_name.trim().is_empty() || employee.last_name.trim().is_empty() {
        return Err(StoreError::validation(
            "employee",
            "first and last name must not be empty",
        ));
    }
    if employee.email.trim().is_empty() {
        return Err(StoreError::validation("employee", "email must not be empty"));
    }
    Ok(())
}

#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    store: Arc<FileStore<Employee>>,
}

impl EmployeeRepository {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        let store = FileStore::new(data_dir).with_validator(validate_employee);
        Self {
            store: Arc::new(store),
        }
    }

    pub async fn find_by_position(&self, position: &str) -> Result<Vec<Employee>, StoreError> {
        let position = position.trim().to_lowercase();
        if position.is_empty() {
            return Ok(Vec::new());
        }
        self.store
            .find(move |e: &Employee| e.position.to_lowercase() == position)
            .await
    }
}

#[async_trait]
impl Repository for EmployeeRepository {
    type Entity = Employee;

    fn store(&self) -> &FileStore<Employee> {
        &self.store
    }
}
