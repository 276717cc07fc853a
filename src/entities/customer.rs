//! The customer record.

use chrono::{DateTime, Utc};
use entity_store::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    /// Unique among active customers; enforced by the repository.
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Customer {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone: None,
            address: None,
            registered_at: Utc::now(),
            is_deleted: false,
            deleted_at: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl Entity for Customer {
    fn entity_name() -> &'static str {
        "customer"
    }

    fn id(&self) -> i32 {
        self.id
    }

    fn set_id(&mut self, id: i32) {
        self.id = id;
    }

    fn supports_soft_delete() -> bool {
        true
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    fn mark_deleted(&mut self, at: DateTime<Utc>) {
        self.is_deleted = true;
        self.deleted_at = Some(at);
    }

    fn clear_deleted(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }
}
