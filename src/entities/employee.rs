//! The employee record.

use chrono::{DateTime, Utc};
use entity_store::Entity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub position: String,
    pub hire_date: DateTime<Utc>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        position: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            position: position.into(),
            hire_date: Utc::now(),
            is_deleted: false,
            deleted_at: None,
        }
    }
}

impl Entity for Employee {
    fn entity_name() -> &'static str {
        "employee"
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
