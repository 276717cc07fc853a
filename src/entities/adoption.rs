//! The adoption record and its workflow state.

use chrono::{DateTime, Utc};
use entity_store::Entity;
use serde::{Deserialize, Serialize};

/// Workflow state of an adoption.
///
/// `Pending → {Approved, Rejected, Cancelled}`;
/// `Approved → {Completed, Cancelled}`; the rest are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    Cancelled,
}

impl AdoptionStatus {
    /// Open adoptions block any new adoption for the same animal.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adoption {
    pub id: i32,
    pub animal_id: i32,
    pub customer_id: i32,
    /// The employee who decided the application; set on approval/rejection.
    pub employee_id: Option<i32>,
    pub adoption_type: String,
    pub application_date: DateTime<Utc>,
    /// `None` is the "default/unset" value; required once Approved or
    /// Completed.
    pub adoption_date: Option<DateTime<Utc>>,
    pub status: AdoptionStatus,
    pub approval_date: Option<DateTime<Utc>>,
    pub rejection_date: Option<DateTime<Utc>>,
    pub completion_date: Option<DateTime<Utc>>,
    /// Append-only audit trail; cancellation reasons are added here, never
    /// overwritten.
    pub notes: String,
    pub fee: Option<f64>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Adoption {
    pub fn new(animal_id: i32, customer_id: i32, adoption_type: impl Into<String>) -> Self {
        Self {
            id: 0,
            animal_id,
            customer_id,
            employee_id: None,
            adoption_type: adoption_type.into(),
            application_date: Utc::now(),
            adoption_date: None,
            status: AdoptionStatus::Pending,
            approval_date: None,
            rejection_date: None,
            completion_date: None,
            notes: String::new(),
            fee: None,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Append one timestamped line to the audit trail.
    pub fn append_note(&mut self, at: DateTime<Utc>, line: &str) {
        self.notes
            .push_str(&format!("[{}] {}\n", at.to_rfc3339(), line));
    }
}

impl Entity for Adoption {
    fn entity_name() -> &'static str {
        "adoption"
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
