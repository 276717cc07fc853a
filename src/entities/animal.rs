//! The animal record and its availability state.

use chrono::{DateTime, Utc};
use entity_store::Entity;
use serde::{Deserialize, Serialize};

/// Availability state of an animal. `Adopted` is set as a side effect of an
/// adoption being approved, never directly by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimalStatus {
    Available,
    Adopted,
    Reserved,
    InTreatment,
    Deceased,
}

/// The defined species values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Bird,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: i32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub weight_kg: Option<f64>,
    pub status: AnimalStatus,
    pub intake_date: DateTime<Utc>,
    pub adoption_date: Option<DateTime<Utc>>,
    pub adopted_by_customer_id: Option<i32>,
    /// Derived duplicate of `status == Adopted`, kept in sync by the
    /// adoption-linkage helpers below.
    pub is_adopted: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Animal {
    pub fn new(name: impl Into<String>, species: Species) -> Self {
        Self {
            id: 0,
            name: name.into(),
            species,
            breed: None,
            weight_kg: None,
            status: AnimalStatus::Available,
            intake_date: Utc::now(),
            adoption_date: None,
            adopted_by_customer_id: None,
            is_adopted: false,
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// Record that this animal left through an approved adoption.
    pub fn mark_adopted(&mut self, customer_id: i32, at: DateTime<Utc>) {
        self.status = AnimalStatus::Adopted;
        self.is_adopted = true;
        self.adopted_by_customer_id = Some(customer_id);
        self.adoption_date = Some(at);
    }

    /// Revert the animal to `Available` and clear the adoption linkage.
    pub fn clear_adoption(&mut self) {
        self.status = AnimalStatus::Available;
        self.is_adopted = false;
        self.adopted_by_customer_id = None;
        self.adoption_date = None;
    }
}

impl Entity for Animal {
    fn entity_name() -> &'static str {
        "animal"
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
