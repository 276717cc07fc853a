//! Adoption lifecycle coordination
//!
//! This module orchestrates the Adoption and Animal repositories (with
//! Customer/Employee existence checks) to keep an animal's availability
//! state consistent with its adoption's workflow state.
//!
//! Consistency is best-effort by design: the adoption and the animal live
//! in two different stores with two different locks, so every operation
//! that touches both performs two separate load-modify-save cycles. A crash
//! or a concurrent caller between the two writes can leave the pair
//! inconsistent; higher layers assume this two-phase shape and it is
//! deliberately not hidden behind a transaction.

use chrono::Utc;
use entity_store::StoreError;
use tracing::{info, warn};

use crate::entities::{Adoption, AdoptionStatus, AnimalStatus};
use crate::errors::ShelterError;
use crate::repository::{
    AdoptionRepository, AnimalRepository, CustomerRepository, EmployeeRepository, Repository,
};

/// Orchestrates the adoption workflow across the per-type repositories.
#[derive(Debug, Clone)]
pub struct AdoptionCoordinator {
    adoptions: AdoptionRepository,
    animals: AnimalRepository,
    customers: CustomerRepository,
    employees: EmployeeRepository,
}

impl AdoptionCoordinator {
    pub fn new(
        adoptions: AdoptionRepository,
        animals: AnimalRepository,
        customers: CustomerRepository,
        employees: EmployeeRepository,
    ) -> Self {
        Self {
            adoptions,
            animals,
            customers,
            employees,
        }
    }

    /// Create a new adoption application in `Pending` state.
    ///
    /// The referenced customer and animal must exist, the animal must be
    /// `Available`, and no open adoption may exist for it. The animal itself
    /// is untouched at creation time; its status only changes on approval.
    ///
    /// The open-adoption check and the insert are two separate store
    /// operations: under concurrent callers the uniqueness of open
    /// adoptions per animal is best-effort, not guaranteed.
    pub async fn create(&self, mut adoption: Adoption) -> Result<Adoption, ShelterError> {
        if self
            .customers
            .get_by_id(adoption.customer_id)
            .await?
            .is_none()
        {
            return Err(StoreError::not_found("customer", adoption.customer_id).into());
        }

        let animal = self
            .animals
            .get_by_id(adoption.animal_id)
            .await?
            .ok_or_else(|| StoreError::not_found("animal", adoption.animal_id))?;
        if animal.status != AnimalStatus::Available {
            return Err(ShelterError::AnimalNotAvailable {
                id: animal.id,
                status: animal.status,
            });
        }

        if let Some(open) = self.adoptions.find_open_for_animal(adoption.animal_id).await? {
            return Err(ShelterError::OpenAdoptionExists {
                animal_id: adoption.animal_id,
                adoption_id: open.id,
            });
        }

        adoption.status = AdoptionStatus::Pending;
        adoption.approval_date = None;
        adoption.rejection_date = None;
        adoption.completion_date = None;
        let adoption = self.adoptions.create(adoption).await?;

        info!(
            adoption_id = adoption.id,
            animal_id = adoption.animal_id,
            customer_id = adoption.customer_id,
            "adoption application created"
        );
        Ok(adoption)
    }

    /// Approve a pending adoption and mark its animal as adopted.
    pub async fn approve(
        &self,
        adoption_id: i32,
        employee_id: i32,
    ) -> Result<Adoption, ShelterError> {
        let mut adoption = self.fetch(adoption_id).await?;
        Self::expect_status(&adoption, AdoptionStatus::Pending, "Pending")?;
        self.ensure_employee(employee_id).await?;

        let now = Utc::now();
        adoption.status = AdoptionStatus::Approved;
        adoption.approval_date = Some(now);
        adoption.employee_id = Some(employee_id);
        if adoption.adoption_date.is_none() {
            adoption.adoption_date = Some(now);
        }
        let adoption = self.adoptions.update(adoption).await?;

        // Second phase; not atomic with the adoption write above.
        match self.animals.get_by_id(adoption.animal_id).await? {
            Some(mut animal) => {
                animal.mark_adopted(adoption.customer_id, adoption.adoption_date.unwrap_or(now));
                self.animals.update(animal).await?;
            }
            None => warn!(
                adoption_id,
                animal_id = adoption.animal_id,
                "animal missing during approval; skipping animal-side effect"
            ),
        }

        info!(adoption_id, employee_id, "adoption approved");
        Ok(adoption)
    }

    /// Reject a pending adoption; a `Reserved` animal reverts to `Available`.
    pub async fn reject(
        &self,
        adoption_id: i32,
        employee_id: i32,
    ) -> Result<Adoption, ShelterError> {
        let mut adoption = self.fetch(adoption_id).await?;
        Self::expect_status(&adoption, AdoptionStatus::Pending, "Pending")?;
        self.ensure_employee(employee_id).await?;

        adoption.status = AdoptionStatus::Rejected;
        adoption.rejection_date = Some(Utc::now());
        adoption.employee_id = Some(employee_id);
        let adoption = self.adoptions.update(adoption).await?;

        match self.animals.get_by_id(adoption.animal_id).await? {
            Some(mut animal) if animal.status == AnimalStatus::Reserved => {
                animal.status = AnimalStatus::Available;
                self.animals.update(animal).await?;
            }
            Some(_) => {}
            None => warn!(
                adoption_id,
                animal_id = adoption.animal_id,
                "animal missing during rejection; skipping animal-side effect"
            ),
        }

        info!(adoption_id, employee_id, "adoption rejected");
        Ok(adoption)
    }

    /// Complete an approved adoption. The animal was already marked adopted
    /// at approval, so no animal-side change happens here.
    pub async fn complete(&self, adoption_id: i32) -> Result<Adoption, ShelterError> {
        let mut adoption = self.fetch(adoption_id).await?;
        Self::expect_status(&adoption, AdoptionStatus::Approved, "Approved")?;

        let now = Utc::now();
        adoption.status = AdoptionStatus::Completed;
        adoption.completion_date = Some(now);
        if adoption.adoption_date.is_none() {
            adoption.adoption_date = Some(now);
        }
        let adoption = self.adoptions.update(adoption).await?;

        info!(adoption_id, "adoption completed");
        Ok(adoption)
    }

    /// Cancel an open adoption, appending the reason to the audit trail.
    ///
    /// The animal reverts to `Available` (with its adoption linkage cleared)
    /// when it was `Reserved`, or when it was `Adopted` because of *this*
    /// adoption - matched by the customer linkage plus a set adoption
    /// timestamp.
    pub async fn cancel(
        &self,
        adoption_id: i32,
        employee_id: i32,
        reason: &str,
    ) -> Result<Adoption, ShelterError> {
        let mut adoption = self.fetch(adoption_id).await?;
        if !adoption.status.is_open() {
            return Err(ShelterError::InvalidTransition {
                id: adoption_id,
                expected: "Pending or Approved",
                actual: adoption.status,
            });
        }

        adoption.status = AdoptionStatus::Cancelled;
        adoption.append_note(
            Utc::now(),
            &format!("cancelled by employee {employee_id}: {reason}"),
        );
        adoption.approval_date = None;
        adoption.rejection_date = None;
        adoption.completion_date = None;
        adoption.adoption_date = None;
        let adoption = self.adoptions.update(adoption).await?;

        match self.animals.get_by_id(adoption.animal_id).await? {
            Some(mut animal) => {
                let adopted_through_this = animal.status == AnimalStatus::Adopted
                    && animal.adopted_by_customer_id == Some(adoption.customer_id)
                    && animal.adoption_date.is_some();
                if adopted_through_this || animal.status == AnimalStatus::Reserved {
                    animal.clear_adoption();
                    self.animals.update(animal).await?;
                }
            }
            None => warn!(
                adoption_id,
                animal_id = adoption.animal_id,
                "animal missing during cancellation; skipping animal-side effect"
            ),
        }

        info!(adoption_id, employee_id, "adoption cancelled");
        Ok(adoption)
    }

    /// Soft-delete an adoption record, in any status.
    ///
    /// When the adoption was Approved or Completed the animal's state is
    /// *not* reverted here; undoing the adoption's effects is the caller's
    /// responsibility.
    pub async fn delete(&self, adoption_id: i32) -> Result<(), ShelterError> {
        let adoption = self.fetch(adoption_id).await?;
        if matches!(
            adoption.status,
            AdoptionStatus::Approved | AdoptionStatus::Completed
        ) {
            warn!(
                adoption_id,
                animal_id = adoption.animal_id,
                status = ?adoption.status,
                "deleting a decided adoption; animal state left untouched"
            );
        }

        self.adoptions.delete(adoption_id).await?;
        info!(adoption_id, "adoption deleted");
        Ok(())
    }

    /// Re-fetch the adoption immediately before mutating; no cached copies
    /// are carried across calls.
    async fn fetch(&self, adoption_id: i32) -> Result<Adoption, ShelterError> {
        Ok(self
            .adoptions
            .get_by_id(adoption_id)
            .await?
            .ok_or_else(|| StoreError::not_found("adoption", adoption_id))?)
    }

    async fn ensure_employee(&self, employee_id: i32) -> Result<(), ShelterError> {
        if self.employees.get_by_id(employee_id).await?.is_none() {
            return Err(StoreError::not_found("employee", employee_id).into());
        }
        Ok(())
    }

    fn expect_status(
        adoption: &Adoption,
        expected: AdoptionStatus,
        expected_name: &'static str,
    ) -> Result<(), ShelterError> {
        if adoption.status != expected {
            return Err(ShelterError::InvalidTransition {
                id: adoption.id,
                expected: expected_name,
                actual: adoption.status,
            });
        }
        Ok(())
    }
}
