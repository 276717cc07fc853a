//! Integration tests for the adoption lifecycle coordinator
//!
//! Exercises the workflow state machine and the cross-entity invariants it
//! maintains over the Adoption and Animal stores.

use entity_store::StoreError;
use shelterhaus::coordinator::AdoptionCoordinator;
use shelterhaus::prelude::*;
use tempfile::TempDir;

struct Fixture {
    _dir: TempDir,
    coordinator: AdoptionCoordinator,
    animals: AnimalRepository,
    adoptions: AdoptionRepository,
    customers: CustomerRepository,
}

/// Fresh repositories over a temp data dir, with one available animal, one
/// customer, and one employee already in place.
async fn fixture() -> (Fixture, Animal, Customer, Employee) {
    let dir = TempDir::new().unwrap();
    let animals = AnimalRepository::new(dir.path());
    let adoptions = AdoptionRepository::new(dir.path());
    let customers = CustomerRepository::new(dir.path());
    let employees = EmployeeRepository::new(dir.path());
    let coordinator = AdoptionCoordinator::new(
        adoptions.clone(),
        animals.clone(),
        customers.clone(),
        employees.clone(),
    );

    let animal = animals
        .create(Animal::new("Rex", Species::Dog))
        .await
        .unwrap();
    let customer = customers
        .create(Customer::new("Ada", "Lovelace", "ada@example.org"))
        .await
        .unwrap();
    let employee = employees
        .create(Employee::new(
            "June",
            "Park",
            "june@shelter.example",
            "Adoption Counselor",
        ))
        .await
        .unwrap();

    let fixture = Fixture {
        _dir: dir,
        coordinator,
        animals,
        adoptions,
        customers,
    };
    (fixture, animal, customer, employee)
}

#[tokio::test]
async fn test_full_lifecycle_create_approve_complete() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Pending);

    // Creation leaves the animal untouched.
    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Available);

    let adoption = fx
        .coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Approved);
    assert_eq!(adoption.employee_id, Some(employee.id));
    assert!(adoption.approval_date.is_some());
    assert!(adoption.adoption_date.is_some());

    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Adopted);
    assert!(a.is_adopted);
    assert_eq!(a.adopted_by_customer_id, Some(customer.id));

    let adoption = fx.coordinator.complete(adoption.id).await.unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Completed);
    assert!(adoption.completion_date.is_some());

    // The animal is no longer available: a new application must fail.
    let err = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap_err();
    assert!(matches!(err, ShelterError::AnimalNotAvailable { .. }));
}

#[tokio::test]
async fn test_reject_leaves_available_animal_unchanged() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    let adoption = fx
        .coordinator
        .reject(adoption.id, employee.id)
        .await
        .unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Rejected);
    assert!(adoption.rejection_date.is_some());

    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Available);
}

#[tokio::test]
async fn test_reject_reverts_reserved_animal() {
    let (fx, mut animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();

    animal.status = AnimalStatus::Reserved;
    fx.animals.update(animal.clone()).await.unwrap();

    fx.coordinator
        .reject(adoption.id, employee.id)
        .await
        .unwrap();
    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Available);
}

#[tokio::test]
async fn test_create_preconditions() {
    let (fx, animal, customer, _employee) = fixture().await;

    // Unknown customer.
    let err = fx
        .coordinator
        .create(Adoption::new(animal.id, 999, "standard"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ShelterError::Repository(StoreError::NotFound {
            entity: "customer",
            ..
        })
    ));

    // Unknown animal.
    let err = fx
        .coordinator
        .create(Adoption::new(999, customer.id, "standard"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ShelterError::Repository(StoreError::NotFound {
            entity: "animal",
            ..
        })
    ));

    // Second open adoption for the same animal.
    fx.coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    let err = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap_err();
    assert!(matches!(err, ShelterError::OpenAdoptionExists { .. }));
}

#[tokio::test]
async fn test_invalid_transitions_are_rejected() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();

    // Completing a pending adoption fails.
    let err = fx.coordinator.complete(adoption.id).await.unwrap_err();
    assert!(matches!(
        err,
        ShelterError::InvalidTransition {
            expected: "Approved",
            ..
        }
    ));

    fx.coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();

    // Approving twice fails.
    let err = fx
        .coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ShelterError::InvalidTransition {
            expected: "Pending",
            actual: AdoptionStatus::Approved,
            ..
        }
    ));

    // Terminal states stay terminal.
    fx.coordinator.complete(adoption.id).await.unwrap();
    let err = fx
        .coordinator
        .cancel(adoption.id, employee.id, "too late")
        .await
        .unwrap_err();
    assert!(matches!(err, ShelterError::InvalidTransition { .. }));
}

#[tokio::test]
async fn test_approve_requires_existing_employee() {
    let (fx, animal, customer, _employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    let err = fx.coordinator.approve(adoption.id, 999).await.unwrap_err();
    assert!(matches!(
        err,
        ShelterError::Repository(StoreError::NotFound {
            entity: "employee",
            ..
        })
    ));
}

#[tokio::test]
async fn test_cancel_approved_reverts_animal_and_appends_notes() {
    let (fx, animal, customer, employee) = fixture().await;

    let mut application = Adoption::new(animal.id, customer.id, "standard");
    application.notes = "home visit scheduled\n".to_string();
    let adoption = fx.coordinator.create(application).await.unwrap();
    let adoption = fx
        .coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();

    let adoption = fx
        .coordinator
        .cancel(adoption.id, employee.id, "customer moved away")
        .await
        .unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Cancelled);

    // Appended, never overwritten.
    assert!(adoption.notes.starts_with("home visit scheduled\n"));
    assert!(adoption.notes.contains("customer moved away"));

    // Decision dates cleared, adoption date back to unset.
    assert!(adoption.approval_date.is_none());
    assert!(adoption.completion_date.is_none());
    assert!(adoption.adoption_date.is_none());

    // The animal was adopted through this adoption: reverted and unlinked.
    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Available);
    assert!(!a.is_adopted);
    assert!(a.adopted_by_customer_id.is_none());
    assert!(a.adoption_date.is_none());
}

#[tokio::test]
async fn test_cancel_pending_leaves_animal_alone() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    fx.coordinator
        .cancel(adoption.id, employee.id, "changed their mind")
        .await
        .unwrap();

    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Available);
}

#[tokio::test]
async fn test_cancel_does_not_touch_animal_adopted_by_someone_else() {
    let (fx, animal, customer, employee) = fixture().await;
    let other = fx
        .customers
        .create(Customer::new("Grace", "Hopper", "grace@example.org"))
        .await
        .unwrap();

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    let adoption = fx
        .coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();

    // Another caller re-links the animal to a different customer between
    // the approval and the cancellation.
    let mut a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    a.adopted_by_customer_id = Some(other.id);
    fx.animals.update(a).await.unwrap();

    fx.coordinator
        .cancel(adoption.id, employee.id, "mismatch")
        .await
        .unwrap();

    // Not this adoption's animal anymore: left untouched.
    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Adopted);
    assert_eq!(a.adopted_by_customer_id, Some(other.id));
}

#[tokio::test]
async fn test_approve_tolerates_vanished_animal() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    fx.animals.delete(animal.id).await.unwrap();

    // The animal-side effect is skipped; the adoption still transitions.
    let adoption = fx
        .coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();
    assert_eq!(adoption.status, AdoptionStatus::Approved);
}

#[tokio::test]
async fn test_delete_decided_adoption_leaves_animal_adopted() {
    let (fx, animal, customer, employee) = fixture().await;

    let adoption = fx
        .coordinator
        .create(Adoption::new(animal.id, customer.id, "standard"))
        .await
        .unwrap();
    fx.coordinator
        .approve(adoption.id, employee.id)
        .await
        .unwrap();

    fx.coordinator.delete(adoption.id).await.unwrap();
    assert!(fx.adoptions.get_by_id(adoption.id).await.unwrap().is_none());

    // The animal is deliberately not reverted.
    let a = fx.animals.get_by_id(animal.id).await.unwrap().unwrap();
    assert_eq!(a.status, AnimalStatus::Adopted);

    // The soft-deleted adoption reads as missing on a second delete.
    let err = fx.coordinator.delete(adoption.id).await.unwrap_err();
    assert!(matches!(
        err,
        ShelterError::Repository(StoreError::NotFound { .. })
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creation_race_is_tolerated_not_prevented() {
    let (fx, animal, customer, _employee) = fixture().await;

    // The open-adoption check and the insert are separate locked sections,
    // so two concurrent creates may both pass the check. The guarantee is
    // only that nothing fails unexpectedly and at least one create lands.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let coordinator = fx.coordinator.clone();
        let adoption = Adoption::new(animal.id, customer.id, "standard");
        handles.push(tokio::spawn(
            async move { coordinator.create(adoption).await },
        ));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(ShelterError::OpenAdoptionExists { .. }) => {}
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert!(successes >= 1);

    let open = fx.adoptions.find_by_animal(animal.id).await.unwrap();
    assert!(open.len() >= 1);
}
