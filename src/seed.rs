//! One-time sample-data bootstrap.
//!
//! Each backing file is populated with default records only if it does not
//! exist yet; files that are already present - empty or populated - are
//! left alone.

use tokio::fs;
use tracing::info;

use crate::core::Shelter;
use crate::entities::{Adoption, Animal, Customer, Employee, Species};
use crate::errors::ShelterError;
use crate::repository::Repository;

/// Populate missing backing files with sample records.
pub async fn seed_defaults(shelter: &Shelter) -> Result<(), ShelterError> {
    if !exists(shelter.animals().store().path()).await {
        for animal in sample_animals() {
            shelter.animals().create(animal).await?;
        }
        info!("seeded sample animals");
    }

    if !exists(shelter.customers().store().path()).await {
        for customer in sample_customers() {
            shelter.customers().create(customer).await?;
        }
        info!("seeded sample customers");
    }

    if !exists(shelter.employees().store().path()).await {
        for employee in sample_employees() {
            shelter.employees().create(employee).await?;
        }
        info!("seeded sample employees");
    }

    if !exists(shelter.adoptions().store().path()).await {
        // One pending application; pending leaves the animal Available.
        shelter
            .adoptions()
            .create(Adoption::new(2, 1, "standard"))
            .await?;
        info!("seeded sample adoptions");
    }

    Ok(())
}

async fn exists(path: &std::path::Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}

fn sample_animals() -> Vec<Animal> {
    let mut rex = Animal::new("Rex", Species::Dog);
    rex.breed = Some("German Shepherd".into());
    rex.weight_kg = Some(32.0);

    let mut misty = Animal::new("Misty", Species::Cat);
    misty.breed = Some("Tabby".into());
    misty.weight_kg = Some(4.2);

    let mut clover = Animal::new("Clover", Species::Rabbit);
    clover.weight_kg = Some(1.8);

    let mut pepper = Animal::new("Pepper", Species::Bird);
    pepper.status = crate::entities::AnimalStatus::InTreatment;

    vec![rex, misty, clover, pepper]
}

fn sample_customers() -> Vec<Customer> {
    let mut ada = Customer::new("Ada", "Lovelace", "ada@example.org");
    ada.phone = Some("555-0100".into());

    let grace = Customer::new("Grace", "Hopper", "grace@example.org");

    let mut alan = Customer::new("Alan", "Turing", "alan@example.org");
    alan.address = Some("1 Bletchley Park".into());

    vec![ada, grace, alan]
}

fn sample_employees() -> Vec<Employee> {
    vec![
        Employee::new("June", "Park", "june@shelter.example", "Adoption Counselor"),
        Employee::new("Omar", "Haddad", "omar@shelter.example", "Veterinarian"),
    ]
}
