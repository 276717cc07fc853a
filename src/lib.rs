//! # Shelterhaus
//!
//! Animal-shelter administration core: a generic file-backed entity store
//! with soft deletion, predicate queries, and a concurrency guard, plus the
//! adoption lifecycle coordinator that keeps animal availability consistent
//! with adoption workflow state.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shelterhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let shelter = Shelter::open(config).await?;
//!
//!     let rex = shelter
//!         .animals()
//!         .create(Animal::new("Rex", Species::Dog))
//!         .await?;
//!     let ada = shelter
//!         .customers()
//!         .create(Customer::new("Ada", "Lovelace", "ada@example.org"))
//!         .await?;
//!
//!     let application = shelter
//!         .coordinator()
//!         .create(Adoption::new(rex.id, ada.id, "standard"))
//!         .await?;
//!     println!("application {} is {:?}", application.id, application.status);
//!
//!     Ok(())
//! }
//! ```

pub mod coordinator;
pub mod core;
pub mod entities;
pub mod errors;
pub mod prelude;
pub mod repository;
pub mod seed;

// Re-export the main public types for convenience
pub use crate::core::Shelter;
pub use errors::ShelterError;

// Re-export centralized config
pub use config::{AppConfig, ConfigError, StorageConfig};

// Re-export the store crate used in public signatures
pub use entity_store;
