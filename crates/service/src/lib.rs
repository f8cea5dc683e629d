//! Core persistence and consistency layer for the clinic treatment catalog.
//! - Maps wire entities to stored rows through the `models` codec.
//! - Enforces referential integrity between treatments and species at
//!   write time, inside the governing transaction.
//! - Applies field-mask driven partial updates.
//! - Coordinates the cascading species delete.

pub mod detect;
pub mod errors;
pub mod species;
pub mod store;
pub mod treatment;
pub mod update_mask;

#[cfg(test)]
mod test_support;

pub use errors::ServiceError;
pub use store::{CatalogStore, TreatmentDefaults};
