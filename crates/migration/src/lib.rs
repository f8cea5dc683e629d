//! Migrator for the catalog schema. Tables first, indexes last; every
//! migration is idempotent so the migrator can run on each startup.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_species;
mod m20240101_000002_create_treatment;
mod m20240101_000003_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_species::Migration),
            Box::new(m20240101_000002_create_treatment::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000003_add_indexes::Migration),
        ]
    }
}
