pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_accounts_tables;
mod m20250301_000002_create_catalog_tables;
mod m20250301_000003_create_rentals_and_reviews_tables;
mod m20250301_000004_add_indexes;
mod m20250301_000005_seed_capability_groups;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_accounts_tables::Migration),
            Box::new(m20250301_000002_create_catalog_tables::Migration),
            Box::new(m20250301_000003_create_rentals_and_reviews_tables::Migration),
            Box::new(m20250301_000004_add_indexes::Migration),
            Box::new(m20250301_000005_seed_capability_groups::Migration),
        ]
    }
}
