pub use sea_orm_migration::prelude::*;
pub use settings::DatabaseSettings;

pub mod settings;

mod m20250601_000001_init;
mod m20250615_000001_users_active_name_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_init::Migration),
            Box::new(m20250615_000001_users_active_name_index::Migration),
        ]
    }
}
