pub use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users_table;
mod m20260301_000002_create_admin_settings_table;
mod m20260301_000003_create_portfolios_table;
mod m20260301_000004_create_portfolio_versions_table;
mod m20260301_000005_create_storage_configs_table;
mod m20260301_000006_create_file_objects_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users_table::Migration),
            Box::new(m20260301_000002_create_admin_settings_table::Migration),
            Box::new(m20260301_000003_create_portfolios_table::Migration),
            Box::new(m20260301_000004_create_portfolio_versions_table::Migration),
            Box::new(m20260301_000005_create_storage_configs_table::Migration),
            Box::new(m20260301_000006_create_file_objects_table::Migration),
        ]
    }
}
