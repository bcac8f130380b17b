pub mod admin_settings_repository_postgres;
pub mod sea_orm_entity;

pub use admin_settings_repository_postgres::AdminSettingsRepositoryPostgres;
