pub mod admin_settings_repository;

pub use admin_settings_repository::{AdminSettingsRepository, AdminSettingsRepositoryError};
