pub mod admin_settings;
