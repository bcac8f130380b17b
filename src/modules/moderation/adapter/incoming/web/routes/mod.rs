pub mod settings;

pub use settings::{get_settings_handler, update_settings_handler};
