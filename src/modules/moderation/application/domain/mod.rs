pub mod settings;

pub use settings::{initial_outcome, AdminSettings, ModeratedEntity, ModerationOutcome, SettingsPatch};
