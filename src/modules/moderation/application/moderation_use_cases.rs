use std::sync::Arc;

use crate::moderation::application::ports::incoming::use_cases::{
    GetSettingsUseCase, UpdateSettingsUseCase,
};

#[derive(Clone)]
pub struct ModerationUseCases {
    pub get_settings: Arc<dyn GetSettingsUseCase + Send + Sync>,
    pub update_settings: Arc<dyn UpdateSettingsUseCase + Send + Sync>,
}
