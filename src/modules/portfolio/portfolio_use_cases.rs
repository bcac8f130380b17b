use std::sync::Arc;

use crate::portfolio::application::ports::incoming::use_cases::{
    CreatePortfolioUseCase, CreateVersionUseCase, DeleteVersionUseCase, GetPortfolioUseCase,
    GetVersionUseCase, HardDeletePortfolioUseCase, LikePortfolioUseCase, ListPortfoliosUseCase,
    ListVersionsUseCase, ReviewPortfolioUseCase, SetActiveVersionUseCase,
    SoftDeletePortfolioUseCase, UpdatePortfolioUseCase, UpdateVersionUseCase,
};

#[derive(Clone)]
pub struct PortfolioUseCases {
    pub create: Arc<dyn CreatePortfolioUseCase + Send + Sync>,
    pub get: Arc<dyn GetPortfolioUseCase + Send + Sync>,
    pub list: Arc<dyn ListPortfoliosUseCase + Send + Sync>,
    pub update: Arc<dyn UpdatePortfolioUseCase + Send + Sync>,
    pub soft_delete: Arc<dyn SoftDeletePortfolioUseCase + Send + Sync>,
    pub hard_delete: Arc<dyn HardDeletePortfolioUseCase + Send + Sync>,
    pub review: Arc<dyn ReviewPortfolioUseCase + Send + Sync>,
    pub like: Arc<dyn LikePortfolioUseCase + Send + Sync>,
    pub create_version: Arc<dyn CreateVersionUseCase + Send + Sync>,
    pub list_versions: Arc<dyn ListVersionsUseCase + Send + Sync>,
    pub get_version: Arc<dyn GetVersionUseCase + Send + Sync>,
    pub update_version: Arc<dyn UpdateVersionUseCase + Send + Sync>,
    pub set_active_version: Arc<dyn SetActiveVersionUseCase + Send + Sync>,
    pub delete_version: Arc<dyn DeleteVersionUseCase + Send + Sync>,
}
