use async_trait::async_trait;
use uuid::Uuid;

use super::{PortfolioError, PortfolioView};
use crate::portfolio::application::domain::{Actor, PortfolioStatus};

pub const DEFAULT_PORTFOLIO_PAGE_SIZE: u64 = 12;
pub const DEFAULT_ADMIN_PORTFOLIO_PAGE_SIZE: u64 = 50;
pub const MAX_PORTFOLIO_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    /// Public listing, optionally authenticated.
    Public(Option<Actor>),
    /// The caller's own portfolios in every status.
    Mine(Uuid),
    Admin,
}

#[derive(Debug, Clone)]
pub struct PortfolioListRequest {
    pub scope: ListScope,
    pub status: Option<PortfolioStatus>,
    pub owner_id: Option<Uuid>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl PortfolioListRequest {
    pub fn new(scope: ListScope) -> Self {
        Self {
            scope,
            status: None,
            owner_id: None,
            category: None,
            search: None,
            sort_by: None,
            order: None,
            page: None,
            page_size: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PortfolioPage {
    pub items: Vec<PortfolioView>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[async_trait]
pub trait ListPortfoliosUseCase: Send + Sync {
    async fn execute(&self, request: PortfolioListRequest)
        -> Result<PortfolioPage, PortfolioError>;
}
