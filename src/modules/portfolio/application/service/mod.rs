mod create_portfolio_service;
mod delete_portfolio_service;
mod get_portfolio_service;
mod like_portfolio_service;
mod list_portfolios_service;
mod review_portfolio_service;
mod update_portfolio_service;
mod version_services;

pub use create_portfolio_service::CreatePortfolioService;
pub use delete_portfolio_service::{HardDeletePortfolioService, SoftDeletePortfolioService};
pub use get_portfolio_service::GetPortfolioService;
pub use like_portfolio_service::LikePortfolioService;
pub use list_portfolios_service::ListPortfoliosService;
pub use review_portfolio_service::ReviewPortfolioService;
pub use update_portfolio_service::UpdatePortfolioService;
pub use version_services::{
    CreateVersionService, DeleteVersionService, GetVersionService, ListVersionsService,
    SetActiveVersionService, UpdateVersionService,
};

use uuid::Uuid;

use crate::portfolio::application::domain::{Actor, PortfolioRecord};
use crate::portfolio::application::ports::incoming::use_cases::{PortfolioError, PortfolioView};
use crate::portfolio::application::ports::outgoing::{ImageUrlResolver, PortfolioQuery};

/// Loads a portfolio the actor may modify. Invisible rows read as missing.
async fn load_writable<Q: PortfolioQuery + ?Sized>(
    query: &Q,
    portfolio_id: Uuid,
    actor: &Actor,
) -> Result<PortfolioRecord, PortfolioError> {
    let portfolio = query
        .find_by_id(portfolio_id)
        .await?
        .ok_or(PortfolioError::NotFound)?;

    if portfolio.writable_by(actor) {
        Ok(portfolio)
    } else if portfolio.visible_to(Some(actor)) {
        Err(PortfolioError::Forbidden)
    } else {
        Err(PortfolioError::NotFound)
    }
}

async fn load_visible<Q: PortfolioQuery + ?Sized>(
    query: &Q,
    portfolio_id: Uuid,
    viewer: Option<&Actor>,
) -> Result<PortfolioRecord, PortfolioError> {
    query
        .find_by_id(portfolio_id)
        .await?
        .filter(|p| p.visible_to(viewer))
        .ok_or(PortfolioError::NotFound)
}

async fn with_image_url(images: &dyn ImageUrlResolver, mut view: PortfolioView) -> PortfolioView {
    if let Some(object_id) = view.portfolio.image_object_id {
        view.image_url = images.resolve(object_id).await;
    }
    view
}

/// Empty or whitespace-only strings count as "not provided".
fn provided(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
