mod create_portfolio;
mod delete_portfolio;
mod error;
mod get_portfolio;
mod like_portfolio;
mod list_portfolios;
mod review_portfolio;
mod update_portfolio;
mod versions;
mod view;

pub use create_portfolio::{CreatePortfolioInput, CreatePortfolioUseCase, InitialVersionInput};
pub use delete_portfolio::{HardDeletePortfolioUseCase, SoftDeletePortfolioUseCase};
pub use error::PortfolioError;
pub use get_portfolio::GetPortfolioUseCase;
pub use like_portfolio::LikePortfolioUseCase;
pub use list_portfolios::{
    ListPortfoliosUseCase, ListScope, PortfolioListRequest, PortfolioPage,
    DEFAULT_ADMIN_PORTFOLIO_PAGE_SIZE, DEFAULT_PORTFOLIO_PAGE_SIZE, MAX_PORTFOLIO_PAGE_SIZE,
};
pub use review_portfolio::ReviewPortfolioUseCase;
pub use update_portfolio::{UpdatePortfolioInput, UpdatePortfolioUseCase};
pub use versions::{
    CreateVersionInput, CreateVersionUseCase, DeleteVersionUseCase, GetVersionUseCase,
    ListVersionsUseCase, SetActiveVersionUseCase, UpdateVersionInput, UpdateVersionUseCase,
};
pub use view::PortfolioView;
