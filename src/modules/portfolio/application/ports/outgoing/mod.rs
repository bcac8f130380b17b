pub mod author_directory;
pub mod image_url_resolver;
pub mod portfolio_query;
pub mod portfolio_repository;

pub use author_directory::{AuthorDirectory, AuthorDirectoryError};
pub use image_url_resolver::ImageUrlResolver;
pub use portfolio_query::{
    PortfolioListQuery, PortfolioQuery, PortfolioQueryError, PortfolioSortField, Visibility,
};
pub use portfolio_repository::{
    NewPortfolio, NewVersion, PortfolioChanges, PortfolioRepository, PortfolioRepositoryError,
    VersionChanges, VersionDraft,
};
