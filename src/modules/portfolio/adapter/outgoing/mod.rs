pub mod author_directory_users;
pub mod image_url_storage;
pub mod portfolio_archiver_postgres;
pub mod portfolio_query_postgres;
pub mod portfolio_repository_postgres;
pub mod sea_orm_entity;

pub use author_directory_users::UserAuthorDirectory;
pub use image_url_storage::StorageImageUrlResolver;
pub use portfolio_archiver_postgres::PortfolioArchiverAdapter;
pub use portfolio_query_postgres::PortfolioQueryPostgres;
pub use portfolio_repository_postgres::PortfolioRepositoryPostgres;
