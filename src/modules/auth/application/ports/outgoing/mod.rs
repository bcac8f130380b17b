pub mod password_hasher;
pub mod portfolio_archiver;
pub mod token_provider;
pub mod user_query;
pub mod user_repository;

pub use password_hasher::{HashError, PasswordHasher};
pub use portfolio_archiver::{PortfolioArchiver, PortfolioArchiverError};
pub use token_provider::{SessionClaims, TokenError, TokenProvider};
pub use user_query::{UserListFilter, UserQuery, UserQueryError, UserRecord};
pub use user_repository::{NewUserData, ProfilePatch, UserRepository, UserRepositoryError};
