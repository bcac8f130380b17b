use async_trait::async_trait;

use crate::auth::application::domain::entities::UserProfile;
use crate::auth::application::ports::outgoing::{UserListFilter, UserQuery, UserQueryError};
use crate::shared::api::PageParams;

pub const DEFAULT_USER_PAGE_SIZE: u64 = 20;
pub const MAX_USER_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone)]
pub struct UserPage {
    pub items: Vec<UserProfile>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

#[derive(Debug, thiserror::Error, Clone)]
pub enum ListUsersError {
    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait ListUsersUseCase: Send + Sync {
    async fn execute(
        &self,
        filter: UserListFilter,
        page: PageParams,
    ) -> Result<UserPage, ListUsersError>;
}

pub struct ListUsersService<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> ListUsersService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> ListUsersUseCase for ListUsersService<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(
        &self,
        filter: UserListFilter,
        page: PageParams,
    ) -> Result<UserPage, ListUsersError> {
        let (records, total) = self
            .query
            .list(filter, page.offset(), page.page_size)
            .await?;

        Ok(UserPage {
            items: records.iter().map(|r| r.to_profile()).collect(),
            total,
            page: page.page,
            page_size: page.page_size,
        })
    }
}
