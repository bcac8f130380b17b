use async_trait::async_trait;

use crate::auth::application::domain::entities::{UserId, UserProfile};
use crate::auth::application::ports::outgoing::{UserQuery, UserQueryError};

#[derive(Debug, thiserror::Error, Clone)]
pub enum FetchProfileError {
    #[error("User not found")]
    UserNotFound,

    #[error("Query error: {0}")]
    QueryError(#[from] UserQueryError),
}

#[async_trait]
pub trait FetchUserProfileUseCase: Send + Sync {
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchProfileError>;
}

pub struct FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> FetchUserProfileService<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> FetchUserProfileUseCase for FetchUserProfileService<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<UserProfile, FetchProfileError> {
        self.query
            .find_by_id(user_id.value())
            .await?
            .map(|record| record.to_profile())
            .ok_or(FetchProfileError::UserNotFound)
    }
}
