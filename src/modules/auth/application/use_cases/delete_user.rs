use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{
    PortfolioArchiver, UserQuery, UserRepository, UserRepositoryError,
};

#[derive(Debug, Clone)]
pub struct DeleteUserRequest {
    pub actor: UserId,
    pub target: UserId,
}

#[derive(Debug, Clone)]
pub enum DeleteUserError {
    CannotDeleteSelf,
    UserNotFound,
    ArchiveFailed(String),
    RepositoryError(String),
}

impl fmt::Display for DeleteUserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteUserError::CannotDeleteSelf => write!(f, "Cannot delete your own account"),
            DeleteUserError::UserNotFound => write!(f, "User not found"),
            DeleteUserError::ArchiveFailed(msg) => {
                write!(f, "Failed to archive user portfolios: {}", msg)
            }
            DeleteUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait IDeleteUserUseCase: Send + Sync {
    async fn execute(&self, request: DeleteUserRequest) -> Result<(), DeleteUserError>;
}

/// Admin removal: owned portfolios are soft-deleted first, then the account row goes.
pub struct DeleteUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    archiver: Arc<dyn PortfolioArchiver>,
}

impl<Q, R> DeleteUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, archiver: Arc<dyn PortfolioArchiver>) -> Self {
        Self {
            query,
            repository,
            archiver,
        }
    }
}

#[async_trait]
impl<Q, R> IDeleteUserUseCase for DeleteUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, request: DeleteUserRequest) -> Result<(), DeleteUserError> {
        if request.actor == request.target {
            return Err(DeleteUserError::CannotDeleteSelf);
        }

        let target = request.target.value();

        self.query
            .find_by_id(target)
            .await
            .map_err(|e| DeleteUserError::RepositoryError(e.to_string()))?
            .ok_or(DeleteUserError::UserNotFound)?;

        let archived = self
            .archiver
            .archive_all_for_owner(target)
            .await
            .map_err(|e| DeleteUserError::ArchiveFailed(e.to_string()))?;

        self.repository
            .delete_user(target)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => DeleteUserError::UserNotFound,
                other => DeleteUserError::RepositoryError(other.to_string()),
            })?;

        info!(user_id = %target, archived_portfolios = archived, "User deleted");
        Ok(())
    }
}
