use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::{Role, UserId, UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};

#[derive(Debug, Clone)]
pub struct UpdateUserStatusInput {
    pub user_id: UserId,
    pub status: UserStatus,
    pub role: Option<Role>,
}

#[derive(Debug, Clone)]
pub enum UpdateUserStatusError {
    /// Administrators may only move accounts to approved, rejected or banned.
    StatusNotAllowed(UserStatus),
    UserNotFound,
    RepositoryError(String),
}

impl fmt::Display for UpdateUserStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateUserStatusError::StatusNotAllowed(s) => {
                write!(f, "Status '{}' cannot be assigned", s)
            }
            UpdateUserStatusError::UserNotFound => write!(f, "User not found"),
            UpdateUserStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait UpdateUserStatusUseCase: Send + Sync {
    async fn execute(
        &self,
        input: UpdateUserStatusInput,
    ) -> Result<UserProfile, UpdateUserStatusError>;
}

pub struct UpdateUserStatusService<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> UpdateUserStatusService<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> UpdateUserStatusUseCase for UpdateUserStatusService<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        input: UpdateUserStatusInput,
    ) -> Result<UserProfile, UpdateUserStatusError> {
        if input.status == UserStatus::Pending {
            return Err(UpdateUserStatusError::StatusNotAllowed(input.status));
        }

        self.repository
            .update_status_and_role(input.user_id.value(), input.status, input.role)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateUserStatusError::UserNotFound,
                other => UpdateUserStatusError::RepositoryError(other.to_string()),
            })
    }
}
