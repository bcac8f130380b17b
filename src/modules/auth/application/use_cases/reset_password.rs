use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;
use std::sync::Arc;

use crate::auth::application::domain::entities::UserId;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, UserRepository, UserRepositoryError,
};

const TEMP_PASSWORD_LEN: usize = 12;

#[derive(Debug, Clone)]
pub enum ResetPasswordError {
    UserNotFound,
    HashingFailed(String),
    RepositoryError(String),
}

impl fmt::Display for ResetPasswordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResetPasswordError::UserNotFound => write!(f, "User not found"),
            ResetPasswordError::HashingFailed(msg) => write!(f, "Password hashing failed: {}", msg),
            ResetPasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    /// Returns the new temporary password, shown once to the administrator.
    async fn execute(&self, user_id: UserId) -> Result<String, ResetPasswordError>;
}

pub fn generate_temp_password() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TEMP_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

pub struct ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
}

impl<R> ResetPasswordUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { repository, hasher }
    }
}

#[async_trait]
impl<R> IResetPasswordUseCase for ResetPasswordUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, user_id: UserId) -> Result<String, ResetPasswordError> {
        let temp_password = generate_temp_password();

        let hash = self
            .hasher
            .hash_password(&temp_password)
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user_id.value(), hash)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ResetPasswordError::UserNotFound,
                other => ResetPasswordError::RepositoryError(other.to_string()),
            })?;

        Ok(temp_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{Role, UserStatus};
    use crate::tests::support::in_memory::{InMemoryUsers, PlainHasher};
    use uuid::Uuid;

    #[test]
    fn test_temp_password_shape() {
        let a = generate_temp_password();
        let b = generate_temp_password();

        assert_eq!(a.len(), TEMP_PASSWORD_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_reset_stores_hash_of_returned_password() {
        let users = InMemoryUsers::default();
        let id = users.insert("a@b.com", "alice", "old-pass", Role::User, UserStatus::Approved);

        let temp = ResetPasswordUseCase::new(users.clone(), Arc::new(PlainHasher))
            .execute(UserId::from(id))
            .await
            .unwrap();

        assert_eq!(
            users.record_by_email("a@b.com").unwrap().password_hash,
            format!("hashed:{temp}")
        );
    }

    #[tokio::test]
    async fn test_reset_missing_user() {
        let result = ResetPasswordUseCase::new(InMemoryUsers::default(), Arc::new(PlainHasher))
            .execute(UserId::from(Uuid::new_v4()))
            .await;

        assert!(matches!(result, Err(ResetPasswordError::UserNotFound)));
    }
}
