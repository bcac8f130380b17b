use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserProfile, UserStatus};

#[derive(Debug, Clone)]
pub struct NewUserData {
    pub email: String,
    pub username: String,
    pub nickname: String,
    pub password_hash: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Self-service profile edit; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, data: NewUserData) -> Result<UserProfile, UserRepositoryError>;

    async fn update_profile(
        &self,
        user_id: Uuid,
        patch: ProfilePatch,
    ) -> Result<UserProfile, UserRepositoryError>;

    async fn update_status_and_role(
        &self,
        user_id: Uuid,
        status: UserStatus,
        role: Option<Role>,
    ) -> Result<UserProfile, UserRepositoryError>;

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    /// Removes the row permanently.
    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
}

#[derive(Debug, Clone)]
pub enum UserRepositoryError {
    UserAlreadyExists,
    UserNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::UserNotFound => write!(f, "User not found"),
            UserRepositoryError::UserAlreadyExists => write!(f, "User already exists"),
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
