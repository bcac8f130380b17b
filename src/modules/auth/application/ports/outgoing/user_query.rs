// application/ports/outgoing/user_query.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::{Role, UserProfile, UserStatus};

/// Full user row for read operations, including the password hash.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub nickname: String,
    pub password_hash: String,
    pub avatar: String,
    pub bio: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            nickname: self.nickname.clone(),
            avatar: self.avatar.clone(),
            bio: self.bio.clone(),
            role: self.role,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserListFilter {
    pub status: Option<UserStatus>,
    pub role: Option<Role>,
    /// Case-insensitive match on email, username or nickname.
    pub search: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum UserQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Corrupt user row: {0}")]
    CorruptRow(String),
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserRecord>, UserQueryError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserQueryError>;
    async fn find_by_username(&self, username: &str)
        -> Result<Option<UserRecord>, UserQueryError>;

    /// Newest first; returns the page and the total matching count.
    async fn list(
        &self,
        filter: UserListFilter,
        offset: u64,
        limit: u64,
    ) -> Result<(Vec<UserRecord>, u64), UserQueryError>;

    async fn count_all(&self) -> Result<u64, UserQueryError>;
}
