use async_trait::async_trait;
use std::fmt;

use crate::auth::application::domain::entities::{UserId, UserProfile};
use crate::auth::application::ports::outgoing::{
    ProfilePatch, UserQuery, UserRepository, UserRepositoryError,
};
use crate::auth::application::use_cases::register_user::{validate_username, NICKNAME_MAX_LEN};

/// Self-service edit. Empty strings are treated like absent fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileInput {
    pub username: Option<String>,
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone)]
pub enum UpdateProfileError {
    UserNotFound,
    UsernameTaken,
    InvalidUsername(String),
    NicknameTooLong,
    RepositoryError(String),
}

impl fmt::Display for UpdateProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateProfileError::UserNotFound => write!(f, "User not found"),
            UpdateProfileError::UsernameTaken => write!(f, "Username already taken"),
            UpdateProfileError::InvalidUsername(msg) => write!(f, "{}", msg),
            UpdateProfileError::NicknameTooLong => write!(
                f,
                "Nickname must be at most {} characters",
                NICKNAME_MAX_LEN
            ),
            UpdateProfileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

#[async_trait]
pub trait UpdateUserProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<UserProfile, UpdateProfileError>;
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
}

impl<Q, R> UpdateUserProfileService<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R) -> Self {
        Self { query, repository }
    }
}

#[async_trait]
impl<Q, R> UpdateUserProfileUseCase for UpdateUserProfileService<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: UserId,
        input: UpdateProfileInput,
    ) -> Result<UserProfile, UpdateProfileError> {
        let current = self
            .query
            .find_by_id(user_id.value())
            .await
            .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?
            .ok_or(UpdateProfileError::UserNotFound)?;

        let mut patch = ProfilePatch {
            username: None,
            nickname: non_empty(input.nickname),
            avatar: non_empty(input.avatar),
            bio: non_empty(input.bio),
        };

        if let Some(ref nickname) = patch.nickname {
            if nickname.chars().count() > NICKNAME_MAX_LEN {
                return Err(UpdateProfileError::NicknameTooLong);
            }
        }

        if let Some(username) = non_empty(input.username) {
            if username != current.username {
                let username = validate_username(&username)
                    .map_err(|e| UpdateProfileError::InvalidUsername(e.to_string()))?;

                let owner = self
                    .query
                    .find_by_username(&username)
                    .await
                    .map_err(|e| UpdateProfileError::RepositoryError(e.to_string()))?;
                if owner.is_some_and(|u| u.id != current.id) {
                    return Err(UpdateProfileError::UsernameTaken);
                }
                patch.username = Some(username);
            }
        }

        self.repository
            .update_profile(user_id.value(), patch)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateProfileError::UserNotFound,
                UserRepositoryError::UserAlreadyExists => UpdateProfileError::UsernameTaken,
                UserRepositoryError::DatabaseError(msg) => UpdateProfileError::RepositoryError(msg),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{Role, UserStatus};
    use crate::tests::support::in_memory::InMemoryUsers;

    fn service(users: &InMemoryUsers) -> UpdateUserProfileService<InMemoryUsers, InMemoryUsers> {
        UpdateUserProfileService::new(users.clone(), users.clone())
    }

    #[tokio::test]
    async fn test_empty_fields_keep_stored_values() {
        let users = InMemoryUsers::default();
        let id = users.insert("a@b.com", "alice", "pw1234", Role::User, UserStatus::Approved);

        let profile = service(&users)
            .execute(
                UserId::from(id),
                UpdateProfileInput {
                    username: Some(String::new()),
                    nickname: Some("Ally".into()),
                    avatar: None,
                    bio: Some("  ".into()),
                },
            )
            .await
            .unwrap();

        assert_eq!(profile.username, "alice");
        assert_eq!(profile.nickname, "Ally");
        assert_eq!(profile.bio, "");
    }

    #[tokio::test]
    async fn test_username_must_be_unique() {
        let users = InMemoryUsers::default();
        let id = users.insert("a@b.com", "alice", "pw1234", Role::User, UserStatus::Approved);
        users.insert("b@b.com", "bobby", "pw1234", Role::User, UserStatus::Approved);

        let result = service(&users)
            .execute(
                UserId::from(id),
                UpdateProfileInput {
                    username: Some("bobby".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UpdateProfileError::UsernameTaken)));
    }

    #[tokio::test]
    async fn test_username_rename_is_validated() {
        let users = InMemoryUsers::default();
        let id = users.insert("a@b.com", "alice", "pw1234", Role::User, UserStatus::Approved);

        let result = service(&users)
            .execute(
                UserId::from(id),
                UpdateProfileInput {
                    username: Some("a".into()),
                    ..Default::default()
                },
            )
            .await;

        assert!(matches!(result, Err(UpdateProfileError::InvalidUsername(_))));
    }
}
