use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::UserQuery;
use crate::portfolio::application::ports::outgoing::{AuthorDirectory, AuthorDirectoryError};

/// Author name for a portfolio: the user's nickname, falling back to the username.
pub struct UserAuthorDirectory {
    users: Arc<dyn UserQuery>,
}

impl UserAuthorDirectory {
    pub fn new(users: Arc<dyn UserQuery>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AuthorDirectory for UserAuthorDirectory {
    async fn display_name(&self, user_id: Uuid) -> Result<Option<String>, AuthorDirectoryError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await
            .map_err(|e| AuthorDirectoryError::LookupFailed(e.to_string()))?;

        Ok(user.map(|u| {
            if u.nickname.trim().is_empty() {
                u.username
            } else {
                u.nickname
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{Role, UserStatus};
    use crate::tests::support::in_memory::InMemoryUsers;

    #[tokio::test]
    async fn test_nickname_then_username() {
        let users = InMemoryUsers::default();
        let named = users.insert("a@example.com", "alice", "pw", Role::User, UserStatus::Approved);
        users.set_nickname(named, "Alice A.");
        let bare = users.insert("b@example.com", "bob", "pw", Role::User, UserStatus::Approved);
        users.set_nickname(bare, " ");
        let directory = UserAuthorDirectory::new(Arc::new(users));

        assert_eq!(
            directory.display_name(named).await.unwrap().as_deref(),
            Some("Alice A.")
        );
        assert_eq!(directory.display_name(bare).await.unwrap().as_deref(), Some("bob"));
        assert_eq!(directory.display_name(Uuid::new_v4()).await.unwrap(), None);
    }
}
