use async_trait::async_trait;
use email_address::EmailAddress;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::auth::application::domain::entities::{Role, UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::{
    NewUserData, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};
use crate::moderation::application::domain::{
    initial_outcome, ModeratedEntity, ModerationOutcome,
};
use crate::moderation::application::ports::outgoing::AdminSettingsRepository;

pub const USERNAME_MIN_LEN: usize = 2;
pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const NICKNAME_MAX_LEN: usize = 50;

// ========================= Register Request =========================

/// Validated registration input.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    email: String,
    username: String,
    password: String,
    nickname: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterRequestError {
    InvalidEmailFormat,
    InvalidUsername,
    PasswordTooShort,
    NicknameTooLong,
}

impl fmt::Display for RegisterRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            RegisterRequestError::InvalidUsername => write!(
                f,
                "Username must be between {} and {} characters",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN
            ),
            RegisterRequestError::PasswordTooShort => write!(
                f,
                "Password must be at least {} characters",
                PASSWORD_MIN_LEN
            ),
            RegisterRequestError::NicknameTooLong => write!(
                f,
                "Nickname must be at most {} characters",
                NICKNAME_MAX_LEN
            ),
        }
    }
}

impl std::error::Error for RegisterRequestError {}

pub fn validate_username(username: &str) -> Result<String, RegisterRequestError> {
    let username = username.trim();
    let len = username.chars().count();
    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(RegisterRequestError::InvalidUsername);
    }
    Ok(username.to_string())
}

impl RegisterUserRequest {
    /// A missing or blank nickname defaults to the username.
    pub fn new(
        email: String,
        username: String,
        password: String,
        nickname: Option<String>,
    ) -> Result<Self, RegisterRequestError> {
        let email = email.trim();
        if !EmailAddress::is_valid(email) {
            return Err(RegisterRequestError::InvalidEmailFormat);
        }

        let username = validate_username(&username)?;

        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(RegisterRequestError::PasswordTooShort);
        }

        let nickname = nickname
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| username.clone());
        if nickname.chars().count() > NICKNAME_MAX_LEN {
            return Err(RegisterRequestError::NicknameTooLong);
        }

        Ok(Self {
            email: email.to_lowercase(),
            username,
            password,
            nickname,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn nickname(&self) -> &str {
        &self.nickname
    }
}

// ========================= Register Error =========================

#[derive(Debug, Clone)]
pub enum RegisterUserError {
    EmailTaken,
    UsernameTaken,
    SettingsUnavailable(String),
    HashingFailed(String),
    RepositoryError(String),
}

impl fmt::Display for RegisterUserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegisterUserError::EmailTaken => write!(f, "Email already registered"),
            RegisterUserError::UsernameTaken => write!(f, "Username already taken"),
            RegisterUserError::SettingsUnavailable(msg) => {
                write!(f, "Moderation settings unavailable: {}", msg)
            }
            RegisterUserError::HashingFailed(msg) => write!(f, "Password hashing failed: {}", msg),
            RegisterUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RegisterUserError {}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterUserResponse {
    pub user: UserProfile,
    /// True when the account waits for an administrator.
    pub pending_approval: bool,
}

// ========================= Use Case =========================

#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError>;
}

pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
    settings: Arc<dyn AdminSettingsRepository>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(
        query: Q,
        repository: R,
        hasher: Arc<dyn PasswordHasher>,
        settings: Arc<dyn AdminSettingsRepository>,
    ) -> Self {
        Self {
            query,
            repository,
            hasher,
            settings,
        }
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError> {
        let email_taken = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?
            .is_some();
        if email_taken {
            return Err(RegisterUserError::EmailTaken);
        }

        let username_taken = self
            .query
            .find_by_username(request.username())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?
            .is_some();
        if username_taken {
            return Err(RegisterUserError::UsernameTaken);
        }

        let settings = self
            .settings
            .get_or_create()
            .await
            .map_err(|e| RegisterUserError::SettingsUnavailable(e.to_string()))?;

        let status = match initial_outcome(&settings, ModeratedEntity::User) {
            ModerationOutcome::AutoApproved => UserStatus::Approved,
            ModerationOutcome::AwaitingReview => UserStatus::Pending,
        };

        let password_hash = self
            .hasher
            .hash_password(&request.password)
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(NewUserData {
                email: request.email,
                username: request.username,
                nickname: request.nickname,
                password_hash,
                role: Role::User,
                status,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent registration.
                UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailTaken,
                other => RegisterUserError::RepositoryError(other.to_string()),
            })?;

        Ok(RegisterUserResponse {
            pending_approval: user.status == UserStatus::Pending,
            user,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::in_memory::{InMemorySettings, InMemoryUsers, PlainHasher};

    fn request(email: &str, username: &str) -> RegisterUserRequest {
        RegisterUserRequest::new(
            email.to_string(),
            username.to_string(),
            "secret1".to_string(),
            None,
        )
        .unwrap()
    }

    fn use_case(
        users: &InMemoryUsers,
        settings: InMemorySettings,
    ) -> RegisterUserUseCase<InMemoryUsers, InMemoryUsers> {
        RegisterUserUseCase::new(
            users.clone(),
            users.clone(),
            Arc::new(PlainHasher),
            Arc::new(settings),
        )
    }

    #[test]
    fn test_request_validation() {
        let bad_email = RegisterUserRequest::new(
            "nope".into(),
            "alice".into(),
            "secret1".into(),
            None,
        );
        assert_eq!(
            bad_email.unwrap_err(),
            RegisterRequestError::InvalidEmailFormat
        );

        let short_name =
            RegisterUserRequest::new("a@b.com".into(), "a".into(), "secret1".into(), None);
        assert_eq!(short_name.unwrap_err(), RegisterRequestError::InvalidUsername);

        let two_chars =
            RegisterUserRequest::new("u1@b.com".into(), "u1".into(), "pw123456".into(), None);
        assert!(two_chars.is_ok());

        let long_name = RegisterUserRequest::new(
            "a@b.com".into(),
            "a".repeat(21),
            "secret1".into(),
            None,
        );
        assert_eq!(long_name.unwrap_err(), RegisterRequestError::InvalidUsername);

        let short_pw =
            RegisterUserRequest::new("a@b.com".into(), "alice".into(), "12345".into(), None);
        assert_eq!(short_pw.unwrap_err(), RegisterRequestError::PasswordTooShort);

        let long_nick = RegisterUserRequest::new(
            "a@b.com".into(),
            "alice".into(),
            "secret1".into(),
            Some("n".repeat(51)),
        );
        assert_eq!(long_nick.unwrap_err(), RegisterRequestError::NicknameTooLong);
    }

    #[test]
    fn test_nickname_defaults_to_username() {
        let req = RegisterUserRequest::new(
            " Alice@Example.com ".into(),
            "alice".into(),
            "secret1".into(),
            Some("   ".into()),
        )
        .unwrap();

        assert_eq!(req.nickname(), "alice");
        assert_eq!(req.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_register_auto_approves_by_default() {
        let users = InMemoryUsers::default();
        let uc = use_case(&users, InMemorySettings::new(false, false));

        let resp = uc.execute(request("a@b.com", "alice")).await.unwrap();

        assert_eq!(resp.user.status, UserStatus::Approved);
        assert_eq!(resp.user.role, Role::User);
        assert!(!resp.pending_approval);
        assert_eq!(
            users.record_by_email("a@b.com").unwrap().password_hash,
            "hashed:secret1"
        );
    }

    #[tokio::test]
    async fn test_register_pending_when_approval_required() {
        let users = InMemoryUsers::default();
        let uc = use_case(&users, InMemorySettings::new(true, false));

        let resp = uc.execute(request("a@b.com", "alice")).await.unwrap();

        assert_eq!(resp.user.status, UserStatus::Pending);
        assert!(resp.pending_approval);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() {
        let users = InMemoryUsers::default();
        let uc = use_case(&users, InMemorySettings::new(false, false));
        uc.execute(request("a@b.com", "alice")).await.unwrap();

        let same_email = uc.execute(request("a@b.com", "bob")).await;
        assert!(matches!(same_email, Err(RegisterUserError::EmailTaken)));

        let same_username = uc.execute(request("c@d.com", "alice")).await;
        assert!(matches!(same_username, Err(RegisterUserError::UsernameTaken)));
    }
}
