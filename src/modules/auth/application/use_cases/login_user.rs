use async_trait::async_trait;
use email_address::EmailAddress;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::auth::application::domain::entities::{UserProfile, UserStatus};
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider, UserQuery};

// ========================= Login Request =========================

#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginRequestError {
    EmptyEmail,
    InvalidEmailFormat,
    EmptyPassword,
}

impl fmt::Display for LoginRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            LoginRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            LoginRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
        }
    }
}

impl std::error::Error for LoginRequestError {}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }
        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Login Error =============================

#[derive(Debug, Clone)]
pub enum LoginError {
    InvalidCredentials,
    AccountPending,
    AccountRejected,
    AccountBanned,
    PasswordVerificationFailed(String),
    TokenGenerationFailed(String),
    QueryError(String),
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::InvalidCredentials => write!(f, "Invalid email or password"),
            LoginError::AccountPending => write!(f, "Account is pending approval"),
            LoginError::AccountRejected => write!(f, "Account has been rejected"),
            LoginError::AccountBanned => write!(f, "Account has been banned"),
            LoginError::PasswordVerificationFailed(msg) => {
                write!(f, "Password verification failed: {}", msg)
            }
            LoginError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            LoginError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for LoginError {}

#[derive(Debug, Clone, Serialize)]
pub struct LoginUserResponse {
    pub token: String,
    pub user: UserProfile,
}

// ============================ Use Case =============================

#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
}

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q, hasher: Arc<dyn PasswordHasher>, tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            query,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?
            .ok_or(LoginError::InvalidCredentials)?;

        let is_valid = self
            .hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;
        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        // Status is checked only after the password so it never leaks for unknown callers.
        match user.status {
            UserStatus::Approved => {}
            UserStatus::Pending => return Err(LoginError::AccountPending),
            UserStatus::Rejected => return Err(LoginError::AccountRejected),
            UserStatus::Banned => return Err(LoginError::AccountBanned),
        }

        let token = self
            .tokens
            .issue_token(user.id, &user.email, user.role)
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            token,
            user: user.to_profile(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::Role;
    use crate::tests::support::auth_helper::test_jwt_service;
    use crate::tests::support::in_memory::{InMemoryUsers, PlainHasher};

    fn use_case(users: &InMemoryUsers) -> LoginUserUseCase<InMemoryUsers> {
        LoginUserUseCase::new(
            users.clone(),
            Arc::new(PlainHasher),
            Arc::new(test_jwt_service()),
        )
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest::new(email.to_string(), password.to_string()).unwrap()
    }

    #[test]
    fn test_login_request_normalizes_email() {
        let req = LoginRequest::new("  Jane@Example.COM ".into(), "pw".into()).unwrap();
        assert_eq!(req.email(), "jane@example.com");
    }

    #[test]
    fn test_login_request_rejects_bad_input() {
        assert_eq!(
            LoginRequest::new("".into(), "pw".into()).unwrap_err(),
            LoginRequestError::EmptyEmail
        );
        assert_eq!(
            LoginRequest::new("jane".into(), "pw".into()).unwrap_err(),
            LoginRequestError::InvalidEmailFormat
        );
        assert_eq!(
            LoginRequest::new("jane@example.com".into(), "".into()).unwrap_err(),
            LoginRequestError::EmptyPassword
        );
    }

    #[tokio::test]
    async fn test_login_success_issues_parseable_token() {
        let users = InMemoryUsers::default();
        let id = users.insert("jane@example.com", "jane", "secret1", Role::Admin, UserStatus::Approved);

        let resp = use_case(&users)
            .execute(login("jane@example.com", "secret1"))
            .await
            .unwrap();

        let claims = test_jwt_service().parse_token(&resp.token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(resp.user.username, "jane");
    }

    #[tokio::test]
    async fn test_login_wrong_password_or_unknown_email() {
        let users = InMemoryUsers::default();
        users.insert("jane@example.com", "jane", "secret1", Role::User, UserStatus::Approved);
        let uc = use_case(&users);

        assert!(matches!(
            uc.execute(login("jane@example.com", "nope")).await,
            Err(LoginError::InvalidCredentials)
        ));
        assert!(matches!(
            uc.execute(login("ghost@example.com", "secret1")).await,
            Err(LoginError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_login_refuses_non_approved_accounts() {
        let users = InMemoryUsers::default();
        users.insert("p@example.com", "pending", "secret1", Role::User, UserStatus::Pending);
        users.insert("r@example.com", "rejected", "secret1", Role::User, UserStatus::Rejected);
        users.insert("b@example.com", "banned", "secret1", Role::User, UserStatus::Banned);
        let uc = use_case(&users);

        assert!(matches!(
            uc.execute(login("p@example.com", "secret1")).await,
            Err(LoginError::AccountPending)
        ));
        assert!(matches!(
            uc.execute(login("r@example.com", "secret1")).await,
            Err(LoginError::AccountRejected)
        ));
        assert!(matches!(
            uc.execute(login("b@example.com", "secret1")).await,
            Err(LoginError::AccountBanned)
        ));
    }
}
