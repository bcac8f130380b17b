use anyhow::Context;
use tracing::info;

use crate::auth::application::domain::entities::{Role, UserStatus};
use crate::auth::application::ports::outgoing::{
    NewUserData, PasswordHasher, UserQuery, UserRepository,
};

#[derive(Debug, Clone)]
pub struct AdminSeed {
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// `SEED_ADMIN_EMAIL` / `SEED_ADMIN_PASSWORD`, with the stock development defaults.
    pub fn from_env() -> Self {
        Self {
            email: std::env::var("SEED_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@designai.com".to_string()),
            password: std::env::var("SEED_ADMIN_PASSWORD")
                .unwrap_or_else(|_| "admin123".to_string()),
        }
    }
}

/// Creates the first administrator when the user table is empty.
/// Returns whether an account was created.
pub async fn seed_admin_if_empty(
    query: &dyn UserQuery,
    repository: &dyn UserRepository,
    hasher: &dyn PasswordHasher,
    seed: &AdminSeed,
) -> anyhow::Result<bool> {
    let existing = query.count_all().await.context("count users")?;
    if existing > 0 {
        return Ok(false);
    }

    let password_hash = hasher
        .hash_password(&seed.password)
        .await
        .context("hash admin password")?;

    repository
        .create_user(NewUserData {
            email: seed.email.to_lowercase(),
            username: "admin".to_string(),
            nickname: "Administrator".to_string(),
            password_hash,
            role: Role::Admin,
            status: UserStatus::Approved,
        })
        .await
        .map_err(|e| anyhow::anyhow!("create admin user: {e}"))?;

    info!(email = %seed.email, "Seeded administrator account");
    Ok(true)
}
