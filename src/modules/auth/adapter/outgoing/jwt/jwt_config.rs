use std::env;

/// Session tokens live for a fixed 24 hours; there is no refresh token.
pub const SESSION_TOKEN_LIFETIME_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Load JWT configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let secret_key =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set".to_string())?;

        // HS256 requires at least 32 bytes
        if secret_key.len() < 32 {
            return Err(
                "JWT_SECRET must be at least 32 characters long for HS256 algorithm".to_string(),
            );
        }

        let issuer = env::var("JWT_ISSUER").unwrap_or_else(|_| "design-showcase".to_string());

        Ok(Self {
            secret_key,
            issuer,
            token_expiry: SESSION_TOKEN_LIFETIME_SECS,
        })
    }
}
