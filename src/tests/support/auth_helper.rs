use actix_web::web;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::TokenProvider;

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: "test_secret_key_for_testing_only_0123456789".to_string(),
        issuer: "design-showcase-test".to_string(),
        token_expiry: 3600,
    })
}

/// Provider wrapped the way the extractors look it up.
pub fn test_token_provider() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(test_jwt_service());
    web::Data::new(provider)
}

pub fn bearer(
    provider: &web::Data<Arc<dyn TokenProvider + Send + Sync>>,
    user_id: Uuid,
    role: Role,
) -> (&'static str, String) {
    let token = provider
        .issue_token(user_id, &format!("{user_id}@example.com"), role)
        .unwrap();
    ("Authorization", format!("Bearer {token}"))
}
