use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::token_provider::{
    SessionClaims, TokenError, TokenProvider,
};
use crate::shared::api::ApiResponse;

/// Identity attached to a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    Anonymous,
    Authenticated {
        user_id: Uuid,
        email: String,
        role: Role,
    },
}

impl Principal {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated { user_id, .. } => Some(*user_id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            Principal::Authenticated {
                role: Role::Admin,
                ..
            }
        )
    }
}

impl From<SessionClaims> for Principal {
    fn from(claims: SessionClaims) -> Self {
        Principal::Authenticated {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Required authentication: answers 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn principal(&self) -> Principal {
        Principal::Authenticated {
            user_id: self.user_id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// Optional authentication: a missing or bad token yields `Principal::Anonymous`.
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Principal);

/// Admin-only: 401 without a valid token, 403 for non-admins.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub email: String,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn token_provider(req: &HttpRequest) -> Option<&web::Data<Arc<dyn TokenProvider + Send + Sync>>> {
    req.app_data::<web::Data<Arc<dyn TokenProvider + Send + Sync>>>()
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|s| s.to_string())
}

fn extract_token_from_query(req: &HttpRequest) -> Option<String> {
    web::Query::<std::collections::HashMap<String, String>>::from_query(req.query_string())
        .ok()?
        .get("token")
        .filter(|t| !t.is_empty())
        .cloned()
}

/// Bearer header first, then the `token` query parameter.
fn extract_token(req: &HttpRequest) -> Option<String> {
    extract_token_from_header(req).or_else(|| extract_token_from_query(req))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let provider = match token_provider(req) {
        Some(p) => p,
        None => {
            tracing::error!("Token provider is not registered as app data");
            return Err(create_api_error(ApiResponse::internal_error()));
        }
    };

    let token = extract_token(req).ok_or_else(|| {
        create_api_error(ApiResponse::unauthorized(
            "UNAUTHORIZED",
            "Missing or invalid authorization token",
        ))
    })?;

    match provider.parse_token(&token) {
        Ok(claims) => Ok(AuthenticatedUser {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }),
        Err(TokenError::TokenExpired) => Err(create_api_error(ApiResponse::unauthorized(
            "TOKEN_EXPIRED",
            "Token has expired",
        ))),
        Err(_) => Err(create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))),
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for MaybeUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = match (token_provider(req), extract_token(req)) {
            (Some(provider), Some(token)) => provider
                .parse_token(&token)
                .map(Principal::from)
                .unwrap_or(Principal::Anonymous),
            _ => Principal::Anonymous,
        };

        ready(Ok(MaybeUser(principal)))
    }
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = match authenticate(req) {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if user.role != Role::Admin {
            return ready(Err(create_api_error(ApiResponse::forbidden(
                "FORBIDDEN",
                "Administrator privileges required",
            ))));
        }

        ready(Ok(AdminUser {
            user_id: user.user_id,
            email: user.email,
        }))
    }
}
