use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use super::user_dto::UserResponse;
use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::register_user::{RegisterUserError, RegisterUserRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequestDto {
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// 2 to 20 characters
    #[schema(example = "jane")]
    pub username: String,
    /// At least 6 characters
    #[schema(example = "secret1")]
    pub password: String,
    /// Defaults to the username
    #[schema(example = "Jane D.")]
    pub nickname: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Register a new account
///
/// The initial status depends on the moderation settings: `approved`, or `pending` when
/// user approval is required.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Email or username already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request =
        match RegisterUserRequest::new(dto.email, dto.username, dto.password, dto.nickname) {
            Ok(r) => r,
            Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
        };

    match data.auth.register.execute(request).await {
        Ok(resp) => {
            info!(
                user_id = %resp.user.id,
                status = %resp.user.status,
                "User registered"
            );
            let message = if resp.pending_approval {
                "Registration successful. Please wait for administrator approval."
            } else {
                "Registration successful."
            };
            ApiResponse::created(RegisterResponse {
                message: message.to_string(),
                user: UserResponse::from(resp.user),
            })
        }
        Err(RegisterUserError::EmailTaken) => {
            warn!("Registration rejected: email taken");
            ApiResponse::conflict("EMAIL_TAKEN", "Email already registered")
        }
        Err(RegisterUserError::UsernameTaken) => {
            warn!("Registration rejected: username taken");
            ApiResponse::conflict("USERNAME_TAKEN", "Username already taken")
        }
        Err(e @ RegisterUserError::SettingsUnavailable(_))
        | Err(e @ RegisterUserError::HashingFailed(_))
        | Err(e @ RegisterUserError::RepositoryError(_)) => {
            error!(error = %e, "Registration failed");
            ApiResponse::internal_error()
        }
    }
}
