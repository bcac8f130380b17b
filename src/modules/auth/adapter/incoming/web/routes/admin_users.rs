use actix_web::{delete, get, post, put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::user_dto::UserResponse;
use crate::api::schemas::{ErrorResponse, PageEnvelope};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::auth::application::domain::entities::{Role, UserId, UserStatus};
use crate::auth::application::ports::outgoing::UserListFilter;
use crate::auth::application::use_cases::delete_user::{DeleteUserError, DeleteUserRequest};
use crate::auth::application::use_cases::list_users::{
    DEFAULT_USER_PAGE_SIZE, MAX_USER_PAGE_SIZE,
};
use crate::auth::application::use_cases::reset_password::ResetPasswordError;
use crate::auth::application::use_cases::update_user_status::{
    UpdateUserStatusError, UpdateUserStatusInput,
};
use crate::shared::api::{ApiResponse, PageParams};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersQuery {
    pub page: Option<u64>,
    /// Default 20, capped at 100
    pub page_size: Option<u64>,
    /// pending | approved | rejected | banned
    pub status: Option<String>,
    /// user | admin
    pub role: Option<String>,
    /// Matches email, username or nickname
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserStatusRequest {
    /// approved | rejected | banned
    #[schema(example = "approved")]
    pub status: String,
    #[schema(example = "user")]
    pub role: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetPasswordResponse {
    pub message: String,
    /// Shown once; the user should change it after logging in
    #[schema(example = "a8Fk2LmQ9zTe")]
    pub temp_password: String,
}

fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// List users with optional filters
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Paginated users", body = PageEnvelope<UserResponse>),
        (status = 400, description = "Unknown status or role filter", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[get("/api/admin/users")]
pub async fn list_users_handler(
    _admin: AdminUser,
    query: web::Query<ListUsersQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let query = query.into_inner();

    let status = match blank_to_none(query.status).map(|s| s.parse::<UserStatus>()) {
        Some(Err(e)) => return ApiResponse::bad_request("VALIDATION_ERROR", &e),
        other => other.and_then(Result::ok),
    };
    let role = match blank_to_none(query.role).map(|s| s.parse::<Role>()) {
        Some(Err(e)) => return ApiResponse::bad_request("VALIDATION_ERROR", &e),
        other => other.and_then(Result::ok),
    };

    let filter = UserListFilter {
        status,
        role,
        search: blank_to_none(query.search),
    };
    let page = PageParams::resolve(
        query.page,
        query.page_size,
        DEFAULT_USER_PAGE_SIZE,
        MAX_USER_PAGE_SIZE,
    );

    match data.auth.list_users.execute(filter, page).await {
        Ok(result) => ApiResponse::paginated(
            result.items.into_iter().map(UserResponse::from).collect(),
            result.total,
            result.page,
            result.page_size,
        ),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}

/// Change a user's status and optionally their role
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserStatusRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Invalid status or role", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[put("/api/admin/users/{id}/status")]
pub async fn update_user_status_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateUserStatusRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let req = req.into_inner();

    let status = match req.status.trim().parse::<UserStatus>() {
        Ok(s) => s,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e),
    };
    let role = match blank_to_none(req.role).map(|r| r.parse::<Role>()) {
        Some(Err(e)) => return ApiResponse::bad_request("VALIDATION_ERROR", &e),
        other => other.and_then(Result::ok),
    };

    let input = UpdateUserStatusInput {
        user_id: UserId::from(user_id),
        status,
        role,
    };

    match data.auth.update_user_status.execute(input).await {
        Ok(profile) => {
            info!(
                admin_id = %admin.user_id,
                user_id = %user_id,
                status = %profile.status,
                role = %profile.role,
                "User status updated"
            );
            ApiResponse::success(UserResponse::from(profile))
        }
        Err(e @ UpdateUserStatusError::StatusNotAllowed(_)) => {
            ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string())
        }
        Err(UpdateUserStatusError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(UpdateUserStatusError::RepositoryError(e)) => {
            error!(user_id = %user_id, error = %e, "Failed to update user status");
            ApiResponse::internal_error()
        }
    }
}

/// Delete a user; their portfolios are soft-deleted first
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Cannot delete own account", body = ErrorResponse),
    )
)]
#[delete("/api/admin/users/{id}")]
pub async fn delete_user_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let target = path.into_inner();
    let request = DeleteUserRequest {
        actor: UserId::from(admin.user_id),
        target: UserId::from(target),
    };

    match data.auth.delete_user.execute(request).await {
        Ok(()) => {
            info!(admin_id = %admin.user_id, user_id = %target, "User deleted");
            ApiResponse::no_content()
        }
        Err(e @ DeleteUserError::CannotDeleteSelf) => {
            warn!(admin_id = %admin.user_id, "Admin attempted to delete own account");
            ApiResponse::invalid_operation(&e.to_string())
        }
        Err(DeleteUserError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e @ DeleteUserError::ArchiveFailed(_))
        | Err(e @ DeleteUserError::RepositoryError(_)) => {
            error!(user_id = %target, error = %e, "Failed to delete user");
            ApiResponse::internal_error()
        }
    }
}

/// Replace a user's password with a generated temporary one
#[utoipa::path(
    post,
    path = "/api/admin/users/{id}/reset-password",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Temporary password", body = ResetPasswordResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
    )
)]
#[post("/api/admin/users/{id}/reset-password")]
pub async fn reset_password_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data.auth.reset_password.execute(UserId::from(user_id)).await {
        Ok(temp_password) => {
            info!(admin_id = %admin.user_id, user_id = %user_id, "Password reset");
            ApiResponse::success(ResetPasswordResponse {
                message: "Password has been reset".to_string(),
                temp_password,
            })
        }
        Err(ResetPasswordError::UserNotFound) => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        Err(e) => {
            error!(user_id = %user_id, error = %e, "Failed to reset password");
            ApiResponse::internal_error()
        }
    }
}
