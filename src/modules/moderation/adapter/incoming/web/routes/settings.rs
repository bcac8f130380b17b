use actix_web::{get, put, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::moderation::application::domain::{AdminSettings, SettingsPatch};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSettingsRequest {
    #[schema(example = true)]
    pub user_approval_required: Option<bool>,
    #[schema(example = false)]
    pub portfolio_approval_required: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub user_approval_required: bool,
    pub portfolio_approval_required: bool,
    pub updated_at: String,
}

impl From<AdminSettings> for SettingsResponse {
    fn from(s: AdminSettings) -> Self {
        Self {
            user_approval_required: s.user_approval_required,
            portfolio_approval_required: s.portfolio_approval_required,
            updated_at: s.updated_at.to_rfc3339(),
        }
    }
}

/// Read moderation settings
#[utoipa::path(
    get,
    path = "/api/admin/settings",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = SettingsResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[get("/api/admin/settings")]
pub async fn get_settings_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.moderation.get_settings.execute().await {
        Ok(settings) => ApiResponse::success(SettingsResponse::from(settings)),
        Err(e) => {
            error!(error = %e, "Failed to load admin settings");
            ApiResponse::internal_error()
        }
    }
}

/// Update moderation settings; absent fields keep their value
#[utoipa::path(
    put,
    path = "/api/admin/settings",
    tag = "admin",
    security(("bearer_auth" = [])),
    request_body = UpdateSettingsRequest,
    responses(
        (status = 200, description = "Updated settings", body = SettingsResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[put("/api/admin/settings")]
pub async fn update_settings_handler(
    admin: AdminUser,
    req: web::Json<UpdateSettingsRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let patch = SettingsPatch {
        user_approval_required: req.user_approval_required,
        portfolio_approval_required: req.portfolio_approval_required,
    };

    match data.moderation.update_settings.execute(patch).await {
        Ok(settings) => {
            info!(
                admin_id = %admin.user_id,
                user_approval_required = settings.user_approval_required,
                portfolio_approval_required = settings.portfolio_approval_required,
                "Admin settings updated"
            );
            ApiResponse::success(SettingsResponse::from(settings))
        }
        Err(e) => {
            error!(error = %e, "Failed to update admin settings");
            ApiResponse::internal_error()
        }
    }
}
