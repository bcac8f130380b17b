use actix_web::{delete, get, post, put, web, Responder};
use tracing::info;
use uuid::Uuid;

use super::portfolio_dto::{
    actor_of, portfolio_error_response, CreateVersionRequest, PortfolioMessageResponse,
    UpdateVersionRequest, VersionResponse,
};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::{AuthenticatedUser, MaybeUser};
use crate::portfolio::application::domain::Actor;
use crate::shared::api::ApiResponse;
use crate::AppState;

fn actor(user: &AuthenticatedUser) -> Actor {
    Actor {
        user_id: user.user_id,
        is_admin: user.principal().is_admin(),
    }
}

/// Versions of a portfolio, newest first
#[utoipa::path(
    get,
    path = "/api/portfolios/{id}/versions",
    tag = "versions",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Versions", body = [VersionResponse]),
        (status = 404, description = "Portfolio missing or not visible", body = ErrorResponse),
    )
)]
#[get("/api/portfolios/{id}/versions")]
pub async fn list_versions_handler(
    viewer: MaybeUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .portfolio
        .list_versions
        .execute(path.into_inner(), actor_of(&viewer.0))
        .await
    {
        Ok(versions) => ApiResponse::success(
            versions
                .into_iter()
                .map(VersionResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => portfolio_error_response("list versions", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/portfolios/{id}/versions/{version_id}",
    tag = "versions",
    params(
        ("id" = Uuid, Path, description = "Portfolio id"),
        ("version_id" = Uuid, Path, description = "Version id"),
    ),
    responses(
        (status = 200, description = "Version", body = VersionResponse),
        (status = 404, description = "Portfolio or version missing", body = ErrorResponse),
    )
)]
#[get("/api/portfolios/{id}/versions/{version_id}")]
pub async fn get_version_handler(
    viewer: MaybeUser,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (portfolio_id, version_id) = path.into_inner();
    match data
        .portfolio
        .get_version
        .execute(portfolio_id, version_id, actor_of(&viewer.0))
        .await
    {
        Ok(version) => ApiResponse::success(VersionResponse::from(version)),
        Err(e) => portfolio_error_response("get version", e),
    }
}

/// Add a version; its label follows the most recent one
#[utoipa::path(
    post,
    path = "/api/portfolios/{id}/versions",
    tag = "versions",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = CreateVersionRequest,
    responses(
        (status = 201, description = "Version created", body = VersionResponse),
        (status = 400, description = "Missing title", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Portfolio missing", body = ErrorResponse),
    )
)]
#[post("/api/portfolios/{id}/versions")]
pub async fn create_version_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<CreateVersionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let portfolio_id = path.into_inner();
    match data
        .portfolio
        .create_version
        .execute(actor(&user), portfolio_id, req.into_inner().into())
        .await
    {
        Ok(version) => {
            info!(
                user_id = %user.user_id,
                portfolio_id = %portfolio_id,
                version = %version.label,
                active = version.is_active,
                "Version created"
            );
            ApiResponse::created(VersionResponse::from(version))
        }
        Err(e) => portfolio_error_response("create version", e),
    }
}

#[utoipa::path(
    put,
    path = "/api/portfolios/{id}/versions/{version_id}",
    tag = "versions",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Portfolio id"),
        ("version_id" = Uuid, Path, description = "Version id"),
    ),
    request_body = UpdateVersionRequest,
    responses(
        (status = 200, description = "Updated version", body = VersionResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Portfolio or version missing", body = ErrorResponse),
    )
)]
#[put("/api/portfolios/{id}/versions/{version_id}")]
pub async fn update_version_handler(
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    req: web::Json<UpdateVersionRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (portfolio_id, version_id) = path.into_inner();
    match data
        .portfolio
        .update_version
        .execute(actor(&user), portfolio_id, version_id, req.into_inner().into())
        .await
    {
        Ok(version) => {
            info!(user_id = %user.user_id, version_id = %version_id, "Version updated");
            ApiResponse::success(VersionResponse::from(version))
        }
        Err(e) => portfolio_error_response("update version", e),
    }
}

/// Make a version the only active one
#[utoipa::path(
    post,
    path = "/api/portfolios/{id}/versions/{version_id}/activate",
    tag = "versions",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Portfolio id"),
        ("version_id" = Uuid, Path, description = "Version id"),
    ),
    responses(
        (status = 200, description = "Activated", body = PortfolioMessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Version does not belong to the portfolio", body = ErrorResponse),
    )
)]
#[post("/api/portfolios/{id}/versions/{version_id}/activate")]
pub async fn activate_version_handler(
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (portfolio_id, version_id) = path.into_inner();
    match data
        .portfolio
        .set_active_version
        .execute(actor(&user), portfolio_id, version_id)
        .await
    {
        Ok(()) => {
            info!(
                user_id = %user.user_id,
                portfolio_id = %portfolio_id,
                version_id = %version_id,
                "Active version switched"
            );
            ApiResponse::success(PortfolioMessageResponse::new("Version activated"))
        }
        Err(e) => portfolio_error_response("activate version", e),
    }
}

/// Delete an inactive version
#[utoipa::path(
    delete,
    path = "/api/portfolios/{id}/versions/{version_id}",
    tag = "versions",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Portfolio id"),
        ("version_id" = Uuid, Path, description = "Version id"),
    ),
    responses(
        (status = 200, description = "Deleted", body = PortfolioMessageResponse),
        (status = 404, description = "Portfolio or version missing", body = ErrorResponse),
        (status = 422, description = "Version is active", body = ErrorResponse),
    )
)]
#[delete("/api/portfolios/{id}/versions/{version_id}")]
pub async fn delete_version_handler(
    user: AuthenticatedUser,
    path: web::Path<(Uuid, Uuid)>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (portfolio_id, version_id) = path.into_inner();
    match data
        .portfolio
        .delete_version
        .execute(actor(&user), portfolio_id, version_id)
        .await
    {
        Ok(()) => {
            info!(user_id = %user.user_id, version_id = %version_id, "Version deleted");
            ApiResponse::success(PortfolioMessageResponse::new("Version deleted"))
        }
        Err(e) => portfolio_error_response("delete version", e),
    }
}
