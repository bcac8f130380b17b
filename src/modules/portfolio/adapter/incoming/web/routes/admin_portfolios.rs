use actix_web::{delete, get, put, web, Responder};
use tracing::info;
use uuid::Uuid;

use super::portfolio_dto::{
    portfolio_error_response, PortfolioListParams, PortfolioMessageResponse, PortfolioResponse,
    ReviewPortfolioRequest,
};
use super::portfolios::page_response;
use crate::api::schemas::{ErrorResponse, PageEnvelope};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::portfolio::application::domain::PortfolioStatus;
use crate::portfolio::application::ports::incoming::use_cases::{ListScope, PortfolioListRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Every portfolio, any status
#[utoipa::path(
    get,
    path = "/api/admin/portfolios",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(PortfolioListParams),
    responses(
        (status = 200, description = "Paginated portfolios", body = PageEnvelope<PortfolioResponse>),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[get("/api/admin/portfolios")]
pub async fn admin_list_portfolios_handler(
    _admin: AdminUser,
    query: web::Query<PortfolioListParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match query
        .into_inner()
        .into_request(PortfolioListRequest::new(ListScope::Admin))
    {
        Ok(request) => request,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };

    match data.portfolio.list.execute(request).await {
        Ok(page) => page_response(page),
        Err(e) => portfolio_error_response("admin list portfolios", e),
    }
}

/// Publish or reject a portfolio
#[utoipa::path(
    put,
    path = "/api/admin/portfolios/{id}/status",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = ReviewPortfolioRequest,
    responses(
        (status = 200, description = "Reviewed portfolio", body = PortfolioResponse),
        (status = 400, description = "Status other than published or rejected", body = ErrorResponse),
        (status = 404, description = "Unknown portfolio", body = ErrorResponse),
    )
)]
#[put("/api/admin/portfolios/{id}/status")]
pub async fn review_portfolio_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<ReviewPortfolioRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let status = match req.status.trim().parse::<PortfolioStatus>() {
        Ok(status) => status,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };

    let portfolio_id = path.into_inner();
    match data.portfolio.review.execute(portfolio_id, status).await {
        Ok(view) => {
            info!(
                admin_id = %admin.user_id,
                portfolio_id = %portfolio_id,
                status = %status,
                "Portfolio reviewed"
            );
            ApiResponse::success(PortfolioResponse::from(view))
        }
        Err(e) => portfolio_error_response("review portfolio", e),
    }
}

/// Remove a portfolio and its versions
#[utoipa::path(
    delete,
    path = "/api/admin/portfolios/{id}",
    tag = "admin",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Deleted", body = PortfolioMessageResponse),
        (status = 404, description = "Unknown portfolio", body = ErrorResponse),
    )
)]
#[delete("/api/admin/portfolios/{id}")]
pub async fn admin_delete_portfolio_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let portfolio_id = path.into_inner();
    match data.portfolio.hard_delete.execute(portfolio_id).await {
        Ok(()) => {
            info!(admin_id = %admin.user_id, portfolio_id = %portfolio_id, "Portfolio removed");
            ApiResponse::success(PortfolioMessageResponse::new("Portfolio deleted"))
        }
        Err(e) => portfolio_error_response("admin delete portfolio", e),
    }
}
