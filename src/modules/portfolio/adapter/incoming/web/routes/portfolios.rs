use actix_web::{delete, get, post, put, web, Responder};
use tracing::info;
use uuid::Uuid;

use super::portfolio_dto::{
    actor_of, blank_to_none, parse_status, portfolio_error_response, CategoryResponse,
    CreatePortfolioRequest, LikeResponse, PortfolioListParams, PortfolioMessageResponse,
    PortfolioResponse, UpdatePortfolioRequest,
};
use crate::api::schemas::{ErrorResponse, PageEnvelope};
use crate::auth::adapter::incoming::web::extractors::{AuthenticatedUser, MaybeUser};
use crate::portfolio::application::domain::{Actor, CATEGORIES};
use crate::portfolio::application::ports::incoming::use_cases::{
    CreatePortfolioInput, ListScope, PortfolioListRequest, PortfolioPage, UpdatePortfolioInput,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

fn actor(user: &AuthenticatedUser) -> Actor {
    Actor {
        user_id: user.user_id,
        is_admin: user.principal().is_admin(),
    }
}

pub(super) fn page_response(page: PortfolioPage) -> actix_web::HttpResponse {
    ApiResponse::paginated(
        page.items
            .into_iter()
            .map(PortfolioResponse::from)
            .collect(),
        page.total,
        page.page,
        page.page_size,
    )
}

/// List visible portfolios
#[utoipa::path(
    get,
    path = "/api/portfolios",
    tag = "portfolios",
    params(PortfolioListParams),
    responses(
        (status = 200, description = "Paginated portfolios", body = PageEnvelope<PortfolioResponse>),
        (status = 400, description = "Unknown status filter", body = ErrorResponse),
    )
)]
#[get("/api/portfolios")]
pub async fn list_portfolios_handler(
    viewer: MaybeUser,
    query: web::Query<PortfolioListParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let scope = ListScope::Public(actor_of(&viewer.0));
    let request = match query.into_inner().into_request(PortfolioListRequest::new(scope)) {
        Ok(request) => request,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };

    match data.portfolio.list.execute(request).await {
        Ok(page) => page_response(page),
        Err(e) => portfolio_error_response("list portfolios", e),
    }
}

/// The caller's portfolios in every status
#[utoipa::path(
    get,
    path = "/api/my/portfolios",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(PortfolioListParams),
    responses(
        (status = 200, description = "Paginated portfolios", body = PageEnvelope<PortfolioResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[get("/api/my/portfolios")]
pub async fn my_portfolios_handler(
    user: AuthenticatedUser,
    query: web::Query<PortfolioListParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let scope = ListScope::Mine(user.user_id);
    let request = match query.into_inner().into_request(PortfolioListRequest::new(scope)) {
        Ok(request) => request,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };

    match data.portfolio.list.execute(request).await {
        Ok(page) => page_response(page),
        Err(e) => portfolio_error_response("list own portfolios", e),
    }
}

/// Portfolio detail with its active version; counts a view when published
#[utoipa::path(
    get,
    path = "/api/portfolios/{id}",
    tag = "portfolios",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Portfolio", body = PortfolioResponse),
        (status = 404, description = "Missing or not visible", body = ErrorResponse),
    )
)]
#[get("/api/portfolios/{id}")]
pub async fn get_portfolio_handler(
    viewer: MaybeUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .portfolio
        .get
        .execute(path.into_inner(), actor_of(&viewer.0))
        .await
    {
        Ok(view) => ApiResponse::success(PortfolioResponse::from(view)),
        Err(e) => portfolio_error_response("get portfolio", e),
    }
}

/// Create a portfolio with optional initial versions
#[utoipa::path(
    post,
    path = "/api/portfolios",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    request_body = CreatePortfolioRequest,
    responses(
        (status = 201, description = "Created with its versions", body = PortfolioResponse),
        (status = 400, description = "Missing title or unknown category", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[post("/api/portfolios")]
pub async fn create_portfolio_handler(
    user: AuthenticatedUser,
    req: web::Json<CreatePortfolioRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let input = CreatePortfolioInput {
        title: req.title,
        description: req.description,
        content: req.content,
        category: req.category,
        tags: req.tags,
        image_object_id: req.image_object_id,
        ai_level: req.ai_level,
        versions: req.versions.into_iter().map(Into::into).collect(),
    };

    match data.portfolio.create.execute(user.user_id, input).await {
        Ok(view) => {
            info!(
                user_id = %user.user_id,
                portfolio_id = %view.portfolio.id,
                status = %view.portfolio.status,
                versions = view.versions.len(),
                "Portfolio created"
            );
            ApiResponse::created(PortfolioResponse::from(view))
        }
        Err(e) => portfolio_error_response("create portfolio", e),
    }
}

/// Update a portfolio; owner or admin
#[utoipa::path(
    put,
    path = "/api/portfolios/{id}",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Portfolio id")),
    request_body = UpdatePortfolioRequest,
    responses(
        (status = 200, description = "Updated portfolio", body = PortfolioResponse),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Missing or not visible", body = ErrorResponse),
    )
)]
#[put("/api/portfolios/{id}")]
pub async fn update_portfolio_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdatePortfolioRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let status = match parse_status(req.status) {
        Ok(status) => status,
        Err(msg) => return ApiResponse::bad_request("VALIDATION_ERROR", &msg),
    };
    let input = UpdatePortfolioInput {
        title: req.title,
        description: req.description,
        content: req.content,
        category: blank_to_none(req.category),
        tags: req.tags,
        image_object_id: req.image_object_id,
        ai_level: req.ai_level,
        status,
    };

    let portfolio_id = path.into_inner();
    match data
        .portfolio
        .update
        .execute(actor(&user), portfolio_id, input)
        .await
    {
        Ok(view) => {
            info!(user_id = %user.user_id, portfolio_id = %portfolio_id, "Portfolio updated");
            ApiResponse::success(PortfolioResponse::from(view))
        }
        Err(e) => portfolio_error_response("update portfolio", e),
    }
}

/// Soft delete; the portfolio keeps its row with status `deleted`
#[utoipa::path(
    delete,
    path = "/api/portfolios/{id}",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "Deleted", body = PortfolioMessageResponse),
        (status = 403, description = "Not the owner", body = ErrorResponse),
        (status = 404, description = "Missing or not visible", body = ErrorResponse),
    )
)]
#[delete("/api/portfolios/{id}")]
pub async fn delete_portfolio_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let portfolio_id = path.into_inner();
    match data
        .portfolio
        .soft_delete
        .execute(actor(&user), portfolio_id)
        .await
    {
        Ok(()) => {
            info!(user_id = %user.user_id, portfolio_id = %portfolio_id, "Portfolio deleted");
            ApiResponse::success(PortfolioMessageResponse::new("Portfolio deleted"))
        }
        Err(e) => portfolio_error_response("delete portfolio", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/portfolios/{id}/like",
    tag = "portfolios",
    params(("id" = Uuid, Path, description = "Portfolio id")),
    responses(
        (status = 200, description = "New like count", body = LikeResponse),
        (status = 404, description = "Missing or not published", body = ErrorResponse),
    )
)]
#[post("/api/portfolios/{id}/like")]
pub async fn like_portfolio_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.portfolio.like.execute(path.into_inner()).await {
        Ok(likes) => ApiResponse::success(LikeResponse { likes }),
        Err(e) => portfolio_error_response("like portfolio", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "portfolios",
    responses((status = 200, description = "Category filter values", body = [CategoryResponse]))
)]
#[get("/api/categories")]
pub async fn categories_handler() -> impl Responder {
    let categories: Vec<CategoryResponse> = CATEGORIES
        .iter()
        .map(|(value, label)| CategoryResponse {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect();
    ApiResponse::success(categories)
}
