use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::auth::adapter::incoming::web::extractors::Principal;
use crate::portfolio::application::domain::{Actor, PortfolioStatus, VersionRecord};
use crate::portfolio::application::ports::incoming::use_cases::{
    CreateVersionInput, InitialVersionInput, PortfolioError, PortfolioListRequest, PortfolioView,
    UpdateVersionInput,
};
use crate::shared::api::ApiResponse;

pub fn actor_of(principal: &Principal) -> Option<Actor> {
    principal.user_id().map(|user_id| Actor {
        user_id,
        is_admin: principal.is_admin(),
    })
}

pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `None` when absent or blank, `Err` with a client message when unknown.
pub fn parse_status(raw: Option<String>) -> Result<Option<PortfolioStatus>, String> {
    blank_to_none(raw)
        .map(|s| s.parse::<PortfolioStatus>())
        .transpose()
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PortfolioListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// `all` or absent disables the filter
    pub category: Option<String>,
    /// Matches title, author, description, tags and content
    pub search: Option<String>,
    pub user_id: Option<Uuid>,
    /// draft | published | rejected | deleted
    pub status: Option<String>,
    /// created_at | title | category | status
    pub sort_by: Option<String>,
    /// asc | desc
    pub order: Option<String>,
}

impl PortfolioListParams {
    pub fn into_request(
        self,
        mut request: PortfolioListRequest,
    ) -> Result<PortfolioListRequest, String> {
        request.status = parse_status(self.status)?;
        request.owner_id = self.user_id;
        request.category = blank_to_none(self.category);
        request.search = blank_to_none(self.search);
        request.sort_by = blank_to_none(self.sort_by);
        request.order = blank_to_none(self.order);
        request.page = self.page;
        request.page_size = self.page_size;
        Ok(request)
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InitialVersionRequest {
    /// Derived from the position (`v1.0`, `v1.1`, …) when absent
    #[schema(example = "v1.0")]
    pub version: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub change_log: String,
    #[serde(default)]
    pub is_active: bool,
}

impl From<InitialVersionRequest> for InitialVersionInput {
    fn from(req: InitialVersionRequest) -> Self {
        Self {
            label: blank_to_none(req.version),
            title: req.title,
            description: req.description,
            html_content: req.html_content,
            change_log: req.change_log,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreatePortfolioRequest {
    #[schema(example = "Neon landing page")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[schema(example = "web")]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// File object to show as the cover image
    pub image_object_id: Option<Uuid>,
    #[serde(default)]
    pub ai_level: String,
    #[serde(default)]
    pub versions: Vec<InitialVersionRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdatePortfolioRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_object_id: Option<Uuid>,
    pub ai_level: Option<String>,
    /// Only `draft` is honoured for non-admins
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateVersionRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub html_content: String,
    #[serde(default)]
    pub change_log: String,
    #[serde(default)]
    pub is_active: bool,
}

impl From<CreateVersionRequest> for CreateVersionInput {
    fn from(req: CreateVersionRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            html_content: req.html_content,
            change_log: req.change_log,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateVersionRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub html_content: Option<String>,
    pub change_log: Option<String>,
    /// `true` makes this the single active version
    pub is_active: Option<bool>,
}

impl From<UpdateVersionRequest> for UpdateVersionInput {
    fn from(req: UpdateVersionRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            html_content: req.html_content,
            change_log: req.change_log,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ReviewPortfolioRequest {
    /// published | rejected
    #[schema(example = "published")]
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    pub id: Uuid,
    pub portfolio_id: Uuid,
    #[schema(example = "v1.2")]
    pub version: String,
    pub title: String,
    pub description: String,
    pub html_content: String,
    /// SVG data URI, empty when the version has no HTML
    pub thumbnail: String,
    pub change_log: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<VersionRecord> for VersionResponse {
    fn from(v: VersionRecord) -> Self {
        Self {
            id: v.id,
            portfolio_id: v.portfolio_id,
            version: v.label,
            title: v.title,
            description: v.description,
            html_content: v.html_content,
            thumbnail: v.thumbnail,
            change_log: v.change_log,
            is_active: v.is_active,
            created_at: v.created_at.to_rfc3339(),
            updated_at: v.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortfolioResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub author: String,
    pub author_initial: String,
    pub description: String,
    pub content: String,
    pub category: String,
    pub tags: Vec<String>,
    /// Emoji placeholder for cards without a cover
    #[schema(example = "🎨 Neon landing page")]
    pub image: String,
    pub image_object_id: Option<Uuid>,
    pub image_url: Option<String>,
    pub ai_level: String,
    pub likes: i32,
    pub views: i32,
    #[schema(example = "published")]
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_version: Option<VersionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub versions: Vec<VersionResponse>,
}

impl From<PortfolioView> for PortfolioResponse {
    fn from(view: PortfolioView) -> Self {
        let thumbnail = view.thumbnail().map(str::to_string);
        let p = view.portfolio;
        Self {
            id: p.id,
            user_id: p.owner_id,
            author_initial: p.author_initial(),
            image: p.image_placeholder(),
            title: p.title,
            author: p.author,
            description: p.description,
            content: p.content,
            category: p.category,
            tags: p.tags,
            image_object_id: p.image_object_id,
            image_url: view.image_url,
            ai_level: p.ai_level,
            likes: p.likes,
            views: p.views,
            status: p.status.to_string(),
            created_at: p.created_at.to_rfc3339(),
            updated_at: p.updated_at.to_rfc3339(),
            active_version: view.active_version.map(VersionResponse::from),
            thumbnail,
            versions: view.versions.into_iter().map(VersionResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LikeResponse {
    pub likes: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    #[schema(example = "web")]
    pub value: String,
    #[schema(example = "Web design")]
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PortfolioMessageResponse {
    pub message: String,
}

impl PortfolioMessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

pub fn portfolio_error_response(action: &str, e: PortfolioError) -> HttpResponse {
    match e {
        PortfolioError::NotFound => {
            ApiResponse::not_found("PORTFOLIO_NOT_FOUND", "Portfolio not found")
        }
        PortfolioError::VersionNotFound => {
            ApiResponse::not_found("VERSION_NOT_FOUND", "Version not found")
        }
        PortfolioError::Forbidden => {
            warn!(action, "Portfolio write refused");
            ApiResponse::forbidden("FORBIDDEN", "Permission denied")
        }
        PortfolioError::Validation(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),
        PortfolioError::InvalidOperation(msg) => ApiResponse::invalid_operation(&msg),
        PortfolioError::Internal(msg) => {
            error!(action, error = %msg, "Portfolio request failed");
            ApiResponse::internal_error()
        }
    }
}
