use serde::Serialize;
use utoipa::ToSchema;

/// Envelope of every 2xx answer except paginated lists.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: T,
}

/// Flat list envelope: the page sits next to `data`, not inside it.
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct PageEnvelope<T> {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<T>,
    #[schema(example = 31)]
    pub total: u64,
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 12)]
    pub page_size: u64,
    /// `ceil(total / page_size)`
    #[schema(example = 3)]
    pub total_pages: u64,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    pub error: ErrorDetail,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Stable code such as `PORTFOLIO_NOT_FOUND`, `VERSION_ACTIVE` or
    /// `STORAGE_NOT_INITIALIZED`.
    #[schema(example = "PORTFOLIO_NOT_FOUND")]
    pub code: String,

    /// Safe to show; internal details are only logged.
    #[schema(example = "Portfolio not found")]
    pub message: String,
}
