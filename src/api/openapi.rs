use crate::api::schemas::{ErrorDetail, ErrorResponse, PageEnvelope, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

// Auth
use crate::auth::adapter::incoming::web::routes::admin_users::{
    ResetPasswordResponse, UpdateUserStatusRequest,
};
use crate::auth::adapter::incoming::web::routes::login_user::{LoginRequestDto, LoginResponse};
use crate::auth::adapter::incoming::web::routes::profile::UpdateProfileRequest;
use crate::auth::adapter::incoming::web::routes::register_user::{
    RegisterRequestDto, RegisterResponse,
};
use crate::auth::adapter::incoming::web::routes::user_dto::UserResponse;

// Moderation
use crate::moderation::adapter::incoming::web::routes::settings::{
    SettingsResponse, UpdateSettingsRequest,
};

// Portfolio
use crate::portfolio::adapter::incoming::web::routes::portfolio_dto::{
    CategoryResponse, CreatePortfolioRequest, CreateVersionRequest, InitialVersionRequest,
    LikeResponse, PortfolioMessageResponse, PortfolioResponse, ReviewPortfolioRequest,
    UpdatePortfolioRequest, UpdateVersionRequest, VersionResponse,
};

// Storage
use crate::storage::adapter::incoming::web::routes::files::UploadForm;
use crate::storage::adapter::incoming::web::routes::storage_dto::{
    ConnectionTestRequest, FileResponse, FileUrlResponse, MessageResponse, StorageConfigRequest,
    StorageConfigResponse,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Design Showcase API",
        version = "1.0.0",
        description = "Accounts, moderated portfolios with HTML versions, and S3-compatible media storage"
    ),
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::auth::adapter::incoming::web::routes::profile::get_profile_handler,
        crate::auth::adapter::incoming::web::routes::profile::update_profile_handler,

        // Admin user management
        crate::auth::adapter::incoming::web::routes::admin_users::list_users_handler,
        crate::auth::adapter::incoming::web::routes::admin_users::update_user_status_handler,
        crate::auth::adapter::incoming::web::routes::admin_users::delete_user_handler,
        crate::auth::adapter::incoming::web::routes::admin_users::reset_password_handler,

        // Moderation settings
        crate::moderation::adapter::incoming::web::routes::settings::get_settings_handler,
        crate::moderation::adapter::incoming::web::routes::settings::update_settings_handler,

        // Portfolio endpoints
        crate::portfolio::adapter::incoming::web::routes::portfolios::categories_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::list_portfolios_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::my_portfolios_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::get_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::create_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::update_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::delete_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::portfolios::like_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::admin_portfolios::admin_list_portfolios_handler,
        crate::portfolio::adapter::incoming::web::routes::admin_portfolios::review_portfolio_handler,
        crate::portfolio::adapter::incoming::web::routes::admin_portfolios::admin_delete_portfolio_handler,

        // Version endpoints
        crate::portfolio::adapter::incoming::web::routes::versions::list_versions_handler,
        crate::portfolio::adapter::incoming::web::routes::versions::get_version_handler,
        crate::portfolio::adapter::incoming::web::routes::versions::create_version_handler,
        crate::portfolio::adapter::incoming::web::routes::versions::update_version_handler,
        crate::portfolio::adapter::incoming::web::routes::versions::activate_version_handler,
        crate::portfolio::adapter::incoming::web::routes::versions::delete_version_handler,

        // Storage configuration
        crate::storage::adapter::incoming::web::routes::configs::list_storage_configs_handler,
        crate::storage::adapter::incoming::web::routes::configs::create_storage_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::get_storage_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::update_storage_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::delete_storage_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::activate_storage_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::test_stored_config_handler,
        crate::storage::adapter::incoming::web::routes::configs::test_connection_handler,

        // Files
        crate::storage::adapter::incoming::web::routes::files::upload_file_handler,
        crate::storage::adapter::incoming::web::routes::files::get_file_url_handler,
        crate::storage::adapter::incoming::web::routes::files::delete_file_handler,
        crate::storage::adapter::incoming::web::routes::files::list_files_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<PortfolioResponse>,
            PageEnvelope<PortfolioResponse>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            RegisterRequestDto,
            RegisterResponse,
            LoginRequestDto,
            LoginResponse,
            UserResponse,
            UpdateProfileRequest,
            UpdateUserStatusRequest,
            ResetPasswordResponse,

            // Moderation DTOs
            SettingsResponse,
            UpdateSettingsRequest,

            // Portfolio DTOs
            CreatePortfolioRequest,
            InitialVersionRequest,
            UpdatePortfolioRequest,
            ReviewPortfolioRequest,
            PortfolioResponse,
            PortfolioMessageResponse,
            LikeResponse,
            CategoryResponse,
            CreateVersionRequest,
            UpdateVersionRequest,
            VersionResponse,

            // Storage DTOs
            StorageConfigRequest,
            StorageConfigResponse,
            ConnectionTestRequest,
            MessageResponse,
            UploadForm,
            FileResponse,
            FileUrlResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and own profile"),
        (name = "admin", description = "User management, moderation settings and portfolio review"),
        (name = "portfolios", description = "Portfolio gallery and authoring"),
        (name = "versions", description = "HTML versions of a portfolio"),
        (name = "storage", description = "Object storage configurations"),
        (name = "files", description = "Uploaded file objects"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token returned by /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
