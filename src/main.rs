pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{auth, moderation, portfolio, storage, thumbnail};

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::{
    delete_user::DeleteUserUseCase,
    fetch_profile::FetchUserProfileService,
    list_users::ListUsersService,
    login_user::LoginUserUseCase,
    register_user::RegisterUserUseCase,
    reset_password::ResetPasswordUseCase,
    seed_admin::{seed_admin_if_empty, AdminSeed},
    update_profile::UpdateUserProfileService,
    update_user_status::UpdateUserStatusService,
};
use crate::auth::auth_use_cases::AuthUseCases;
use crate::moderation::adapter::outgoing::AdminSettingsRepositoryPostgres;
use crate::moderation::application::moderation_use_cases::ModerationUseCases;
use crate::moderation::application::ports::outgoing::AdminSettingsRepository;
use crate::moderation::application::service::{GetSettingsService, UpdateSettingsService};
use crate::portfolio::adapter::outgoing::{
    PortfolioArchiverAdapter, PortfolioQueryPostgres, PortfolioRepositoryPostgres,
    StorageImageUrlResolver, UserAuthorDirectory,
};
use crate::portfolio::application::ports::outgoing::{AuthorDirectory, ImageUrlResolver};
use crate::portfolio::application::service::{
    CreatePortfolioService, CreateVersionService, DeleteVersionService, GetPortfolioService,
    GetVersionService, HardDeletePortfolioService, LikePortfolioService, ListPortfoliosService,
    ListVersionsService, ReviewPortfolioService, SetActiveVersionService,
    SoftDeletePortfolioService, UpdatePortfolioService, UpdateVersionService,
};
use crate::portfolio::portfolio_use_cases::PortfolioUseCases;
use crate::shared::api::{custom_json_config, custom_query_config};
use crate::storage::adapter::outgoing::{
    FileObjectRepositoryPostgres, S3Connector, StorageConfigRepositoryPostgres,
};
use crate::storage::application::ports::incoming::use_cases::GetFileUrlUseCase;
use crate::storage::application::ports::outgoing::StorageConfigRepository;
use crate::storage::application::service::{
    ActivateStorageConfigService, CreateStorageConfigService, DeleteFileService,
    DeleteStorageConfigService, GetFileUrlService, GetStorageConfigService, ListFilesService,
    ListStorageConfigsService, StorageGateway, TestConnectionService, TestStoredConfigService,
    UpdateStorageConfigService, UploadFileService,
};
use crate::storage::storage_use_cases::StorageUseCases;

use actix_web::{web, App, HttpServer};
use anyhow::{anyhow, Context};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub moderation: ModerationUseCases,
    pub portfolio: PortfolioUseCases,
    pub storage: StorageUseCases,
}

#[cfg(not(tarpaulin_include))]
async fn connect_database(db_url: &str) -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    Database::connect(opt)
        .await
        .context("connect to database")
}

/// Loads the active storage config, if any, and builds its client.
/// The server still starts when this fails; file routes answer 503 until a config is activated.
#[cfg(not(tarpaulin_include))]
async fn initialize_storage(
    configs: &StorageConfigRepositoryPostgres,
    gateway: &StorageGateway,
) {
    match configs.find_active().await {
        Ok(Some(config)) => {
            let name = config.name.clone();
            if let Err(e) = gateway.initialize(config).await {
                warn!(config = %name, error = %e, "Active storage config could not be initialized");
            }
        }
        Ok(None) => info!("No active storage config; uploads disabled until one is activated"),
        Err(e) => warn!(error = %e, "Failed to load the active storage config"),
    }
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Try .env.{environment} first, then fall back to .env
    let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    let env_file = format!(".env.{}", rust_env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let jwt_config = JwtConfig::from_env().map_err(|e| anyhow!(e))?;

    let db = Arc::new(connect_database(&db_url).await?);
    Migrator::up(db.as_ref(), None)
        .await
        .context("run database migrations")?;

    // Repositories
    let user_query = UserQueryPostgres::new(Arc::clone(&db));
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db));
    let settings_repo = AdminSettingsRepositoryPostgres::new(Arc::clone(&db));
    let portfolio_query = PortfolioQueryPostgres::new(Arc::clone(&db));
    let portfolio_repo = PortfolioRepositoryPostgres::new(Arc::clone(&db));
    let config_repo = StorageConfigRepositoryPostgres::new(Arc::clone(&db));
    let file_repo = FileObjectRepositoryPostgres::new(Arc::clone(&db));

    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env());
    let jwt_service = JwtTokenService::new(jwt_config);

    // Seeding
    settings_repo
        .get_or_create()
        .await
        .map_err(|e| anyhow!("ensure admin settings: {e}"))?;
    seed_admin_if_empty(&user_query, &user_repo, hasher.as_ref(), &AdminSeed::from_env()).await?;

    // Storage
    let gateway = Arc::new(StorageGateway::new(Arc::new(S3Connector)));
    initialize_storage(&config_repo, &gateway).await;

    let file_url: Arc<dyn GetFileUrlUseCase + Send + Sync> = Arc::new(GetFileUrlService::new(
        file_repo.clone(),
        Arc::clone(&gateway),
    ));
    let storage = StorageUseCases {
        create_config: Arc::new(CreateStorageConfigService::new(
            config_repo.clone(),
            Arc::clone(&gateway),
        )),
        list_configs: Arc::new(ListStorageConfigsService::new(config_repo.clone())),
        get_config: Arc::new(GetStorageConfigService::new(config_repo.clone())),
        update_config: Arc::new(UpdateStorageConfigService::new(
            config_repo.clone(),
            Arc::clone(&gateway),
        )),
        delete_config: Arc::new(DeleteStorageConfigService::new(
            config_repo.clone(),
            file_repo.clone(),
        )),
        activate_config: Arc::new(ActivateStorageConfigService::new(
            config_repo.clone(),
            Arc::clone(&gateway),
        )),
        test_connection: Arc::new(TestConnectionService::new(Arc::clone(&gateway))),
        test_stored_config: Arc::new(TestStoredConfigService::new(
            config_repo,
            Arc::clone(&gateway),
        )),
        upload_file: Arc::new(UploadFileService::new(file_repo.clone(), Arc::clone(&gateway))),
        file_url: Arc::clone(&file_url),
        delete_file: Arc::new(DeleteFileService::new(file_repo.clone(), Arc::clone(&gateway))),
        list_files: Arc::new(ListFilesService::new(file_repo, Arc::clone(&gateway))),
    };

    // Portfolio
    let settings: Arc<dyn AdminSettingsRepository> = Arc::new(settings_repo.clone());
    let authors: Arc<dyn AuthorDirectory> =
        Arc::new(UserAuthorDirectory::new(Arc::new(user_query.clone())));
    let images: Arc<dyn ImageUrlResolver> = Arc::new(StorageImageUrlResolver::new(file_url));

    let portfolio = PortfolioUseCases {
        create: Arc::new(CreatePortfolioService::new(
            portfolio_repo.clone(),
            Arc::clone(&authors),
            Arc::clone(&settings),
            Arc::clone(&images),
        )),
        get: Arc::new(GetPortfolioService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
            Arc::clone(&images),
        )),
        list: Arc::new(ListPortfoliosService::new(
            portfolio_query.clone(),
            Arc::clone(&images),
        )),
        update: Arc::new(UpdatePortfolioService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
            authors,
            Arc::clone(&images),
        )),
        soft_delete: Arc::new(SoftDeletePortfolioService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
        )),
        hard_delete: Arc::new(HardDeletePortfolioService::new(portfolio_repo.clone())),
        review: Arc::new(ReviewPortfolioService::new(portfolio_repo.clone(), images)),
        like: Arc::new(LikePortfolioService::new(portfolio_repo.clone())),
        create_version: Arc::new(CreateVersionService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
        )),
        list_versions: Arc::new(ListVersionsService::new(portfolio_query.clone())),
        get_version: Arc::new(GetVersionService::new(portfolio_query.clone())),
        update_version: Arc::new(UpdateVersionService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
        )),
        set_active_version: Arc::new(SetActiveVersionService::new(
            portfolio_query.clone(),
            portfolio_repo.clone(),
        )),
        delete_version: Arc::new(DeleteVersionService::new(
            portfolio_query,
            portfolio_repo.clone(),
        )),
    };

    // Auth
    let archiver = PortfolioArchiverAdapter::new(Arc::new(portfolio_repo));
    let auth = AuthUseCases {
        register: Arc::new(RegisterUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            Arc::clone(&hasher),
            Arc::clone(&settings),
        )),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            Arc::clone(&hasher),
            Arc::new(jwt_service.clone()),
        )),
        fetch_profile: Arc::new(FetchUserProfileService::new(user_query.clone())),
        update_profile: Arc::new(UpdateUserProfileService::new(
            user_query.clone(),
            user_repo.clone(),
        )),
        list_users: Arc::new(ListUsersService::new(user_query.clone())),
        update_user_status: Arc::new(UpdateUserStatusService::new(user_repo.clone())),
        delete_user: Arc::new(DeleteUserUseCase::new(
            user_query,
            user_repo.clone(),
            Arc::new(archiver),
        )),
        reset_password: Arc::new(ResetPasswordUseCase::new(user_repo, hasher)),
    };

    let moderation = ModerationUseCases {
        get_settings: Arc::new(GetSettingsService::new(settings_repo.clone())),
        update_settings: Arc::new(UpdateSettingsService::new(settings_repo)),
    };

    let state = AppState {
        auth,
        moderation,
        portfolio,
        storage,
    };

    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let openapi = ApiDoc::openapi();

    let server_url = format!("{host}:{port}");
    info!(address = %server_url, "HTTP server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(custom_json_config())
            .app_data(custom_query_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind(server_url)?
    .run()
    .await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::auth::adapter::incoming::web::routes as auth_routes;
    use crate::moderation::adapter::incoming::web::routes as moderation_routes;
    use crate::portfolio::adapter::incoming::web::routes as portfolio_routes;
    use crate::storage::adapter::incoming::web::routes as storage_routes;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth_routes::register_user_handler);
    cfg.service(auth_routes::login_user_handler);
    cfg.service(auth_routes::get_profile_handler);
    cfg.service(auth_routes::update_profile_handler);
    // Admin: users
    cfg.service(auth_routes::list_users_handler);
    cfg.service(auth_routes::update_user_status_handler);
    cfg.service(auth_routes::delete_user_handler);
    cfg.service(auth_routes::reset_password_handler);
    // Admin: moderation settings
    cfg.service(moderation_routes::get_settings_handler);
    cfg.service(moderation_routes::update_settings_handler);
    // Portfolios
    cfg.service(portfolio_routes::categories_handler);
    cfg.service(portfolio_routes::list_portfolios_handler);
    cfg.service(portfolio_routes::my_portfolios_handler);
    cfg.service(portfolio_routes::create_portfolio_handler);
    cfg.service(portfolio_routes::get_portfolio_handler);
    cfg.service(portfolio_routes::update_portfolio_handler);
    cfg.service(portfolio_routes::delete_portfolio_handler);
    cfg.service(portfolio_routes::like_portfolio_handler);
    // Versions
    cfg.service(portfolio_routes::list_versions_handler);
    cfg.service(portfolio_routes::create_version_handler);
    cfg.service(portfolio_routes::get_version_handler);
    cfg.service(portfolio_routes::update_version_handler);
    cfg.service(portfolio_routes::delete_version_handler);
    cfg.service(portfolio_routes::activate_version_handler);
    // Admin: portfolios
    cfg.service(portfolio_routes::admin_list_portfolios_handler);
    cfg.service(portfolio_routes::review_portfolio_handler);
    cfg.service(portfolio_routes::admin_delete_portfolio_handler);
    // Admin: storage
    cfg.service(storage_routes::test_connection_handler);
    cfg.service(storage_routes::list_storage_configs_handler);
    cfg.service(storage_routes::create_storage_config_handler);
    cfg.service(storage_routes::get_storage_config_handler);
    cfg.service(storage_routes::update_storage_config_handler);
    cfg.service(storage_routes::delete_storage_config_handler);
    cfg.service(storage_routes::activate_storage_config_handler);
    cfg.service(storage_routes::test_stored_config_handler);
    // Files
    cfg.service(storage_routes::upload_file_handler);
    cfg.service(storage_routes::list_files_handler);
    cfg.service(storage_routes::get_file_url_handler);
    cfg.service(storage_routes::delete_file_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
