use actix_web::{delete, get, post, put, web, Responder};
use tracing::info;

use super::storage_dto::{
    storage_error_response, ConnectionTestRequest, MessageResponse, StorageConfigRequest,
    StorageConfigResponse,
};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List storage configs, secrets masked
#[utoipa::path(
    get,
    path = "/api/admin/storage/configs",
    tag = "storage",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All configs", body = [StorageConfigResponse]),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
    )
)]
#[get("/api/admin/storage/configs")]
pub async fn list_storage_configs_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.storage.list_configs.execute().await {
        Ok(configs) => ApiResponse::success(
            configs
                .into_iter()
                .map(StorageConfigResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(e) => storage_error_response("list storage configs", e),
    }
}

/// Create a storage config after a successful connection test
#[utoipa::path(
    post,
    path = "/api/admin/storage/configs",
    tag = "storage",
    security(("bearer_auth" = [])),
    request_body = StorageConfigRequest,
    responses(
        (status = 201, description = "Config created", body = StorageConfigResponse),
        (status = 400, description = "Validation or connection failure", body = ErrorResponse),
        (status = 403, description = "Not an administrator", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse),
    )
)]
#[post("/api/admin/storage/configs")]
pub async fn create_storage_config_handler(
    admin: AdminUser,
    req: web::Json<StorageConfigRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.storage.create_config.execute(req.into_inner().into()).await {
        Ok(config) => {
            info!(
                admin_id = %admin.user_id,
                config_id = config.id,
                active = config.is_active,
                "Storage config created"
            );
            ApiResponse::created(StorageConfigResponse::from(config))
        }
        Err(e) => storage_error_response("create storage config", e),
    }
}

#[utoipa::path(
    get,
    path = "/api/admin/storage/configs/{id}",
    tag = "storage",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Config id")),
    responses(
        (status = 200, description = "Config", body = StorageConfigResponse),
        (status = 404, description = "Unknown config", body = ErrorResponse),
    )
)]
#[get("/api/admin/storage/configs/{id}")]
pub async fn get_storage_config_handler(
    _admin: AdminUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.storage.get_config.execute(path.into_inner()).await {
        Ok(config) => ApiResponse::success(StorageConfigResponse::from(config)),
        Err(e) => storage_error_response("get storage config", e),
    }
}

/// Replace a config; an empty or masked secret keeps the stored one
#[utoipa::path(
    put,
    path = "/api/admin/storage/configs/{id}",
    tag = "storage",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Config id")),
    request_body = StorageConfigRequest,
    responses(
        (status = 200, description = "Updated config", body = StorageConfigResponse),
        (status = 400, description = "Validation or connection failure", body = ErrorResponse),
        (status = 404, description = "Unknown config", body = ErrorResponse),
        (status = 409, description = "Name already used", body = ErrorResponse),
    )
)]
#[put("/api/admin/storage/configs/{id}")]
pub async fn update_storage_config_handler(
    admin: AdminUser,
    path: web::Path<i32>,
    req: web::Json<StorageConfigRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    match data
        .storage
        .update_config
        .execute(id, req.into_inner().into())
        .await
    {
        Ok(config) => {
            info!(admin_id = %admin.user_id, config_id = id, "Storage config updated");
            ApiResponse::success(StorageConfigResponse::from(config))
        }
        Err(e) => storage_error_response("update storage config", e),
    }
}

/// Delete an inactive config that no file references
#[utoipa::path(
    delete,
    path = "/api/admin/storage/configs/{id}",
    tag = "storage",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Config id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 404, description = "Unknown config", body = ErrorResponse),
        (status = 422, description = "Config is active or still has files", body = ErrorResponse),
    )
)]
#[delete("/api/admin/storage/configs/{id}")]
pub async fn delete_storage_config_handler(
    admin: AdminUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    match data.storage.delete_config.execute(id).await {
        Ok(()) => {
            info!(admin_id = %admin.user_id, config_id = id, "Storage config deleted");
            ApiResponse::success(MessageResponse::new("Config deleted"))
        }
        Err(e) => storage_error_response("delete storage config", e),
    }
}

/// Make a config the single active one and reconnect the gateway
#[utoipa::path(
    post,
    path = "/api/admin/storage/configs/{id}/activate",
    tag = "storage",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Config id")),
    responses(
        (status = 200, description = "Now active", body = StorageConfigResponse),
        (status = 400, description = "Client could not be initialized", body = ErrorResponse),
        (status = 404, description = "Unknown config", body = ErrorResponse),
    )
)]
#[post("/api/admin/storage/configs/{id}/activate")]
pub async fn activate_storage_config_handler(
    admin: AdminUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    let id = path.into_inner();
    match data.storage.activate_config.execute(id).await {
        Ok(config) => {
            info!(admin_id = %admin.user_id, config_id = id, "Storage config activated");
            ApiResponse::success(StorageConfigResponse::from(config))
        }
        Err(e) => storage_error_response("activate storage config", e),
    }
}

#[utoipa::path(
    post,
    path = "/api/admin/storage/configs/{id}/test",
    tag = "storage",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Config id")),
    responses(
        (status = 200, description = "Bucket reachable", body = MessageResponse),
        (status = 400, description = "Connection failed", body = ErrorResponse),
        (status = 404, description = "Unknown config", body = ErrorResponse),
    )
)]
#[post("/api/admin/storage/configs/{id}/test")]
pub async fn test_stored_config_handler(
    _admin: AdminUser,
    path: web::Path<i32>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.storage.test_stored_config.execute(path.into_inner()).await {
        Ok(()) => ApiResponse::success(MessageResponse::new("Connection successful")),
        Err(e) => storage_error_response("test stored config", e),
    }
}

/// Test connection settings without saving them
#[utoipa::path(
    post,
    path = "/api/admin/storage/test",
    tag = "storage",
    security(("bearer_auth" = [])),
    request_body = ConnectionTestRequest,
    responses(
        (status = 200, description = "Bucket reachable", body = MessageResponse),
        (status = 400, description = "Connection failed", body = ErrorResponse),
    )
)]
#[post("/api/admin/storage/test")]
pub async fn test_connection_handler(
    _admin: AdminUser,
    req: web::Json<ConnectionTestRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .storage
        .test_connection
        .execute(req.into_inner().into())
        .await
    {
        Ok(()) => ApiResponse::success(MessageResponse::new("Connection successful")),
        Err(e) => storage_error_response("test connection", e),
    }
}
