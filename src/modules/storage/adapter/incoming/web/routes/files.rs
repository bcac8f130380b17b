use actix_multipart::Multipart;
use actix_web::{delete, get, post, web, Responder};
use futures::StreamExt;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::storage_dto::{storage_error_response, FileResponse, FileUrlResponse, MessageResponse};
use crate::api::schemas::{ErrorResponse, PageEnvelope};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::storage::application::ports::incoming::use_cases::{FileListRequest, UploadFileInput};
use crate::AppState;

pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Multipart fields copied into the object's tags.
const TAG_FIELDS: [&str; 2] = ["category", "purpose"];

/// Documentation shape of the multipart body.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    /// `"true"` makes the object publicly addressable
    pub is_public: Option<String>,
    pub category: Option<String>,
    pub purpose: Option<String>,
}

#[derive(Debug, Default)]
struct ParsedUpload {
    bytes: Option<Vec<u8>>,
    file_name: String,
    content_type: String,
    is_public: bool,
    tags: BTreeMap<String, String>,
}

async fn read_upload(mut payload: Multipart) -> Result<ParsedUpload, String> {
    let mut parsed = ParsedUpload::default();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| e.to_string())?;
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            parsed.file_name = field
                .content_disposition()
                .and_then(|cd| cd.get_filename())
                .unwrap_or("upload")
                .to_string();
            parsed.content_type = field
                .content_type()
                .map(|m| m.essence_str().to_string())
                .unwrap_or_else(|| FALLBACK_CONTENT_TYPE.to_string());
        }

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| e.to_string())?;
            if buf.len() + chunk.len() > MAX_UPLOAD_BYTES {
                return Err(format!(
                    "File exceeds the {} MiB upload limit",
                    MAX_UPLOAD_BYTES / (1024 * 1024)
                ));
            }
            buf.extend_from_slice(&chunk);
        }

        match name.as_str() {
            "file" => parsed.bytes = Some(buf),
            "is_public" => parsed.is_public = String::from_utf8_lossy(&buf).trim() == "true",
            tag if TAG_FIELDS.contains(&tag) => {
                let value = String::from_utf8_lossy(&buf).trim().to_string();
                if !value.is_empty() {
                    parsed.tags.insert(name, value);
                }
            }
            _ => {}
        }
    }

    Ok(parsed)
}

/// Upload a file to the active storage config
#[utoipa::path(
    post,
    path = "/api/files/upload",
    tag = "files",
    security(("bearer_auth" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Stored", body = FileResponse),
        (status = 400, description = "Missing or empty file", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 503, description = "No active storage config", body = ErrorResponse),
    )
)]
#[post("/api/files/upload")]
pub async fn upload_file_handler(
    user: AuthenticatedUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let parsed = match read_upload(payload).await {
        Ok(parsed) => parsed,
        Err(msg) => {
            warn!(user_id = %user.user_id, error = %msg, "Rejected multipart upload");
            return ApiResponse::bad_request("VALIDATION_ERROR", &msg);
        }
    };

    let Some(bytes) = parsed.bytes else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "file field is required");
    };

    let input = UploadFileInput {
        bytes,
        original_name: parsed.file_name,
        content_type: parsed.content_type,
        uploaded_by: user.user_id,
        is_public: parsed.is_public,
        tags: parsed.tags,
    };

    match data.storage.upload_file.execute(input).await {
        Ok(file) => {
            info!(
                user_id = %user.user_id,
                file_id = %file.id,
                size = file.file_size,
                "File uploaded"
            );
            ApiResponse::created(FileResponse::from(file))
        }
        Err(e) => storage_error_response("upload file", e),
    }
}

/// Direct or presigned URL for a file
#[utoipa::path(
    get,
    path = "/api/files/{id}/url",
    tag = "files",
    params(("id" = Uuid, Path, description = "File id")),
    responses(
        (status = 200, description = "URL", body = FileUrlResponse),
        (status = 404, description = "Unknown or deleted file", body = ErrorResponse),
        (status = 503, description = "No active storage config", body = ErrorResponse),
    )
)]
#[get("/api/files/{id}/url")]
pub async fn get_file_url_handler(path: web::Path<Uuid>, data: web::Data<AppState>) -> impl Responder {
    match data.storage.file_url.execute(path.into_inner()).await {
        Ok(url) => ApiResponse::success(FileUrlResponse { url }),
        Err(e) => storage_error_response("file url", e),
    }
}

/// Delete a file; uploader or admin only
#[utoipa::path(
    delete,
    path = "/api/files/{id}",
    tag = "files",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "File id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Not the uploader", body = ErrorResponse),
        (status = 404, description = "Unknown or deleted file", body = ErrorResponse),
        (status = 503, description = "No active storage config", body = ErrorResponse),
    )
)]
#[delete("/api/files/{id}")]
pub async fn delete_file_handler(
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let file_id = path.into_inner();
    let is_admin = user.principal().is_admin();

    match data
        .storage
        .delete_file
        .execute(user.user_id, is_admin, file_id)
        .await
    {
        Ok(()) => {
            info!(user_id = %user.user_id, file_id = %file_id, "File deleted");
            ApiResponse::success(MessageResponse::new("File deleted"))
        }
        Err(e) => storage_error_response("delete file", e),
    }
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FileListParams {
    pub page: Option<u64>,
    pub page_size: Option<u64>,
    /// Uploader filter
    pub user_id: Option<Uuid>,
    /// Prefix match, e.g. `image/`
    pub content_type: Option<String>,
    pub is_public: Option<bool>,
}

/// List live files, newest first, with URLs when storage is available
#[utoipa::path(
    get,
    path = "/api/files",
    tag = "files",
    params(FileListParams),
    responses(
        (status = 200, description = "Paginated files", body = PageEnvelope<FileResponse>),
    )
)]
#[get("/api/files")]
pub async fn list_files_handler(
    query: web::Query<FileListParams>,
    data: web::Data<AppState>,
) -> impl Responder {
    let q = query.into_inner();
    let request = FileListRequest {
        uploaded_by: q.user_id,
        content_type: q.content_type,
        is_public: q.is_public,
        page: q.page,
        page_size: q.page_size,
    };

    match data.storage.list_files.execute(request).await {
        Ok(page) => ApiResponse::paginated(
            page.items.into_iter().map(FileResponse::from).collect(),
            page.total,
            page.page,
            page.page_size,
        ),
        Err(e) => storage_error_response("list files", e),
    }
}
