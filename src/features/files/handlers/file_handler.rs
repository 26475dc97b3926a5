use axum::{
    extract::{multipart::Field, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppQuery;
use crate::features::files::dtos::{
    DeleteFileResponseDto, ListFilesQuery, MedicalFileResponseDto, UploadMedicalFileDto,
    MAX_FILE_SIZE,
};
use crate::features::files::services::{FileService, NewMedicalFile};
use crate::shared::file_name::base_name;
use crate::shared::types::ApiResponse;

fn too_large() -> AppError {
    AppError::BadRequest(format!(
        "File too large. Maximum size is {} bytes ({} MB)",
        MAX_FILE_SIZE,
        MAX_FILE_SIZE / 1024 / 1024
    ))
}

/// Read a file field chunk by chunk, giving up as soon as it exceeds `MAX_FILE_SIZE`
async fn read_limited(mut field: Field<'_>) -> Result<Vec<u8>> {
    let mut data = Vec::new();

    while let Some(chunk) = field.chunk().await.map_err(|e| {
        debug!("Failed to read file chunk: {}", e);
        AppError::BadRequest(format!("Failed to read file data: {}", e))
    })? {
        if data.len() + chunk.len() > MAX_FILE_SIZE {
            return Err(too_large());
        }
        data.extend_from_slice(&chunk);
    }

    Ok(data)
}

async fn read_text(field: Field<'_>, name: &str) -> Result<String> {
    field
        .text()
        .await
        .map(|text| text.trim().to_string())
        .map_err(|e| AppError::BadRequest(format!("Failed to read {} field: {}", name, e)))
}

/// Upload a medical file
///
/// Accepts multipart/form-data with:
/// - `patient_id`: Patient identifier (required)
/// - `patient_name`: Patient display name (required)
/// - `file`: The file to upload (required, max 10 MiB)
#[utoipa::path(
    post,
    path = "/api/v1/files/upload",
    tag = "files",
    request_body(
        content = UploadMedicalFileDto,
        content_type = "multipart/form-data",
        description = "Medical file upload form",
    ),
    responses(
        (status = 201, description = "File uploaded successfully", body = ApiResponse<MedicalFileResponseDto>),
        (status = 400, description = "Missing field, disallowed type or file too large"),
        (status = 500, description = "Storage unavailable or upload failed")
    )
)]
pub async fn upload_file(
    State(service): State<Arc<FileService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MedicalFileResponseDto>>)> {
    let mut patient_id: Option<String> = None;
    let mut patient_name: Option<String> = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|s| base_name(s).to_string())
                    .unwrap_or_default();
                let data = read_limited(field).await?;
                file = Some((file_name, data));
            }
            "patient_id" => patient_id = Some(read_text(field, "patient_id").await?),
            "patient_name" => patient_name = Some(read_text(field, "patient_name").await?),
            _ => {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("File is required".to_string()))?;
    if file_name.is_empty() {
        return Err(AppError::BadRequest("Filename is required".to_string()));
    }

    let response = service
        .upload(NewMedicalFile {
            patient_id: patient_id.unwrap_or_default(),
            patient_name: patient_name.unwrap_or_default(),
            file_name,
            data,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(response),
            Some("File uploaded successfully".to_string()),
            None,
        )),
    ))
}

/// List medical files
///
/// Each entry carries a temporary `access_url` valid for one hour when
/// object storage is available.
#[utoipa::path(
    get,
    path = "/api/v1/files",
    tag = "files",
    params(ListFilesQuery),
    responses(
        (status = 200, description = "List of medical files", body = ApiResponse<Vec<MedicalFileResponseDto>>),
        (status = 400, description = "Invalid query parameters")
    )
)]
pub async fn list_files(
    State(service): State<Arc<FileService>>,
    AppQuery(query): AppQuery<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<MedicalFileResponseDto>>>> {
    let files = service.list(&query).await?;
    Ok(Json(ApiResponse::list(files)))
}

/// Delete a medical file
#[utoipa::path(
    delete,
    path = "/api/v1/files/{file_id}",
    tag = "files",
    params(
        ("file_id" = String, Path, description = "Medical file id")
    ),
    responses(
        (status = 200, description = "File deleted successfully", body = ApiResponse<DeleteFileResponseDto>),
        (status = 404, description = "File not found")
    )
)]
pub async fn delete_file(
    State(service): State<Arc<FileService>>,
    Path(file_id): Path<String>,
) -> Result<Json<ApiResponse<DeleteFileResponseDto>>> {
    let file_id = Uuid::parse_str(&file_id)
        .map_err(|_| AppError::NotFound("File not found".to_string()))?;

    service.delete(file_id).await?;

    Ok(Json(ApiResponse::success(
        Some(DeleteFileResponseDto {
            file_id,
            deleted: true,
        }),
        Some("File deleted successfully".to_string()),
        None,
    )))
}
