//! Handlers for the `/images` resource.

use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use mythos_core::image::{
    mime_for_filename, validate_upload, Image, ImageUpload, UpdateImage,
};
use mythos_core::pagination::Page;
use mythos_core::types::DbId;
use mythos_db::models::image::NewImage;
use mythos_db::repositories::{ImageRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::storage::image_dimensions;

/// Parts of an upload form after reading every field.
struct UploadForm {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
    project_id: DbId,
    alt_text: Option<String>,
}

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut file: Option<(String, Option<String>, Vec<u8>)> = None;
    let mut project_id: Option<DbId> = None;
    let mut alt_text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some((filename, content_type, data.to_vec()));
            }
            "project_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let id = text
                    .trim()
                    .parse()
                    .map_err(|_| AppError::BadRequest(format!("Invalid project_id '{text}'")))?;
                project_id = Some(id);
            }
            "alt_text" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                if !text.trim().is_empty() {
                    alt_text = Some(text);
                }
            }
            _ => {}
        }
    }

    let (filename, content_type, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    let project_id = project_id
        .ok_or_else(|| AppError::BadRequest("Missing required 'project_id' field".into()))?;
    Ok(UploadForm {
        filename,
        content_type,
        data,
        project_id,
        alt_text,
    })
}

/// POST /api/v1/images/upload
///
/// Multipart form with `file`, `project_id` and optional `alt_text`.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImageUpload>)> {
    let form = read_upload_form(multipart).await?;

    // Trust the part's content type when it is specific, else the extension.
    let mime_type = match form.content_type.as_deref() {
        Some(ct) if ct != "application/octet-stream" => ct.to_string(),
        _ => mime_for_filename(&form.filename)
            .unwrap_or("application/octet-stream")
            .to_string(),
    };
    validate_upload(&mime_type, form.data.len() as u64, state.config.max_image_size_mb)?;

    ProjectRepo::find_by_id(&state.pool, form.project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project", form.project_id))?;

    let dimensions = image_dimensions(&form.data);
    let stored = state
        .storage
        .save(&form.data, &mime_type)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store image: {e}")))?;

    let input = NewImage {
        filename: stored.filename,
        original_filename: form.filename,
        alt_text: form.alt_text,
        file_path: stored.path.to_string_lossy().to_string(),
        file_size: form.data.len() as i64,
        mime_type,
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
        project_id: form.project_id,
    };
    let image: Image = match ImageRepo::create(&state.pool, &input).await {
        Ok(row) => row.into(),
        Err(e) => {
            // Keep storage in step with the table.
            let _ = state.storage.remove(&stored.path).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        image_id = image.id,
        project_id = image.project_id,
        bytes = image.file_size,
        "Image uploaded"
    );
    Ok((StatusCode::CREATED, Json(ImageUpload::from_image(&image))))
}

/// GET /api/v1/images/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Image>> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Image", id))?;
    Ok(Json(image.into()))
}

/// GET /api/v1/images/project/{project_id}
pub async fn list_by_project(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Query(page): Query<Page>,
) -> AppResult<Json<Vec<Image>>> {
    let (limit, offset) = page.clamped();
    let images = ImageRepo::list_by_project(&state.pool, project_id, limit, offset).await?;
    Ok(Json(images.into_iter().map(Image::from).collect()))
}

/// PUT /api/v1/images/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateImage>,
) -> AppResult<Json<Image>> {
    let image = ImageRepo::update_alt_text(&state.pool, id, input.alt_text.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("Image", id))?;
    Ok(Json(image.into()))
}

/// DELETE /api/v1/images/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let image = ImageRepo::delete(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Image", id))?;
    if let Err(e) = state.storage.remove(FsPath::new(&image.file_path)).await {
        tracing::warn!(image_id = id, error = %e, "Failed to remove image file");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/images/{id}/file
pub async fn file(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<Response> {
    let image = ImageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Image", id))?;
    let data = state
        .storage
        .read(FsPath::new(&image.file_path))
        .await
        .map_err(|e| {
            tracing::warn!(image_id = id, error = %e, "Image file missing from storage");
            AppError::not_found("Image file", id)
        })?;
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, image.mime_type)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}
