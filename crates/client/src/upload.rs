//! Best-effort image uploads.

use mythos_core::image::ImageUpload;
use mythos_core::types::DbId;

use crate::api::ImageFile;
use crate::error::ClientError;
use crate::queries::Queries;

/// One file that could not be uploaded.
#[derive(Debug)]
pub struct UploadFailure {
    pub filename: String,
    pub error: ClientError,
}

/// Every file in a batch failed to upload.
#[derive(Debug, thiserror::Error)]
#[error("All uploads failed")]
pub struct AllUploadsFailed {
    pub failures: Vec<UploadFailure>,
}

/// Upload a single image into a project.
pub async fn upload_image(
    queries: &Queries,
    file: ImageFile,
    project_id: DbId,
    alt_text: Option<&str>,
) -> Result<ImageUpload, ClientError> {
    let filename = file.filename.clone();
    let uploaded = queries.upload_image(file, project_id, alt_text).await?;
    tracing::info!(image_id = uploaded.id, project_id, filename = %filename, "Uploaded image");
    Ok(uploaded)
}

/// Upload each file in turn. `alt_texts[i]` applies to `files[i]`.
///
/// Returns the uploads that succeeded; failures are logged. Fails only if
/// no file could be uploaded. An empty batch yields an empty list.
pub async fn upload_many(
    queries: &Queries,
    files: Vec<ImageFile>,
    project_id: DbId,
    alt_texts: &[Option<String>],
) -> Result<Vec<ImageUpload>, AllUploadsFailed> {
    let total = files.len();
    let mut uploaded = Vec::with_capacity(total);
    let mut failures = Vec::new();

    for (index, file) in files.into_iter().enumerate() {
        let filename = file.filename.clone();
        let alt = alt_texts.get(index).and_then(|a| a.as_deref());
        match upload_image(queries, file, project_id, alt).await {
            Ok(upload) => uploaded.push(upload),
            Err(error) => {
                tracing::warn!(filename = %filename, error = %error, "Failed to upload image");
                failures.push(UploadFailure { filename, error });
            }
        }
    }

    if total > 0 && uploaded.is_empty() {
        return Err(AllUploadsFailed { failures });
    }
    if !failures.is_empty() {
        tracing::warn!(failed = failures.len(), total, "Some uploads failed");
    }
    Ok(uploaded)
}
