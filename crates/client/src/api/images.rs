use mythos_core::image::{image_file_path, Image, ImageUpload, UpdateImage};
use mythos_core::pagination::Page;
use mythos_core::types::DbId;
use reqwest::multipart::{Form, Part};

use crate::client::ApiClient;
use crate::error::ClientError;

/// A file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub filename: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageFile {
    pub fn new(filename: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// `/images` endpoints.
#[derive(Clone, Copy)]
pub struct ImagesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ImagesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Upload one image into a project as multipart `file`, `project_id`
    /// and optional `alt_text`.
    pub async fn upload(
        self,
        file: ImageFile,
        project_id: DbId,
        alt_text: Option<&str>,
    ) -> Result<ImageUpload, ClientError> {
        let part = Part::bytes(file.data)
            .file_name(file.filename)
            .mime_str(&file.mime_type)
            .map_err(|e| {
                ClientError::InvalidRequest(format!("invalid MIME type '{}': {e}", file.mime_type))
            })?;
        let mut form = Form::new()
            .part("file", part)
            .text("project_id", project_id.to_string());
        if let Some(alt) = alt_text {
            form = form.text("alt_text", alt.to_string());
        }
        self.client.post_multipart("/images/upload", form).await
    }

    pub async fn get(self, id: DbId) -> Result<Image, ClientError> {
        self.client.get(&format!("/images/{id}")).await
    }

    pub async fn list_by_project(
        self,
        project_id: DbId,
        page: &Page,
    ) -> Result<Vec<Image>, ClientError> {
        self.client
            .get_with_query(&format!("/images/project/{project_id}"), page)
            .await
    }

    pub async fn update(self, id: DbId, input: &UpdateImage) -> Result<Image, ClientError> {
        self.client.put(&format!("/images/{id}"), input).await
    }

    pub async fn delete(self, id: DbId) -> Result<(), ClientError> {
        self.client.delete(&format!("/images/{id}")).await
    }

    /// Absolute URL serving the image bytes.
    pub fn file_url(self, id: DbId) -> String {
        self.client.url(&image_file_path(id))
    }
}
