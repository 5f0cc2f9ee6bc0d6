//! Local filesystem storage for uploaded images.
//!
//! Files are written under a root directory with uuid-based names; the
//! database row keeps the original filename and the stored path.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use mythos_core::image::extension_for_mime;

/// A file written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated name, e.g. `4f1c...e2.png`.
    pub filename: String,
    /// Full path the bytes were written to.
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ImageStorage {
    root: PathBuf,
}

impl ImageStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `data` under a fresh uuid name with the extension for `mime_type`.
    pub async fn save(&self, data: &[u8], mime_type: &str) -> std::io::Result<StoredFile> {
        tokio::fs::create_dir_all(&self.root).await?;
        let filename = format!("{}{}", uuid::Uuid::new_v4(), extension_for_mime(mime_type));
        let path = self.root.join(&filename);
        tokio::fs::write(&path, data).await?;
        tracing::debug!(path = %path.display(), bytes = data.len(), "Stored image file");
        Ok(StoredFile { filename, path })
    }

    pub async fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }

    /// Remove a stored file. A file that is already gone is not an error.
    pub async fn remove(&self, path: &Path) -> std::io::Result<()> {
        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Width and height read from the image header, or `None` if the bytes
/// cannot be identified.
pub fn image_dimensions(data: &[u8]) -> Option<(i32, i32)> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    let (width, height) = reader.into_dimensions().ok()?;
    Some((i32::try_from(width).ok()?, i32::try_from(height).ok()?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::new(width, height);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn reads_dimensions_from_header() {
        assert_eq!(image_dimensions(&png_bytes(12, 7)), Some((12, 7)));
    }

    #[test]
    fn unknown_bytes_have_no_dimensions() {
        assert_eq!(image_dimensions(b"definitely not an image"), None);
    }

    #[tokio::test]
    async fn save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = ImageStorage::new(dir.path().join("images"));

        let stored = storage.save(b"bytes", "image/png").await.unwrap();
        assert!(stored.filename.ends_with(".png"));
        assert_eq!(storage.read(&stored.path).await.unwrap(), b"bytes");

        storage.remove(&stored.path).await.unwrap();
        assert!(storage.read(&stored.path).await.is_err());
        // Removing twice is fine.
        storage.remove(&stored.path).await.unwrap();
    }
}
