//! Local storage for uploaded cover images.

use std::path::{Path, PathBuf};

use folio_core::cover_image;

use crate::error::AppError;

/// Writes cover images into a directory that is served at
/// [`cover_image::PUBLIC_PREFIX`].
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>, max_bytes: usize) -> Self {
        Self {
            dir: dir.into(),
            max_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Validate and store a cover image, returning its public path.
    pub async fn save_cover(&self, bytes: &[u8]) -> Result<String, AppError> {
        let extension = cover_image::validate_upload(bytes, self.max_bytes)?;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let file_name = cover_image::stored_file_name(extension);
        tokio::fs::write(self.dir.join(&file_name), bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write cover image: {e}")))?;

        tracing::info!(file = %file_name, size = bytes.len(), "Cover image stored");
        Ok(cover_image::public_path(&file_name))
    }

    /// Delete a previously stored cover image. Failures are logged only.
    pub async fn remove(&self, public_path: &str) {
        let Some(file_name) = cover_image::file_name_from_public_path(public_path) else {
            tracing::warn!(path = %public_path, "Refusing to remove file outside upload dir");
            return;
        };

        match tokio::fs::remove_file(self.dir.join(file_name)).await {
            Ok(()) => tracing::debug!(file = %file_name, "Cover image removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(file = %file_name, error = %e, "Failed to remove cover image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use folio_core::error::CoreError;

    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR\0\0\0\x01\0\0\0\x01";

    #[tokio::test]
    async fn saves_and_removes_cover_images() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path().join("covers"), 1024);

        let public = store.save_cover(PNG).await.unwrap();
        let name = cover_image::file_name_from_public_path(&public).unwrap();
        let stored = store.dir().join(name);
        assert_eq!(tokio::fs::read(&stored).await.unwrap(), PNG);

        store.remove(&public).await;
        assert!(!stored.exists());

        // Removing twice is harmless.
        store.remove(&public).await;
    }

    #[tokio::test]
    async fn rejects_invalid_uploads_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let store = UploadStore::new(dir.path(), 8);

        assert_matches!(
            store.save_cover(PNG).await,
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == cover_image::FILE_TOO_LARGE_MESSAGE
        );
        assert_matches!(
            store.save_cover(b"text").await,
            Err(AppError::Core(CoreError::Validation(msg)))
                if msg == cover_image::NOT_AN_IMAGE_MESSAGE
        );
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
