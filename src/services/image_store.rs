//! # Image Store
//!
//! Persists uploaded vendor images to a directory on disk. Files are
//! renamed to a UUID on write so two uploads can never collide, and the
//! client-supplied name contributes nothing but its extension.
//!
//! The store hands back the generated filename plus a public URL built
//! from the configured base. Vendor records store only the filename;
//! the base is prepended again whenever a vendor is rendered outward.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ImageStoreError {
    #[error("No image data in request body.")]
    EmptyBody,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored image: the on-disk name and the URL clients fetch it from.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub filename: String,
    pub url: String,
}

pub struct ImageStore {
    dir: PathBuf,
    base_url: String,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            base_url: base_url.into(),
        }
    }

    /// Creates the image directory if it does not exist yet. Called once
    /// at startup so individual uploads never race on directory creation.
    pub async fn ensure_dir(&self) -> Result<(), ImageStoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Writes image bytes to disk under a fresh UUID-based name.
    ///
    /// `original_name` is only consulted for its extension; the rest of
    /// it is discarded, so path components smuggled into the name can
    /// never escape the image directory.
    pub async fn save(
        &self,
        bytes: &[u8],
        original_name: Option<&str>,
    ) -> Result<StoredImage, ImageStoreError> {
        if bytes.is_empty() {
            return Err(ImageStoreError::EmptyBody);
        }

        let filename = match original_name.and_then(extension_of) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        let path = self.dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(filename = %filename, size = bytes.len(), "Image stored");
        Ok(StoredImage {
            url: format!("{}{}", self.base_url, filename),
            filename,
        })
    }
}

/// Pulls a safe extension out of a client-supplied filename. Rejects
/// anything that is not short plain alphanumerics.
fn extension_of(name: &str) -> Option<&str> {
    let ext = Path::new(name).extension()?.to_str()?;
    if !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_extracted_from_plain_names() {
        assert_eq!(extension_of("logo.png"), Some("png"));
        assert_eq!(extension_of("photo.JPEG"), Some("JPEG"));
    }

    #[test]
    fn hostile_names_yield_no_extension() {
        assert_eq!(extension_of("noextension"), None);
        assert_eq!(extension_of("weird.p/ng"), None);
        assert_eq!(extension_of("x.waytoolongext"), None);
    }

    #[actix_rt::test]
    async fn save_renames_to_uuid_and_builds_url() {
        let dir = std::env::temp_dir().join(format!("img-store-{}", Uuid::new_v4()));
        let store = ImageStore::new(&dir, "/images/");
        store.ensure_dir().await.unwrap();

        let stored = store.save(b"fakepng", Some("logo.png")).await.unwrap();
        assert!(stored.filename.ends_with(".png"));
        assert_ne!(stored.filename, "logo.png");
        assert_eq!(stored.url, format!("/images/{}", stored.filename));
        assert!(dir.join(&stored.filename).exists());

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[actix_rt::test]
    async fn empty_body_is_rejected() {
        let store = ImageStore::new("/tmp", "/images/");
        let err = store.save(b"", Some("logo.png")).await.unwrap_err();
        assert!(matches!(err, ImageStoreError::EmptyBody));
    }
}
