//! Filesystem-backed store for uploaded recipe images. Files live flat in
//! one uploads directory and are referenced from recipes by URL string
//! only — nothing enforces referential integrity, a dangling URL is fine.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

/// Upload ceiling, matching the client's expectations.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("{0}")]
    Validation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Public URL prefix under which the uploads directory is served.
    pub const URL_PREFIX: &'static str = "/media/uploads";

    /// Opens the store, creating the uploads directory if absent.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(MediaStore { root })
    }

    /// Validates and persists an uploaded image, returning a relative URL
    /// usable verbatim as an `<img>` source.
    pub async fn save(
        &self,
        data: &[u8],
        original_name: Option<&str>,
        content_type: Option<&str>,
    ) -> Result<String, MediaError> {
        match content_type {
            Some(ct) if ct.starts_with("image/") => {}
            _ => {
                return Err(MediaError::Validation(
                    "Seules les images sont acceptées!".to_string(),
                ))
            }
        }

        if data.len() > MAX_IMAGE_BYTES {
            return Err(MediaError::Validation(
                "L'image est trop volumineuse (maximum 5 Mo)".to_string(),
            ));
        }

        // The declared content type is client-supplied; the magic bytes are
        // the authority on what the file actually is.
        let format = image::guess_format(data).map_err(|_| {
            MediaError::Validation("Format d'image non reconnu".to_string())
        })?;

        let extension = original_name
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.len() <= 5 && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(str::to_ascii_lowercase)
            .or_else(|| format.extensions_str().first().map(|s| s.to_string()))
            .unwrap_or_else(|| "bin".to_string());

        let filename = format!(
            "recipe-{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4().simple(),
            extension
        );

        tokio::fs::write(self.root.join(&filename), data).await?;

        Ok(format!("{}/{}", Self::URL_PREFIX, filename))
    }

    /// Removes the file an image URL points at. Errors are surfaced;
    /// recipe flows that only want best-effort cleanup log and move on.
    pub async fn delete(&self, image_url: &str) -> Result<(), MediaError> {
        tokio::fs::remove_file(self.path_for(image_url)?).await?;
        Ok(())
    }

    /// Resolves a URL to a path inside the uploads directory. Only the
    /// final path component is honored, so a URL cannot escape the root.
    fn path_for(&self, image_url: &str) -> Result<PathBuf, MediaError> {
        let filename = image_url
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && *name != "." && *name != "..")
            .ok_or_else(|| MediaError::Validation("URL d'image requise".to_string()))?;

        Ok(self.root.join(filename))
    }
}
