use std::io::ErrorKind;
use std::path::PathBuf;

use anyhow::Context as _;
use uuid::Uuid;

use crate::domain::image::ImagePayload;
use crate::domain::repository::ImageStore;
use crate::error::RecipesServiceError;

/// Writes images under a local media directory served at `base_url`.
#[derive(Clone)]
pub struct FsImageStore {
    pub root: PathBuf,
    pub base_url: String,
}

impl FsImageStore {
    /// Map a URL issued by `save` back to its file. `None` for anything outside `base_url`.
    fn path_of(&self, url: &str) -> Option<PathBuf> {
        let relative = url
            .strip_prefix(self.base_url.trim_end_matches('/'))?
            .strip_prefix('/')?;
        let mut path = self.root.clone();
        for part in relative.split('/') {
            if part.is_empty() || part == "." || part == ".." {
                return None;
            }
            path.push(part);
        }
        Some(path)
    }
}

impl ImageStore for FsImageStore {
    async fn save(&self, folder: &str, image: &ImagePayload) -> Result<String, RecipesServiceError> {
        let dir = self.root.join(folder);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create media directory {}", dir.display()))?;

        let file_name = format!("{}.{}", Uuid::now_v7(), image.extension);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, &image.bytes)
            .await
            .with_context(|| format!("write image {}", path.display()))?;

        tracing::debug!(path = %path.display(), size = image.bytes.len(), "stored image");
        Ok(format!(
            "{}/{folder}/{file_name}",
            self.base_url.trim_end_matches('/')
        ))
    }

    async fn delete(&self, url: &str) -> Result<(), RecipesServiceError> {
        let Some(path) = self.path_of(url) else {
            tracing::debug!(%url, "image is not managed by this store");
            return Ok(());
        };
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "removed image");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("remove image {}", path.display()))
                .into()),
        }
    }
}
