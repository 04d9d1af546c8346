//! Local gallery cache keyed by remote revision
//!
//! Stores the last photo list together with the revision identifier it was
//! built from. An unreadable cache is treated as a miss.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::photo::Photo;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedGallery {
    pub revision: String,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone)]
pub struct GalleryCache {
    path: PathBuf,
}

impl GalleryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached gallery, or `None` when absent or unreadable
    pub fn load(&self) -> Option<CachedGallery> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Error reading gallery cache");
                return None;
            }
        };

        match serde_json::from_str::<CachedGallery>(&content) {
            Ok(cached) if !cached.revision.is_empty() => Some(cached),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Ignoring corrupt gallery cache");
                None
            }
        }
    }

    pub fn store(&self, revision: &str, photos: &[Photo]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let entry = CachedGallery {
            revision: revision.to_string(),
            photos: photos.to_vec(),
        };
        std::fs::write(&self.path, serde_json::to_string(&entry)?)?;
        tracing::debug!(revision, count = photos.len(), "Gallery data cached");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Gallery cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
