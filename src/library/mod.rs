//! Media library: where compressed outputs are persisted
//!
//! The library groups assets into named collections (one per media kind by default).

mod directory;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::media::MediaKind;

pub use directory::DirectoryLibrary;

/// An item persisted into the library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: uuid::Uuid,
    /// Location of the stored copy
    pub path: PathBuf,
    pub collection: String,
    pub created_at: DateTime<Utc>,
}

/// Collection names per media kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collections {
    pub images: String,
    pub videos: String,
    pub audio: String,
}

impl Collections {
    pub fn for_kind(&self, kind: MediaKind) -> &str {
        match kind {
            MediaKind::Image => &self.images,
            MediaKind::Video => &self.videos,
            MediaKind::Audio => &self.audio,
        }
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self {
            images: "Images".to_string(),
            videos: "Videos".to_string(),
            audio: "Audio".to_string(),
        }
    }
}

#[async_trait::async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Make sure the library can be written to
    async fn request_access(&self) -> Result<()>;

    /// Persist a file into a collection and return the stored asset
    async fn create_asset(&self, source: &Path, collection: &str) -> Result<Asset>;
}
