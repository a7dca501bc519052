use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compression::MenuVariant;
use crate::library::Collections;

/// Configuration for a compression session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory the tool writes compressed outputs into
    pub cache_dir: PathBuf,

    /// Delete the source file once the tool has produced its output
    /// Default: false
    pub cleanup_source: bool,

    /// Menu family offered to the user
    pub menu: MenuVariant,

    /// Library collection per media kind
    pub collections: Collections,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cache_dir: std::env::temp_dir().join("media-compress"),
            cleanup_source: false,
            menu: MenuVariant::Classic,
            collections: Collections::default(),
        }
    }
}
