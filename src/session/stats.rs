use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::compression::CompressionMethod;
use crate::library::Asset;
use crate::media::MediaSelection;

/// An audio entry in the session's recording list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recording {
    pub path: PathBuf,

    /// Display name shown in listings
    pub name: String,

    /// Duration in seconds, if the file could be probed
    pub duration_secs: Option<f64>,

    pub added_at: DateTime<Utc>,
}

/// What a single tool run achieved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionReport {
    /// Rendered tool command
    pub command: String,
    /// Where the result lives: the library asset for saved media, the cache
    /// file for audio recordings
    pub output: PathBuf,
    pub input_bytes: u64,
    pub output_bytes: u64,
    /// output_bytes / input_bytes (0.0 for empty inputs)
    pub ratio: f64,
    pub elapsed_ms: u64,
}

impl CompressionReport {
    pub fn ratio_of(input_bytes: u64, output_bytes: u64) -> f64 {
        if input_bytes == 0 {
            0.0
        } else {
            output_bytes as f64 / input_bytes as f64
        }
    }
}

/// Result of `CompressionSession::compress_now`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CompressionOutcome {
    /// Image or video output persisted into the library
    Saved {
        asset: Asset,
        report: CompressionReport,
    },
    /// Audio outputs appended to the recording list
    Recordings {
        recordings: Vec<Recording>,
        reports: Vec<CompressionReport>,
    },
}

/// Snapshot of a session's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStatus {
    pub selection: Option<MediaSelection>,
    pub method: Option<CompressionMethod>,
    pub is_compressing: bool,
    pub recordings_count: usize,
    /// Methods on offer for the current selection
    pub menu: Vec<CompressionMethod>,
}
