use crate::compression::CompressionMethod;
use crate::media::MediaKind;
use thiserror::Error;

/// Failures surfaced by a compression session
#[derive(Debug, Error)]
pub enum CompressError {
    #[error("No media selected")]
    NoSelection,

    #[error("Compression method not set. Please choose again.")]
    NoMethod,

    #[error("{method} is not offered for {kind} files")]
    MethodNotOffered {
        kind: MediaKind,
        method: CompressionMethod,
    },

    #[error("A compression is already in progress")]
    AlreadyCompressing,

    #[error("{0}")]
    Pick(String),

    /// A request that could not be decoded (bad JSON body, bad path segment)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Recording #{0} not found")]
    RecordingNotFound(usize),

    #[error("Error during compression: {0}")]
    Tool(String),

    #[error("Error saving media to library: {0}")]
    Library(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompressError {
    /// Wrap an anyhow error from the external tool, keeping its context chain
    pub fn tool(err: anyhow::Error) -> Self {
        Self::Tool(format!("{:#}", err))
    }

    pub fn library(err: anyhow::Error) -> Self {
        Self::Library(format!("{:#}", err))
    }
}
