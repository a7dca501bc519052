//! Compression session management
//!
//! This module provides the `CompressionSession` abstraction that manages:
//! - The selected media and the chosen compression method
//! - Running the external compressor, one compression at a time
//! - Source cleanup and persisting outputs into the media library
//! - The list of audio recordings

mod config;
mod session;
mod stats;

pub use config::SessionConfig;
pub use session::CompressionSession;
pub use stats::{CompressionOutcome, CompressionReport, Recording, SessionStatus};
