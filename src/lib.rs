pub mod compression;
pub mod config;
pub mod error;
pub mod http;
pub mod library;
pub mod media;
pub mod session;
pub mod tool;

pub use compression::{CompressionCommand, CompressionMethod, MenuVariant};
pub use config::Config;
pub use error::CompressError;
pub use http::{create_router, AppState};
pub use library::{Asset, Collections, DirectoryLibrary, MediaLibrary};
pub use media::{pick_media, probe_audio, AudioInfo, MediaKind, MediaSelection};
pub use session::{
    CompressionOutcome, CompressionReport, CompressionSession, Recording, SessionConfig,
    SessionStatus,
};
pub use tool::{FfmpegTool, MediaTool, ToolOutput};
