pub mod ffmpeg;

use anyhow::Result;
use std::ffi::OsString;
use std::time::Duration;

pub use ffmpeg::FfmpegTool;

/// Result of one successful tool invocation
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Captured diagnostic output (ffmpeg logs to stderr)
    pub stderr: String,
    /// Wall-clock time spent in the tool
    pub elapsed: Duration,
}

/// External media-processing executable
///
/// Implementations:
/// - `FfmpegTool`: spawns the configured ffmpeg binary
/// - tests substitute fakes that write the output path themselves
#[async_trait::async_trait]
pub trait MediaTool: Send + Sync {
    /// Run the tool with the given arguments and wait for it to exit
    ///
    /// A non-zero exit status is an error.
    async fn execute(&self, args: &[OsString]) -> Result<ToolOutput>;

    /// Version banner, used to check the tool is installed
    async fn version(&self) -> Result<String>;

    /// Tool name for logging
    fn name(&self) -> &str;
}
