use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, info};

use super::{MediaTool, ToolOutput};

/// Lines of stderr kept in error messages
const STDERR_TAIL_LINES: usize = 8;

pub struct FfmpegTool {
    binary: PathBuf,
}

impl FfmpegTool {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }
}

fn stderr_tail(stderr: &str) -> String {
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}

#[async_trait::async_trait]
impl MediaTool for FfmpegTool {
    async fn execute(&self, args: &[OsString]) -> Result<ToolOutput> {
        info!("Running {} with {} arguments", self.binary.display(), args.len());
        debug!("{} {:?}", self.binary.display(), args);

        let started = Instant::now();
        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;
        let elapsed = started.elapsed();

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}:\n{}",
                self.binary.display(),
                output.status,
                stderr_tail(&stderr)
            );
        }

        info!(
            "{} finished in {:.2}s",
            self.binary.display(),
            elapsed.as_secs_f64()
        );

        Ok(ToolOutput { stderr, elapsed })
    }

    async fn version(&self) -> Result<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", self.binary.display()))?;

        if !output.status.success() {
            anyhow::bail!("{} -version exited with {}", self.binary.display(), output.status);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn name(&self) -> &str {
        "ffmpeg"
    }
}
