// Shared helpers for integration tests: fake compressors and fixtures
#![allow(dead_code)]

use anyhow::Result;
use media_compress::{
    CompressionSession, DirectoryLibrary, MediaTool, SessionConfig, ToolOutput,
};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::sync::Notify;

/// Writes a fixed payload to the output path (the last argument)
pub struct FakeTool {
    payload: Vec<u8>,
    gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    pub last_args: Mutex<Vec<OsString>>,
}

impl FakeTool {
    pub fn new(payload: &[u8]) -> Self {
        Self {
            payload: payload.to_vec(),
            gate: None,
            calls: AtomicUsize::new(0),
            last_args: Mutex::new(Vec::new()),
        }
    }

    /// Block each run until the gate is notified
    pub fn gated(payload: &[u8], gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::new(payload)
        }
    }
}

#[async_trait::async_trait]
impl MediaTool for FakeTool {
    async fn execute(&self, args: &[OsString]) -> Result<ToolOutput> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_args.lock().unwrap() = args.to_vec();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        let output = args.last().expect("output path");
        tokio::fs::write(output, &self.payload).await?;

        Ok(ToolOutput {
            stderr: String::new(),
            elapsed: Duration::from_millis(5),
        })
    }

    async fn version(&self) -> Result<String> {
        Ok("fake version 1.0".to_string())
    }

    fn name(&self) -> &str {
        "fake"
    }
}

/// Exits with an error, like ffmpeg rejecting its input
pub struct FailingTool;

#[async_trait::async_trait]
impl MediaTool for FailingTool {
    async fn execute(&self, _args: &[OsString]) -> Result<ToolOutput> {
        anyhow::bail!("fake exited with exit status: 1:\nInvalid data found when processing input")
    }

    async fn version(&self) -> Result<String> {
        anyhow::bail!("not installed")
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Writes part of the output, then fails like an interrupted encode
pub struct PartialTool;

#[async_trait::async_trait]
impl MediaTool for PartialTool {
    async fn execute(&self, args: &[OsString]) -> Result<ToolOutput> {
        let output = args.last().expect("output path");
        tokio::fs::write(output, b"truncated").await?;
        anyhow::bail!("partial exited with exit status: 1:\nConversion failed!")
    }

    async fn version(&self) -> Result<String> {
        Ok("partial".to_string())
    }

    fn name(&self) -> &str {
        "partial"
    }
}

/// Succeeds without writing anything
pub struct SilentTool;

#[async_trait::async_trait]
impl MediaTool for SilentTool {
    async fn execute(&self, _args: &[OsString]) -> Result<ToolOutput> {
        Ok(ToolOutput {
            stderr: String::new(),
            elapsed: Duration::ZERO,
        })
    }

    async fn version(&self) -> Result<String> {
        Ok("silent".to_string())
    }

    fn name(&self) -> &str {
        "silent"
    }
}

/// Temporary source/cache/library layout for one test
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        std::fs::create_dir_all(dir.path().join("sources"))?;
        Ok(Self { dir })
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }

    pub fn library_dir(&self) -> PathBuf {
        self.dir.path().join("library")
    }

    /// Create a source file with the given contents
    pub fn source(&self, name: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.dir.path().join("sources").join(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }

    /// Files currently left in the cache directory
    pub fn cache_entries(&self) -> Result<Vec<PathBuf>> {
        if !self.cache_dir().exists() {
            return Ok(Vec::new());
        }
        let mut entries = std::fs::read_dir(self.cache_dir())?
            .map(|e| e.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        entries.sort();
        Ok(entries)
    }

    pub fn config(&self) -> SessionConfig {
        SessionConfig {
            cache_dir: self.cache_dir(),
            ..SessionConfig::default()
        }
    }

    pub fn session(&self, tool: Arc<dyn MediaTool>) -> CompressionSession {
        self.session_with(self.config(), tool)
    }

    pub fn session_with(&self, config: SessionConfig, tool: Arc<dyn MediaTool>) -> CompressionSession {
        CompressionSession::new(
            config,
            tool,
            Arc::new(DirectoryLibrary::new(self.library_dir())),
        )
    }
}

/// Collects formatted log output while its subscriber guard is alive
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Route this thread's tracing output into a buffer
    pub fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::DEBUG)
            .finish();

        (capture, tracing::subscriber::set_default(subscriber))
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Write a 16-bit mono WAV file
pub fn write_wav(path: &Path, seconds: f32, sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    let sample_count = (seconds * sample_rate as f32) as usize;
    for i in 0..sample_count {
        writer.write_sample(((i % 100) as i16) * 100)?;
    }
    writer.finalize()?;

    Ok(())
}
