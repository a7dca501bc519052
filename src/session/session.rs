use super::config::SessionConfig;
use super::stats::{CompressionOutcome, CompressionReport, Recording, SessionStatus};
use crate::compression::{is_offered, menu, output_path, CompressionCommand, CompressionMethod};
use crate::error::CompressError;
use crate::library::{Asset, MediaLibrary};
use crate::media::{pick_media, probe_audio, MediaKind, MediaSelection};
use crate::tool::MediaTool;
use chrono::Utc;
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

#[derive(Debug, Default)]
struct SelectionState {
    selection: Option<MediaSelection>,
    method: Option<CompressionMethod>,
}

/// Holds the in-flight flag for the duration of one compression
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(flag: &'a AtomicBool) -> Result<Self, CompressError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| CompressError::AlreadyCompressing)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// A compression session: one selected piece of media, the chosen method,
/// and the list of audio recordings produced so far
pub struct CompressionSession {
    /// Session configuration
    config: SessionConfig,

    /// External compressor
    tool: Arc<dyn MediaTool>,

    /// Where image and video outputs are persisted
    library: Arc<dyn MediaLibrary>,

    /// Current selection and chosen method
    state: Mutex<SelectionState>,

    /// Audio recordings, in the order they were added
    recordings: Mutex<Vec<Recording>>,

    /// Whether a compression is currently running
    is_compressing: AtomicBool,
}

impl CompressionSession {
    pub fn new(
        config: SessionConfig,
        tool: Arc<dyn MediaTool>,
        library: Arc<dyn MediaLibrary>,
    ) -> Self {
        info!(
            "Creating compression session (tool: {}, menu: {:?})",
            tool.name(),
            config.menu
        );

        Self {
            config,
            tool,
            library,
            state: Mutex::new(SelectionState::default()),
            recordings: Mutex::new(Vec::new()),
            is_compressing: AtomicBool::new(false),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Replace the current selection. The chosen method is cleared.
    pub async fn select(&self, selection: MediaSelection) {
        info!("Selected {}: {}", selection.kind, selection.path.display());

        let mut state = self.state.lock().await;
        state.selection = Some(selection);
        state.method = None;
    }

    /// Resolve a path into a selection and select it
    pub async fn pick(
        &self,
        path: impl AsRef<Path>,
        expected: Option<MediaKind>,
    ) -> Result<MediaSelection, CompressError> {
        let selection = pick_media(path, expected).await?;
        self.select(selection.clone()).await;
        Ok(selection)
    }

    /// Methods offered for the current selection (empty without one)
    pub async fn menu(&self) -> Vec<CompressionMethod> {
        let state = self.state.lock().await;
        state
            .selection
            .as_ref()
            .map(|s| menu(s.kind, self.config.menu).to_vec())
            .unwrap_or_default()
    }

    pub async fn choose_method(&self, method: CompressionMethod) -> Result<(), CompressError> {
        let mut state = self.state.lock().await;
        let kind = state
            .selection
            .as_ref()
            .map(|s| s.kind)
            .ok_or(CompressError::NoSelection)?;

        if !is_offered(kind, self.config.menu, method) {
            return Err(CompressError::MethodNotOffered { kind, method });
        }

        info!("Compression method for {}: {}", kind, method.label());
        state.method = Some(method);
        Ok(())
    }

    /// Run the chosen method on the current selection.
    ///
    /// Images and videos are saved to the library; audio outputs are appended
    /// to the recording list. Only one compression runs at a time.
    pub async fn compress_now(&self) -> Result<CompressionOutcome, CompressError> {
        let _in_flight = match InFlight::claim(&self.is_compressing) {
            Ok(guard) => guard,
            Err(e) => {
                warn!("Compression requested while one is already running");
                return Err(e);
            }
        };

        let result = self.compress_selection().await;
        if let Err(e) = &result {
            error!("Compression failed: {}", e);
        }

        result
    }

    async fn compress_selection(&self) -> Result<CompressionOutcome, CompressError> {
        let (selection, method) = {
            let state = self.state.lock().await;
            let selection = state.selection.clone().ok_or(CompressError::NoSelection)?;
            let method = state.method.ok_or(CompressError::NoMethod)?;
            (selection, method)
        };

        info!(
            "Compressing {} {} with {}",
            selection.kind,
            selection.path.display(),
            method.label()
        );

        let outcome = match selection.kind {
            MediaKind::Image | MediaKind::Video => self.compress_and_save(&selection, method).await?,
            MediaKind::Audio => {
                self.compress_audio_batch(vec![selection.path.clone()], method)
                    .await?
            }
        };

        if self.config.cleanup_source {
            // The source is gone, so the selection no longer points at anything
            let mut state = self.state.lock().await;
            if state.selection.as_ref() == Some(&selection) {
                *state = SelectionState::default();
            }
        }

        Ok(outcome)
    }

    async fn compress_and_save(
        &self,
        selection: &MediaSelection,
        method: CompressionMethod,
    ) -> Result<CompressionOutcome, CompressError> {
        let mut report = self.run_tool(selection.kind, method, &selection.path).await?;

        let saved = self.save_output(selection, &report.output).await;

        // The library holds its own copy; the cache file is only scratch space
        remove_output(&report.output).await;
        let asset = saved?;
        report.output = asset.path.clone();

        Ok(CompressionOutcome::Saved { asset, report })
    }

    async fn save_output(
        &self,
        selection: &MediaSelection,
        output: &Path,
    ) -> Result<Asset, CompressError> {
        if self.config.cleanup_source {
            remove_source(&selection.path).await?;
        }

        let collection = self.config.collections.for_kind(selection.kind);
        self.persist(output, collection).await
    }

    async fn compress_audio_batch(
        &self,
        inputs: Vec<PathBuf>,
        method: CompressionMethod,
    ) -> Result<CompressionOutcome, CompressError> {
        let jobs = inputs
            .iter()
            .map(|input| self.run_tool(MediaKind::Audio, method, input));
        let mut reports = Vec::with_capacity(inputs.len());
        let mut first_error = None;
        for result in join_all(jobs).await {
            match result {
                Ok(report) => reports.push(report),
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(e) = first_error {
            // A failed batch adds no recordings, so drop the outputs that did succeed
            for report in &reports {
                remove_output(&report.output).await;
            }
            return Err(e);
        }

        let mut produced = Vec::with_capacity(reports.len());
        for (input, report) in inputs.iter().zip(&reports) {
            let stem = input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "audio".to_string());

            produced.push(Recording {
                path: report.output.clone(),
                name: format!("{} ({})", stem, method.label()),
                duration_secs: probe_duration(report.output.clone()).await,
                added_at: Utc::now(),
            });

            if self.config.cleanup_source {
                remove_source(input).await?;
            }
        }

        {
            let mut recordings = self.recordings.lock().await;
            recordings.extend(produced.iter().cloned());
        }

        info!("Added {} compressed recording(s)", produced.len());

        Ok(CompressionOutcome::Recordings {
            recordings: produced,
            reports,
        })
    }

    /// Build the command for one input, run the tool, and measure the result
    async fn run_tool(
        &self,
        kind: MediaKind,
        method: CompressionMethod,
        input: &Path,
    ) -> Result<CompressionReport, CompressError> {
        fs::create_dir_all(&self.config.cache_dir).await?;

        let output = output_path(&self.config.cache_dir, kind, method)?;
        let command = CompressionCommand::build(kind, method, input, &output)?;
        let input_bytes = fs::metadata(input).await?.len();

        info!("{} {}", self.tool.name(), command.display());

        let run = match self.tool.execute(command.args()).await {
            Ok(run) => run,
            Err(e) => {
                remove_output(&output).await;
                return Err(CompressError::tool(e));
            }
        };

        let output_bytes = match fs::metadata(&output).await {
            Ok(meta) => meta.len(),
            Err(_) => {
                return Err(CompressError::Tool(format!(
                    "{} produced no output at {}",
                    self.tool.name(),
                    output.display()
                )))
            }
        };

        let report = CompressionReport {
            command: command.display(),
            output,
            input_bytes,
            output_bytes,
            ratio: CompressionReport::ratio_of(input_bytes, output_bytes),
            elapsed_ms: run.elapsed.as_millis() as u64,
        };

        info!(
            "Compressed {} -> {} bytes ({:.1}%)",
            report.input_bytes,
            report.output_bytes,
            report.ratio * 100.0
        );

        Ok(report)
    }

    async fn persist(&self, path: &Path, collection: &str) -> Result<Asset, CompressError> {
        self.library
            .request_access()
            .await
            .map_err(CompressError::library)?;

        self.library
            .create_asset(path, collection)
            .await
            .map_err(CompressError::library)
    }

    /// Clear the selection, the chosen method, and the recording list
    pub async fn reset(&self) {
        info!("Resetting compression session");

        *self.state.lock().await = SelectionState::default();
        self.recordings.lock().await.clear();
    }

    /// Import an audio file into the recording list
    pub async fn add_recording(
        &self,
        path: impl AsRef<Path>,
        name: Option<String>,
    ) -> Result<Recording, CompressError> {
        let selection = pick_media(path, Some(MediaKind::Audio)).await?;
        let duration_secs = probe_duration(selection.path.clone()).await;

        let mut recordings = self.recordings.lock().await;
        let name = name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| {
                selection
                    .path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| format!("Recording #{}", recordings.len() + 1));

        let recording = Recording {
            path: selection.path,
            name,
            duration_secs,
            added_at: Utc::now(),
        };

        info!("Added recording: {}", recording.name);
        recordings.push(recording.clone());

        Ok(recording)
    }

    pub async fn delete_recording(&self, index: usize) -> Result<Recording, CompressError> {
        let mut recordings = self.recordings.lock().await;
        if index >= recordings.len() {
            return Err(CompressError::RecordingNotFound(index));
        }

        let removed = recordings.remove(index);
        info!("Deleted recording: {}", removed.name);
        Ok(removed)
    }

    pub async fn recordings(&self) -> Vec<Recording> {
        self.recordings.lock().await.clone()
    }

    /// Persist a recording into the audio collection
    pub async fn save_recording(&self, index: usize) -> Result<Asset, CompressError> {
        let recording = {
            let recordings = self.recordings.lock().await;
            recordings
                .get(index)
                .cloned()
                .ok_or(CompressError::RecordingNotFound(index))?
        };

        self.persist(&recording.path, &self.config.collections.audio)
            .await
    }

    pub fn is_compressing(&self) -> bool {
        self.is_compressing.load(Ordering::SeqCst)
    }

    pub async fn status(&self) -> SessionStatus {
        let (selection, method) = {
            let state = self.state.lock().await;
            (state.selection.clone(), state.method)
        };
        let menu = selection
            .as_ref()
            .map(|s| menu(s.kind, self.config.menu).to_vec())
            .unwrap_or_default();

        SessionStatus {
            selection,
            method,
            is_compressing: self.is_compressing(),
            recordings_count: self.recordings.lock().await.len(),
            menu,
        }
    }
}

/// Delete a consumed source file; a source that is already gone is fine
async fn remove_source(path: &Path) -> Result<(), CompressError> {
    match fs::remove_file(path).await {
        Ok(()) => {
            info!("Removed source file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Delete a scratch output from the cache directory, if the tool left one
async fn remove_output(path: &Path) {
    match fs::remove_file(path).await {
        Ok(()) => debug!("Removed cache file {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Could not remove cache file {}: {}", path.display(), e),
    }
}

async fn probe_duration(path: PathBuf) -> Option<f64> {
    match tokio::task::spawn_blocking(move || probe_audio(&path)).await {
        Ok(Ok(info)) => info.duration_seconds,
        Ok(Err(e)) => {
            warn!("Could not read audio duration: {:#}", e);
            None
        }
        Err(e) => {
            warn!("Audio probe task panicked: {}", e);
            None
        }
    }
}
