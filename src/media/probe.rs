use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::info;

/// Basic stream properties of an audio file
#[derive(Debug, Clone)]
pub struct AudioInfo {
    pub path: String,
    pub sample_rate: u32,
    pub channels: u16,
    /// None when the container does not declare a frame count
    pub duration_seconds: Option<f64>,
}

/// Read the container headers of an audio file without decoding it
pub fn probe_audio(path: impl AsRef<Path>) -> Result<AudioInfo> {
    let path = path.as_ref();
    info!("Probing audio file: {}", path.display());

    let file = File::open(path).context("Failed to open audio file")?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unrecognised audio format")?;

    let track = probed
        .format
        .default_track()
        .context("No audio track found")?;
    let params = &track.codec_params;

    let sample_rate = params.sample_rate.context("Audio track has no sample rate")?;
    let channels = params.channels.map(|c| c.count() as u16).unwrap_or(1);
    let duration_seconds = params
        .n_frames
        .map(|frames| frames as f64 / sample_rate as f64);

    info!(
        "Audio file probed: {}Hz, {} channels, {}",
        sample_rate,
        channels,
        duration_seconds
            .map(|d| format!("{:.1}s", d))
            .unwrap_or_else(|| "unknown duration".to_string())
    );

    Ok(AudioInfo {
        path: path.display().to_string(),
        sample_rate,
        channels,
        duration_seconds,
    })
}
