use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::compression::MenuVariant;
use crate::library::Collections;
use crate::session::SessionConfig;

/// Environment variable prefix, e.g. `MEDIA_COMPRESS__FFMPEG__BINARY`
const ENV_PREFIX: &str = "MEDIA_COMPRESS";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub ffmpeg: FfmpegConfig,
    pub storage: StorageConfig,
    pub compression: CompressionConfig,
    pub library: Collections,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct FfmpegConfig {
    pub binary: String,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub cache_dir: String,
    pub library_dir: String,
    pub cleanup_source: bool,
}

#[derive(Debug, Deserialize)]
pub struct CompressionConfig {
    pub menu: MenuVariant,
}

impl Config {
    /// Load `path` (any extension the config crate understands, optional)
    /// over built-in defaults, then apply environment overrides
    pub fn load(path: &str) -> Result<Self> {
        let cache_dir = std::env::temp_dir().join("media-compress");

        let settings = config::Config::builder()
            .set_default("service.name", "media-compress")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8088_i64)?
            .set_default("ffmpeg.binary", "ffmpeg")?
            .set_default("storage.cache_dir", cache_dir.to_string_lossy().into_owned())?
            .set_default("storage.library_dir", "~/Media/Compressed")?
            .set_default("storage.cleanup_source", false)?
            .set_default("compression.menu", "classic")?
            .set_default("library.images", "Images")?
            .set_default("library.videos", "Videos")?
            .set_default("library.audio", "Audio")?
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn cache_dir(&self) -> PathBuf {
        expand(&self.storage.cache_dir)
    }

    pub fn library_dir(&self) -> PathBuf {
        expand(&self.storage.library_dir)
    }

    pub fn ffmpeg_binary(&self) -> PathBuf {
        expand(&self.ffmpeg.binary)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            cache_dir: self.cache_dir(),
            cleanup_source: self.storage.cleanup_source,
            menu: self.compression.menu,
            collections: self.library.clone(),
        }
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).into_owned())
}
