use anyhow::{Context, Result};
use chrono::Utc;
use std::ffi::{OsStr, OsString};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

use super::{Asset, MediaLibrary};

/// Library backed by a directory with one sub-directory per collection
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf> {
        let valid = !collection.is_empty()
            && collection != "."
            && collection != ".."
            && !collection.contains(['/', '\\']);
        if !valid {
            anyhow::bail!("Invalid collection name: {:?}", collection);
        }
        Ok(self.root.join(collection))
    }
}

/// Upper bound on `-N` suffixes tried for one file name
const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// `name` for attempt 0, then `stem-1.ext`, `stem-2.ext`, ...
fn candidate_name(file_name: &OsStr, attempt: u32) -> OsString {
    if attempt == 0 {
        return file_name.to_os_string();
    }

    let name = Path::new(file_name);
    let mut candidate = name.file_stem().unwrap_or(file_name).to_os_string();
    candidate.push(format!("-{}", attempt));
    if let Some(ext) = name.extension() {
        candidate.push(".");
        candidate.push(ext);
    }
    candidate
}

/// Create a file in `dir` that did not exist before, never replacing an existing asset
async fn create_unique(dir: &Path, file_name: &OsStr) -> Result<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(candidate_name(file_name, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("{} already exists", path.display());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to create {}", path.display()))
            }
        }
    }

    anyhow::bail!(
        "No free name for {} in {}",
        Path::new(file_name).display(),
        dir.display()
    )
}

async fn copy_into(source: &Path, dest: &mut File) -> Result<()> {
    let mut reader = File::open(source).await?;
    tokio::io::copy(&mut reader, dest).await?;
    dest.flush().await?;
    Ok(())
}

#[async_trait::async_trait]
impl MediaLibrary for DirectoryLibrary {
    async fn request_access(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .await
            .with_context(|| format!("Failed to create library at {}", self.root.display()))?;

        let meta = fs::metadata(&self.root).await?;
        if meta.permissions().readonly() {
            anyhow::bail!("Permission denied: library at {} is read-only", self.root.display());
        }

        Ok(())
    }

    async fn create_asset(&self, source: &Path, collection: &str) -> Result<Asset> {
        let dir = self.collection_dir(collection)?;
        fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("Failed to create collection {}", collection))?;

        let file_name = source
            .file_name()
            .with_context(|| format!("Source has no file name: {}", source.display()))?;
        if fs::metadata(source).await.is_err() {
            anyhow::bail!("Source does not exist: {}", source.display());
        }

        let (dest, mut file) = create_unique(&dir, file_name).await?;
        if let Err(e) = copy_into(source, &mut file).await {
            drop(file);
            let _ = fs::remove_file(&dest).await;
            return Err(e)
                .with_context(|| format!("Failed to copy {} into library", source.display()));
        }

        info!("Saved {} to collection {}", dest.display(), collection);

        Ok(Asset {
            id: uuid::Uuid::new_v4(),
            path: dest,
            collection: collection.to_string(),
            created_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_names() {
        let name = OsStr::new("song.mp3");
        assert_eq!(candidate_name(name, 0), "song.mp3");
        assert_eq!(candidate_name(name, 1), "song-1.mp3");
        assert_eq!(candidate_name(name, 12), "song-12.mp3");
        assert_eq!(candidate_name(OsStr::new("README"), 2), "README-2");
        assert_eq!(candidate_name(OsStr::new("a.tar.gz"), 1), "a.tar-1.gz");
    }
}
