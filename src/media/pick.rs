use std::path::Path;
use tokio::fs;
use tracing::info;

use super::kind::{MediaKind, MediaSelection};
use crate::error::CompressError;

/// Resolve a user-supplied path into a media selection.
///
/// Stands in for the platform picker: the file must exist, its kind must be
/// inferable from the extension, and it must match `expected` when one is given.
pub async fn pick_media(
    path: impl AsRef<Path>,
    expected: Option<MediaKind>,
) -> Result<MediaSelection, CompressError> {
    let path = path.as_ref();
    let not_selected = || {
        let what = expected.map(|k| k.as_str()).unwrap_or("media");
        format!("You did not select any {}.", what)
    };

    let meta = fs::metadata(path)
        .await
        .map_err(|_| CompressError::Pick(format!("{} ({} not found)", not_selected(), path.display())))?;
    if !meta.is_file() {
        return Err(CompressError::Pick(format!(
            "{} ({} is not a file)",
            not_selected(),
            path.display()
        )));
    }

    let kind = MediaKind::from_path(path).ok_or_else(|| {
        CompressError::Pick(format!("Unsupported media file: {}", path.display()))
    })?;

    if let Some(expected) = expected {
        if expected != kind {
            return Err(CompressError::Pick(format!(
                "{} ({} is {}, not {})",
                not_selected(),
                path.display(),
                kind,
                expected
            )));
        }
    }

    info!("Picked {} file: {}", kind, path.display());

    Ok(MediaSelection::new(path, kind))
}
