use chrono::Utc;
use std::path::{Path, PathBuf};

use super::command::output_extension;
use super::method::CompressionMethod;
use crate::error::CompressError;
use crate::media::MediaKind;

/// Length of the random prefix in generated file names
const RANDOM_PREFIX_LEN: usize = 13;

/// `<random>_<unix millis>_compressed_<kind>_<method>.<ext>`
pub fn output_file_name(
    kind: MediaKind,
    method: CompressionMethod,
) -> Result<String, CompressError> {
    let extension = output_extension(kind, method)?;
    let random = uuid::Uuid::new_v4().simple().to_string();

    Ok(format!(
        "{}_{}_compressed_{}_{}.{}",
        &random[..RANDOM_PREFIX_LEN],
        Utc::now().timestamp_millis(),
        kind,
        method.slug(),
        extension
    ))
}

pub fn output_path(
    cache_dir: impl AsRef<Path>,
    kind: MediaKind,
    method: CompressionMethod,
) -> Result<PathBuf, CompressError> {
    Ok(cache_dir.as_ref().join(output_file_name(kind, method)?))
}
