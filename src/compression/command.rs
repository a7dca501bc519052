use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::method::CompressionMethod;
use crate::error::CompressError;
use crate::media::MediaKind;

/// Codec arguments and output extension for one (kind, method) pair
struct Template {
    codec_args: &'static [&'static str],
    extension: &'static str,
}

fn template(kind: MediaKind, method: CompressionMethod) -> Option<Template> {
    use CompressionMethod::*;

    let (codec_args, extension): (&'static [&'static str], &'static str) = match (kind, method) {
        (MediaKind::Image, EntropyCoding) => (&["-compression_level", "100"], "png"),
        (MediaKind::Image, Rle) => (&["-c:v", "tiff", "-compression_algo", "packbits"], "tiff"),

        (MediaKind::Video, EntropyCoding) => (&["-c:v", "ffv1", "-level", "3"], "mkv"),
        (MediaKind::Video, Rle) => (&["-vcodec", "bmp"], "avi"),
        (MediaKind::Video, H264) => (
            &["-c:v", "libx264", "-crf", "23", "-preset", "medium", "-c:a", "aac"],
            "mp4",
        ),
        (MediaKind::Video, H265) => (
            &["-c:v", "libx265", "-crf", "28", "-tag:v", "hvc1", "-c:a", "aac"],
            "mp4",
        ),

        (MediaKind::Audio, HuffmanCoding) | (MediaKind::Audio, Mp3) => {
            (&["-c:a", "libmp3lame", "-q:a", "2"], "mp3")
        }
        (MediaKind::Audio, EntropyCoding) => (&["-c:a", "flac"], "flac"),
        (MediaKind::Audio, Aac) => (&["-c:a", "aac", "-b:a", "128k"], "m4a"),

        _ => return None,
    };

    Some(Template {
        codec_args,
        extension,
    })
}

/// File extension the tool writes for a (kind, method) pair
pub fn output_extension(
    kind: MediaKind,
    method: CompressionMethod,
) -> Result<&'static str, CompressError> {
    template(kind, method)
        .map(|t| t.extension)
        .ok_or(CompressError::MethodNotOffered { kind, method })
}

/// Argument vector for one invocation of the external compressor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionCommand {
    pub input: PathBuf,
    pub output: PathBuf,
    args: Vec<OsString>,
}

impl CompressionCommand {
    pub fn build(
        kind: MediaKind,
        method: CompressionMethod,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<Self, CompressError> {
        let template =
            template(kind, method).ok_or(CompressError::MethodNotOffered { kind, method })?;
        let input = input.as_ref().to_path_buf();
        let output = output.as_ref().to_path_buf();

        let mut args: Vec<OsString> = vec!["-y".into(), "-i".into(), input.clone().into()];
        args.extend(template.codec_args.iter().map(OsString::from));
        args.push(output.clone().into());

        Ok(Self {
            input,
            output,
            args,
        })
    }

    /// Arguments as passed to the tool; paths are kept byte-for-byte
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Shell-style rendering for logs and dry runs
    pub fn display(&self) -> String {
        self.args
            .iter()
            .map(|a| {
                let a = a.to_string_lossy();
                if a.is_empty() || a.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
                    format!("'{}'", a.replace('\'', r"'\''"))
                } else {
                    a.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
