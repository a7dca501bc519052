use serde::{Deserialize, Serialize};
use std::fmt;

use crate::media::MediaKind;

/// Compression methods offered across all menus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionMethod {
    /// Lossless entropy coding (PNG deflate, FFV1, FLAC)
    EntropyCoding,
    /// Run-length encoding
    Rle,
    /// Huffman-coded MP3 through LAME
    HuffmanCoding,
    H264,
    H265,
    Mp3,
    Aac,
}

/// Which family of menus the session offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MenuVariant {
    /// Coding-technique menus: entropy coding, RLE, Huffman coding
    #[default]
    Classic,
    /// Codec menus: H.264/H.265 for video, MP3/AAC for audio
    Codec,
}

impl CompressionMethod {
    pub fn slug(&self) -> &'static str {
        match self {
            Self::EntropyCoding => "entropy-coding",
            Self::Rle => "rle",
            Self::HuffmanCoding => "huffman-coding",
            Self::H264 => "h264",
            Self::H265 => "h265",
            Self::Mp3 => "mp3",
            Self::Aac => "aac",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::EntropyCoding => "Entropy Coding",
            Self::Rle => "RLE",
            Self::HuffmanCoding => "Huffman Coding",
            Self::H264 => "H.264",
            Self::H265 => "H.265",
            Self::Mp3 => "MP3 (LAME)",
            Self::Aac => "AAC",
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Methods offered for a media kind, in menu order
pub fn menu(kind: MediaKind, variant: MenuVariant) -> &'static [CompressionMethod] {
    use CompressionMethod::*;

    match (kind, variant) {
        (MediaKind::Image, _) => &[EntropyCoding, Rle],
        (MediaKind::Video, MenuVariant::Classic) => &[EntropyCoding, Rle],
        (MediaKind::Video, MenuVariant::Codec) => &[H264, H265],
        (MediaKind::Audio, MenuVariant::Classic) => &[HuffmanCoding, EntropyCoding],
        (MediaKind::Audio, MenuVariant::Codec) => &[Mp3, Aac],
    }
}

pub fn is_offered(kind: MediaKind, variant: MenuVariant, method: CompressionMethod) -> bool {
    menu(kind, variant).contains(&method)
}
