pub mod kind;
pub mod pick;
pub mod probe;

pub use kind::{MediaKind, MediaSelection};
pub use pick::pick_media;
pub use probe::{probe_audio, AudioInfo};
