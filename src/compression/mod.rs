//! Mapping from (media kind, method) to external compressor invocations

pub mod command;
pub mod method;
pub mod naming;

pub use command::{output_extension, CompressionCommand};
pub use method::{is_offered, menu, CompressionMethod, MenuVariant};
pub use naming::{output_file_name, output_path};
