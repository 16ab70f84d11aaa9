//! CEL Core Library
//!
//! This library decodes the FLI/FLC/CEL animation container format: the fixed
//! 128-byte file header and the chunk table of individual frame records.
//! Chunk payloads (palettes, run-length-encoded pixels, thumbnails) are
//! identified and skipped, never decompressed.

pub mod chunk;
pub mod frame;
pub mod header;
pub mod inspect;

pub use chunk::{ChunkDescriptor, ChunkType};
pub use frame::{Chunks, FrameRecord};
pub use header::{FileHeader, FormatTag, FrameOffsets};
pub use inspect::{inspect, inspect_path, FrameSelection, FrameSummary, Inspection};

/// Result type for cel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cel-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Truncated file: header declares {declared} bytes, source has {actual}")]
    TruncatedFile { declared: u32, actual: u64 },

    #[error("Truncated file header")]
    TruncatedHeader,

    #[error("Unrecognized format tag: {0:04x}")]
    UnrecognizedFormat(u16),

    #[error("Invalid color depth: {0}, expected 8")]
    InvalidDepth(u16),

    #[error("Invalid header flags: {0:04x}, expected 0003")]
    InvalidFlags(u16),

    #[error("Bad frame magic: {0:04x}, expected f1fa")]
    BadFrameMagic(u16),

    #[error("Truncated frame at offset {offset}")]
    TruncatedFrame { offset: u64 },

    #[error("Invalid chunk size {size} at offset {offset}, minimum is 6")]
    InvalidChunkSize { offset: u64, size: u32 },
}

impl Error {
    /// Maps a short read onto `truncated`, passing other IO errors through.
    pub(crate) fn eof_as(err: std::io::Error, truncated: Error) -> Error {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            truncated
        } else {
            Error::Io(err)
        }
    }
}
