//! Frame sub-chunk types

use std::fmt;

/// 256-level color palette
pub const COLOR256: u16 = 4;
/// Byte run-length compressed full frame
pub const BRUN: u16 = 15;
/// Postage stamp (thumbnail) image
pub const PSTAMP: u16 = 18;

/// Size of a chunk header on disk: u32 size followed by u16 type
pub const CHUNK_HEADER_SIZE: u32 = 6;

/// Chunk type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ChunkType {
    Color256,
    Brun,
    Pstamp,
    /// Any code outside the recognized set; skipped like the others
    Unknown(u16),
}

impl ChunkType {
    pub fn from_code(code: u16) -> Self {
        match code {
            COLOR256 => ChunkType::Color256,
            BRUN => ChunkType::Brun,
            PSTAMP => ChunkType::Pstamp,
            other => ChunkType::Unknown(other),
        }
    }

    pub fn code(self) -> u16 {
        match self {
            ChunkType::Color256 => COLOR256,
            ChunkType::Brun => BRUN,
            ChunkType::Pstamp => PSTAMP,
            ChunkType::Unknown(code) => code,
        }
    }

    /// Name of a recognized chunk type, `None` for unknown codes
    pub fn name(self) -> Option<&'static str> {
        match self {
            ChunkType::Color256 => Some("COLOR256"),
            ChunkType::Brun => Some("BRUN"),
            ChunkType::Pstamp => Some("PSTAMP"),
            ChunkType::Unknown(_) => None,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, ChunkType::Unknown(_))
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "UNKNOWN({})", self.code()),
        }
    }
}

/// One entry of a frame's chunk table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChunkDescriptor {
    /// Absolute offset of the chunk header
    pub offset: u64,
    /// Chunk size including the 6-byte header
    pub size: u32,
    pub kind: ChunkType,
}

impl ChunkDescriptor {
    /// Number of payload bytes following the header
    pub fn payload_len(&self) -> u32 {
        self.size.saturating_sub(CHUNK_HEADER_SIZE)
    }

    /// Offset of the next chunk header
    pub fn end(&self) -> u64 {
        self.offset + u64::from(self.size)
    }
}
