//! FLI/FLC/CEL file header decoding

use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use log::debug;
use std::fmt;
use std::io::{Read, Seek, SeekFrom};
use std::time::Duration;

/// Format tag of an original Animator FLI file
pub const FLI_TAG: u16 = 0xaf11;

/// Format tag of an Animator Pro FLC file (CEL files share it)
pub const FLC_TAG: u16 = 0xaf12;

/// The only color depth this reader accepts
pub const REQUIRED_DEPTH: u16 = 8;

/// The only header flag value this reader accepts
pub const REQUIRED_FLAGS: u16 = 0x0003;

/// Absolute offset of the frame offset table, past the reserved area
pub const FRAME_TABLE_OFFSET: u64 = 80;

/// Size of the file header on disk
pub const HEADER_SIZE: u64 = 128;

/// Unused offset, two DOS date/time pairs, two serials and the aspect ratio
const UNUSED_FIELDS_LEN: usize = 22;

/// Container revision, read from the magic at offset 4
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FormatTag {
    /// Original Animator format, speed in 1/70 s ticks
    Fli,
    /// Animator Pro format (and CEL), speed in milliseconds
    Flc,
}

impl FormatTag {
    /// Maps a format tag onto a known revision
    pub fn from_tag(tag: u16) -> Option<Self> {
        match tag {
            FLI_TAG => Some(FormatTag::Fli),
            FLC_TAG => Some(FormatTag::Flc),
            _ => None,
        }
    }

    /// Returns the on-disk tag
    pub fn tag(self) -> u16 {
        match self {
            FormatTag::Fli => FLI_TAG,
            FormatTag::Flc => FLC_TAG,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatTag::Fli => "FLI",
            FormatTag::Flc => "FLC/CEL",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Offsets of the first two frame records, FLC/CEL only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameOffsets {
    pub first: u32,
    pub second: u32,
}

/// Validated file header
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FileHeader {
    /// Size field at offset 0, equal to the source length
    pub declared_size: u32,
    /// Container revision
    pub format: FormatTag,
    /// Number of frames, not counting the ring frame
    pub frame_count: u16,
    /// Width in pixels
    pub width: u16,
    /// Height in pixels
    pub height: u16,
    /// Bits per pixel, always 8
    pub depth: u16,
    /// Header flags, always 0x0003
    pub flags: u16,
    /// Delay between frames, unit depends on `format`
    pub speed: u32,
    /// Frame record offsets; `None` for FLI, whose frame table is not decoded
    pub frame_offsets: Option<FrameOffsets>,
}

impl FileHeader {
    /// Reads and validates the header of a source that is `file_size` bytes long.
    ///
    /// The reader is positioned at offset 0 first. On success it is left
    /// just past the frame offset table (FLC) or at the end of the reserved
    /// area (FLI).
    pub fn read<R: Read + Seek>(reader: &mut R, file_size: u64) -> Result<Self> {
        reader.seek(SeekFrom::Start(0))?;

        let declared_size = read_u32(reader)?;
        if u64::from(declared_size) != file_size {
            return Err(Error::TruncatedFile {
                declared: declared_size,
                actual: file_size,
            });
        }

        // Stored as a little-endian word, so 0xAF12 reads back as "af12"
        let tag = read_u16(reader)?;
        let format = FormatTag::from_tag(tag).ok_or(Error::UnrecognizedFormat(tag))?;

        let frame_count = read_u16(reader)?;
        let width = read_u16(reader)?;
        let height = read_u16(reader)?;
        let depth = read_u16(reader)?;
        if depth != REQUIRED_DEPTH {
            return Err(Error::InvalidDepth(depth));
        }

        let flags = read_u16(reader)?;
        if flags != REQUIRED_FLAGS {
            return Err(Error::InvalidFlags(flags));
        }

        let speed = read_u32(reader)?;

        let mut unused = [0u8; UNUSED_FIELDS_LEN];
        reader
            .read_exact(&mut unused)
            .map_err(|e| Error::eof_as(e, Error::TruncatedHeader))?;

        debug!(
            "{} header: {} bytes, {} frames, {}x{}@{}, flags {:04x}, speed {}",
            format, declared_size, frame_count, width, height, depth, flags, speed
        );

        // The frame table sits at a fixed position regardless of what the
        // fields above consumed.
        reader.seek(SeekFrom::Start(FRAME_TABLE_OFFSET))?;

        let frame_offsets = match format {
            FormatTag::Fli => {
                debug!("FLI frame table not decoded");
                None
            }
            FormatTag::Flc => {
                let first = read_u32(reader)?;
                let second = read_u32(reader)?;
                debug!("frame offsets: first {}, second {}", first, second);
                Some(FrameOffsets { first, second })
            }
        };

        Ok(Self {
            declared_size,
            format,
            frame_count,
            width,
            height,
            depth,
            flags,
            speed,
            frame_offsets,
        })
    }

    /// Delay between frames, converting FLI ticks (1/70 s) when needed
    pub fn frame_delay(&self) -> Duration {
        match self.format {
            FormatTag::Fli => Duration::from_nanos(u64::from(self.speed) * 1_000_000_000 / 70),
            FormatTag::Flc => Duration::from_millis(u64::from(self.speed)),
        }
    }

    /// Offset of the first frame record, if the format carries one
    pub fn first_frame_offset(&self) -> Option<u64> {
        self.frame_offsets.map(|o| u64::from(o.first))
    }

    /// Offset of the second frame record, if the format carries one
    pub fn second_frame_offset(&self) -> Option<u64> {
        self.frame_offsets.map(|o| u64::from(o.second))
    }
}

fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    reader
        .read_u16::<LittleEndian>()
        .map_err(|e| Error::eof_as(e, Error::TruncatedHeader))
}

fn read_u32<R: Read>(reader: &mut R) -> Result<u32> {
    reader
        .read_u32::<LittleEndian>()
        .map_err(|e| Error::eof_as(e, Error::TruncatedHeader))
}
