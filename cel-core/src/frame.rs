//! Frame record decoding and chunk table enumeration

use crate::chunk::{ChunkDescriptor, ChunkType, CHUNK_HEADER_SIZE};
use crate::{Error, Result};
use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, trace};
use std::io::{Read, Seek, SeekFrom};

/// Frame record magic
pub const FRAME_MAGIC: u16 = 0xf1fa;

/// Size of a frame record sub-header on disk
pub const FRAME_HEADER_SIZE: u64 = 16;

/// Frame record sub-header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameRecord {
    /// Absolute offset of the record
    pub offset: u64,
    /// Size of the record including its sub-header. Informational only.
    pub size: u32,
    /// Number of chunks in the chunk table
    pub chunk_count: u16,
}

impl FrameRecord {
    /// Reads the sub-header of the frame record at `frame_offset` and returns
    /// an iterator over its chunk table.
    ///
    /// Fails with [`Error::BadFrameMagic`] before any chunk is read if the
    /// record is not a frame.
    pub fn read<R: Read + Seek>(reader: &mut R, frame_offset: u64) -> Result<Chunks<'_, R>> {
        let source_len = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(frame_offset))?;

        let truncated = || Error::TruncatedFrame {
            offset: frame_offset,
        };

        let size = reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::eof_as(e, truncated()))?;
        let magic = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::eof_as(e, truncated()))?;
        if magic != FRAME_MAGIC {
            return Err(Error::BadFrameMagic(magic));
        }
        let chunk_count = reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::eof_as(e, truncated()))?;

        let mut reserved = [0u8; 8];
        reader
            .read_exact(&mut reserved)
            .map_err(|e| Error::eof_as(e, truncated()))?;

        debug!(
            "frame at {}: {} bytes, {} chunks",
            frame_offset, size, chunk_count
        );

        let record = FrameRecord {
            offset: frame_offset,
            size,
            chunk_count,
        };

        Ok(Chunks {
            reader,
            record,
            remaining: chunk_count,
            next_offset: frame_offset + FRAME_HEADER_SIZE,
            source_len,
            done: false,
        })
    }
}

/// Lazy walk over a frame's chunk table.
///
/// Yields exactly `chunk_count` descriptors unless an error occurs, after
/// which it yields nothing more. Payload bytes are skipped, never read.
pub struct Chunks<'a, R> {
    reader: &'a mut R,
    record: FrameRecord,
    remaining: u16,
    next_offset: u64,
    source_len: u64,
    done: bool,
}

impl<'a, R: Read + Seek> Chunks<'a, R> {
    /// The frame sub-header this table belongs to
    pub fn record(&self) -> FrameRecord {
        self.record
    }

    fn read_chunk(&mut self) -> Result<ChunkDescriptor> {
        let offset = self.next_offset;
        let truncated = || Error::TruncatedFrame { offset };

        let size = self
            .reader
            .read_u32::<LittleEndian>()
            .map_err(|e| Error::eof_as(e, truncated()))?;
        let code = self
            .reader
            .read_u16::<LittleEndian>()
            .map_err(|e| Error::eof_as(e, truncated()))?;

        if size < CHUNK_HEADER_SIZE {
            return Err(Error::InvalidChunkSize { offset, size });
        }
        let end = offset + u64::from(size);
        if end > self.source_len {
            return Err(truncated());
        }

        self.reader
            .seek(SeekFrom::Current(i64::from(size - CHUNK_HEADER_SIZE)))?;
        self.next_offset = end;

        let kind = ChunkType::from_code(code);
        if kind.is_known() {
            trace!("{} chunk at {}: {} bytes", kind, offset, size);
        } else {
            trace!("skipping unknown chunk type {} at {}: {} bytes", code, offset, size);
        }

        Ok(ChunkDescriptor { offset, size, kind })
    }
}

impl<'a, R: Read + Seek> Iterator for Chunks<'a, R> {
    type Item = Result<ChunkDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining == 0 {
            return None;
        }

        let result = self.read_chunk();
        match result {
            Ok(_) => self.remaining -= 1,
            Err(_) => self.done = true,
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.remaining as usize))
        }
    }
}

impl<'a, R: Read + Seek> std::iter::FusedIterator for Chunks<'a, R> {}
