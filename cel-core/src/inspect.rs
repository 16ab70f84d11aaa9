//! Whole-file inspection: header plus the chunk tables of selected frames

use crate::{ChunkDescriptor, FileHeader, FrameRecord, Result};
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Which frame records to walk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FrameSelection {
    /// No frame records, header only
    HeaderOnly,
    /// The first frame record
    #[default]
    First,
    /// The first and second frame records
    FirstAndSecond,
}

/// Chunk table of one frame record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FrameSummary {
    pub record: FrameRecord,
    pub chunks: Vec<ChunkDescriptor>,
}

/// Everything the decoder reports about a file
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Inspection {
    pub header: FileHeader,
    /// Walked frames in file order; empty for FLI
    pub frames: Vec<FrameSummary>,
}

impl Inspection {
    /// Serializes the inspection as pretty-printed JSON
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Decodes the header of a `file_size`-byte source, then walks the chunk
/// tables of the selected frames.
pub fn inspect<R: Read + Seek>(
    reader: &mut R,
    file_size: u64,
    selection: FrameSelection,
) -> Result<Inspection> {
    let header = FileHeader::read(reader, file_size)?;

    let offsets: Vec<u64> = match (selection, header.frame_offsets) {
        (_, None) | (FrameSelection::HeaderOnly, _) => Vec::new(),
        (FrameSelection::First, Some(o)) => vec![u64::from(o.first)],
        (FrameSelection::FirstAndSecond, Some(o)) => vec![u64::from(o.first), u64::from(o.second)],
    };

    let mut frames = Vec::with_capacity(offsets.len());
    for offset in offsets {
        let chunks = FrameRecord::read(reader, offset)?;
        let record = chunks.record();
        let chunks = chunks.collect::<Result<Vec<_>>>()?;
        frames.push(FrameSummary { record, chunks });
    }

    Ok(Inspection { header, frames })
}

/// Opens the file at `path` and inspects it, using its metadata length as
/// the expected size.
pub fn inspect_path<P: AsRef<Path>>(path: P, selection: FrameSelection) -> Result<Inspection> {
    let path = path.as_ref();
    let file_size = std::fs::metadata(path)?.len();
    debug!("inspecting {} ({} bytes)", path.display(), file_size);

    let mut reader = BufReader::new(File::open(path)?);
    inspect(&mut reader, file_size, selection)
}
