//! Synthetic FLC/CEL file builder shared by the integration tests

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const HEADER_SIZE: usize = 128;

/// Builds an in-memory animation file: a 128-byte header followed by frame
/// records laid out back to back.
#[derive(Debug, Clone)]
pub struct FlicBuilder {
    pub tag: u16,
    pub frame_count: u16,
    pub width: u16,
    pub height: u16,
    pub depth: u16,
    pub flags: u16,
    pub speed: u32,
    pub frames: Vec<Vec<(u32, u16)>>,
}

impl Default for FlicBuilder {
    fn default() -> Self {
        Self {
            tag: 0xaf12,
            frame_count: 1,
            width: 64,
            height: 48,
            depth: 8,
            flags: 0x0003,
            speed: 50,
            frames: Vec::new(),
        }
    }
}

impl FlicBuilder {
    pub fn fli() -> Self {
        Self {
            tag: 0xaf11,
            width: 320,
            height: 200,
            speed: 5,
            ..Self::default()
        }
    }

    /// Appends a frame whose chunk table holds `(size, type)` pairs
    pub fn frame(mut self, chunks: &[(u32, u16)]) -> Self {
        self.frames.push(chunks.to_vec());
        self
    }

    /// Offset of frame record `index` in the built file
    pub fn frame_offset(&self, index: usize) -> u32 {
        let preceding: u32 = self.frames[..index].iter().map(|f| frame_len(f)).sum();
        HEADER_SIZE as u32 + preceding
    }

    pub fn build(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        buf.write_u32::<LittleEndian>(0).unwrap();
        buf.write_u16::<LittleEndian>(self.tag).unwrap();
        buf.write_u16::<LittleEndian>(self.frame_count).unwrap();
        buf.write_u16::<LittleEndian>(self.width).unwrap();
        buf.write_u16::<LittleEndian>(self.height).unwrap();
        buf.write_u16::<LittleEndian>(self.depth).unwrap();
        buf.write_u16::<LittleEndian>(self.flags).unwrap();
        buf.write_u32::<LittleEndian>(self.speed).unwrap();
        // Unused offset, DOS date/time pairs, serials, aspect ratio
        buf.write_u16::<LittleEndian>(0).unwrap();
        buf.write_u16::<LittleEndian>(0x5a21).unwrap();
        buf.write_u16::<LittleEndian>(0x1d6c).unwrap();
        buf.write_u32::<LittleEndian>(0x464c4143).unwrap();
        buf.write_u16::<LittleEndian>(0x5a21).unwrap();
        buf.write_u16::<LittleEndian>(0x1d6c).unwrap();
        buf.write_u32::<LittleEndian>(0x464c4143).unwrap();
        buf.write_u16::<LittleEndian>(6).unwrap();
        buf.write_u16::<LittleEndian>(5).unwrap();
        buf.resize(80, 0);

        let first = if self.frames.is_empty() { 0 } else { self.frame_offset(0) };
        let second = if self.frames.len() > 1 { self.frame_offset(1) } else { 0 };
        buf.write_u32::<LittleEndian>(first).unwrap();
        buf.write_u32::<LittleEndian>(second).unwrap();
        buf.resize(HEADER_SIZE, 0);

        for frame in &self.frames {
            write_frame(&mut buf, frame);
        }

        let len = buf.len() as u32;
        buf[..4].copy_from_slice(&len.to_le_bytes());
        buf
    }
}

fn frame_len(chunks: &[(u32, u16)]) -> u32 {
    16 + chunks.iter().map(|&(size, _)| size.max(6)).sum::<u32>()
}

fn write_frame(buf: &mut Vec<u8>, chunks: &[(u32, u16)]) {
    buf.write_u32::<LittleEndian>(frame_len(chunks)).unwrap();
    buf.write_u16::<LittleEndian>(0xf1fa).unwrap();
    buf.write_u16::<LittleEndian>(chunks.len() as u16).unwrap();
    buf.extend_from_slice(&[0u8; 8]);
    for (i, &(size, code)) in chunks.iter().enumerate() {
        buf.write_u32::<LittleEndian>(size).unwrap();
        buf.write_u16::<LittleEndian>(code).unwrap();
        let payload = size.max(6) - 6;
        buf.extend(std::iter::repeat(i as u8).take(payload as usize));
    }
}
