//! Chunk framing header
//!
//! # Layout
//! ```text
//! 0x00: tag u16
//! 0x02: length u32 (body bytes after this field)
//! 0x06: body
//! ```

/// Tag of the model-meta chunk
pub const CHUNK_MODEL_META: u16 = 0x0002;

/// Tag of a mesh-geometry chunk
pub const CHUNK_MESH: u16 = 0x0004;

/// Reserved tag of the stream terminator. Never used for a data chunk.
pub const CHUNK_END: u16 = 0xFFFF;

/// Tag and body length preceding every chunk (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub tag: u16,
    pub length: u32,
}

impl ChunkHeader {
    pub const SIZE: usize = 6;

    pub fn new(tag: u16, length: u32) -> Self {
        Self { tag, length }
    }

    /// The terminator marker (`0xFFFF`, zero length)
    pub fn end() -> Self {
        Self::new(CHUNK_END, 0)
    }

    pub fn is_end(&self) -> bool {
        self.tag == CHUNK_END
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..2].copy_from_slice(&self.tag.to_le_bytes());
        bytes[2..6].copy_from_slice(&self.length.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        Some(Self {
            tag: u16::from_le_bytes([bytes[0], bytes[1]]),
            length: u32::from_le_bytes([bytes[2], bytes[3], bytes[4], bytes[5]]),
        })
    }
}
