//! ZED file header
//!
//! # Layout
//! ```text
//! 0x00: magic "ZEDM"
//! 0x04: flags u8 (reserved, always 0)
//! 0x05: version major u8
//! 0x06: version minor u8
//! 0x07: version patch u8
//! 0x08: reserved (4 bytes)
//! ```
//!
//! The header is written directly, not chunk framed.

use super::{ZED_MAGIC, ZED_VERSION};

/// ZED file header (12 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ZedFileHeader {
    pub magic: [u8; 4],
    pub flags: u8,
    /// Format version (major, minor, patch)
    pub version: [u8; 3],
    pub reserved: [u8; 4],
}

impl ZedFileHeader {
    pub const SIZE: usize = 12;

    /// Header for the format version this crate writes
    pub fn new() -> Self {
        Self {
            magic: ZED_MAGIC,
            flags: 0,
            version: ZED_VERSION,
            reserved: [0; 4],
        }
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4] = self.flags;
        bytes[5..8].copy_from_slice(&self.version);
        bytes[8..12].copy_from_slice(&self.reserved);
        bytes
    }

    /// Read header from bytes
    ///
    /// Returns `None` if the slice is too short or the magic does not match.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE || bytes[0..4] != ZED_MAGIC {
            return None;
        }
        Some(Self {
            magic: ZED_MAGIC,
            flags: bytes[4],
            version: [bytes[5], bytes[6], bytes[7]],
            reserved: [bytes[8], bytes[9], bytes[10], bytes[11]],
        })
    }
}

impl Default for ZedFileHeader {
    fn default() -> Self {
        Self::new()
    }
}
