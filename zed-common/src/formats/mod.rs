//! ZED binary model format
//!
//! A `.zed` file is a fixed 12-byte [`ZedFileHeader`] followed by a sequence
//! of tagged, length-prefixed chunks and a single terminator:
//!
//! ```text
//! FileHeader (12 bytes)
//! Chunk 0x0002  model meta      (exactly one, first)
//! Chunk 0x0004  mesh geometry   (one per mesh, in model order)
//! 0xFFFF u16 | 0 u32            terminator (exactly once, last)
//! ```
//!
//! Every chunk starts with a [`ChunkHeader`]: `tag: u16` then `length: u32`,
//! where `length` counts only the body bytes after the length field. All
//! multi-byte values are little-endian.
//!
//! All fixed-size structures implement the [`BinarySerializable`] trait.

mod chunk;
mod header;
mod mesh;
mod meta;
mod serialization;

pub use chunk::*;
pub use header::*;
pub use mesh::*;
pub use meta::*;
pub use serialization::BinarySerializable;

/// File extension for ZED models (without the dot)
pub const ZED_EXT: &str = "zed";

/// Magic bytes at offset 0 of every ZED file
pub const ZED_MAGIC: [u8; 4] = *b"ZEDM";

/// Format version written by this crate (major, minor, patch)
pub const ZED_VERSION: [u8; 3] = [0, 0, 1];

/// Largest vertex index representable in a mesh chunk (u16 indices).
/// Meshes with more vertices must be split before export.
pub const MAX_INDEX_VALUE: u32 = u16::MAX as u32;

/// Bytes per vertex in a mesh chunk: position (3 × f32) + normal (3 × f32)
pub const MESH_VERTEX_SIZE: usize = 24;
