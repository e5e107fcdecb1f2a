//! Shared types and utilities for the ZED model format
//!
//! This crate is used by `zed-export` (the asset pipeline) and by anything
//! that needs to produce or inspect `.zed` files.
//!
//! # Modules
//!
//! - [`formats`] - File header and chunk layouts, format constants
//! - [`binary`] - Little-endian seekable writer and the chunk framer

pub mod binary;
pub mod formats;

pub use binary::{BinaryWriter, write_chunk, write_chunk_end};

pub use formats::{
    BinarySerializable, CHUNK_END, CHUNK_MESH, CHUNK_MODEL_META, ChunkHeader, MAX_INDEX_VALUE,
    MESH_VERTEX_SIZE, META_NAME_SIZE, MeshChunkHeader, ModelMetaChunk, ZED_EXT, ZED_MAGIC,
    ZED_VERSION, ZedFileHeader,
};
