//! Seekable binary output for `.zed` files
//!
//! [`BinaryWriter`] wraps any `Write + Seek` sink with little-endian
//! fixed-width writes and bounded seeking. The chunk framer
//! ([`write_chunk`], [`write_chunk_end`]) is the only code that moves the
//! cursor backwards; everything else writes strictly forward.
//!
//! # Chunk framing
//!
//! ```text
//! ┌──────────┬──────────────┬────────────────────────┐
//! │ tag u16  │ length u32   │ body (length bytes)    │
//! └──────────┴──────▲───────┴────────────────────────┘
//!                   └── written as 0, patched once the body is done
//! ```

mod chunk;
mod writer;

pub use chunk::{write_chunk, write_chunk_end};
pub use writer::BinaryWriter;
