//! Export error types
//!
//! Every variant is terminal for the export that raised it. There is no
//! partial-model recovery: a failed export's output file is undefined and
//! must be discarded by the caller.

use std::io;

/// Error type for model export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing to export: no mesh selected, unknown object, or empty model.
    #[error("Nothing to export: {0}")]
    Selection(String),

    /// A count does not fit the field that stores it.
    #[error("Mesh '{mesh}': {field} {count} exceeds the format limit of {max}")]
    RangeExceeded {
        mesh: String,
        field: &'static str,
        count: usize,
        max: usize,
    },

    /// Polygon with an arity other than 3 or 4.
    #[error(
        "Mesh '{mesh}': polygon {polygon} has {arity} vertices (only triangles and quads are supported)"
    )]
    UnsupportedTopology {
        mesh: String,
        polygon: usize,
        arity: usize,
    },

    /// Polygon refers to a vertex the mesh does not have.
    #[error("Mesh '{mesh}': polygon {polygon} references vertex {index}, mesh has {vertex_count}")]
    InvalidIndex {
        mesh: String,
        polygon: usize,
        index: u32,
        vertex_count: usize,
    },

    /// Stream write/seek failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
