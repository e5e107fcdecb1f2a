//! zed-export library
//!
//! Converts polygon meshes into `.zed` model files. Used by the `zed-export`
//! CLI and by hosts that already hold mesh data in memory.

pub mod encoder;
pub mod error;
pub mod export;
pub mod formats;
pub mod manifest;
pub mod mesh;
pub mod options;

// Re-export format constants from zed-common
pub use zed_common::{ZED_EXT, ZED_MAGIC, ZED_VERSION};

// Re-export the export pipeline
pub use encoder::{EncodeSummary, encode_model, encode_normalized, normalize_model};
pub use error::ExportError;
pub use export::export_model;
pub use options::{AxisConvention, ExportOptions};

// Re-export mesh model types
pub use mesh::{Mesh, Model, NormalizedMesh, Polygon, Vertex};
