//! Model encoder
//!
//! Chunk order is part of the format contract:
//!
//! 1. File header (not chunk framed)
//! 2. Model-meta chunk with aggregate counts
//! 3. One mesh chunk per mesh, in model order
//! 4. A single terminator

use std::io::{Seek, Write};
use zed_common::{BinaryWriter, ModelMetaChunk, ZedFileHeader, write_chunk_end};

use crate::error::ExportError;
use crate::formats::{write_mesh_chunk, write_meta_chunk};
use crate::mesh::{MAX_INDEX_COUNT, MAX_VERTEX_COUNT, Model, NormalizedMesh, normalize};
use crate::options::ExportOptions;

/// Counts reported after a successful encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSummary {
    pub mesh_count: usize,
    /// Sum of vertex counts across all meshes
    pub vertex_count: u32,
    /// Sum of index counts across all meshes
    pub index_count: u32,
    pub bytes_written: u64,
}

impl EncodeSummary {
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}

/// Normalize every mesh of a model. Fails on the first mesh that cannot be
/// represented, before anything is written.
pub fn normalize_model(
    model: &Model,
    options: &ExportOptions,
) -> Result<Vec<NormalizedMesh>, ExportError> {
    if model.meshes.is_empty() {
        return Err(ExportError::Selection(format!(
            "model '{}' has no meshes",
            model.name
        )));
    }

    model
        .meshes
        .iter()
        .map(|mesh| normalize(mesh, options.axis, options.flip_winding))
        .collect()
}

/// Normalize and encode a model into `sink`.
///
/// The sink must be empty and positioned at its start.
pub fn encode_model<W: Write + Seek>(
    sink: W,
    model: &Model,
    options: &ExportOptions,
) -> Result<EncodeSummary, ExportError> {
    let meshes = normalize_model(model, options)?;
    encode_normalized(sink, model.name, &meshes)
}

/// Encode already-normalized meshes into `sink`.
///
/// The meta chunk's vertex count is the sum over all meshes. Meshes over the
/// 16-bit vertex or index limits fail before anything is written.
pub fn encode_normalized<W: Write + Seek>(
    sink: W,
    name: &str,
    meshes: &[NormalizedMesh],
) -> Result<EncodeSummary, ExportError> {
    if meshes.is_empty() {
        return Err(ExportError::Selection(format!(
            "model '{}' has no meshes",
            name
        )));
    }

    for mesh in meshes {
        check_mesh_ranges(mesh)?;
    }

    let total = |field: &'static str, count: usize| {
        u32::try_from(count).map_err(|_| ExportError::RangeExceeded {
            mesh: name.to_string(),
            field,
            count,
            max: u32::MAX as usize,
        })
    };
    let vertex_count = total(
        "model vertex count",
        meshes.iter().map(NormalizedMesh::vertex_count).sum(),
    )?;
    let index_count = total(
        "model index count",
        meshes.iter().map(NormalizedMesh::index_count).sum(),
    )?;
    let mesh_count = total("mesh count", meshes.len())?;

    let mut w = BinaryWriter::new(sink);

    w.write_bytes(&ZedFileHeader::new().to_bytes())?;

    let meta = ModelMetaChunk::new(vertex_count, index_count, mesh_count, name);
    let meta_size = write_meta_chunk(&mut w, &meta)?;
    tracing::debug!("Wrote meta chunk ({} bytes)", meta_size);

    for mesh in meshes {
        let size = write_mesh_chunk(&mut w, mesh)?;
        tracing::debug!(
            "Wrote mesh chunk '{}': {} vertices, {} indices ({} bytes)",
            mesh.name,
            mesh.vertex_count(),
            mesh.index_count(),
            size
        );
    }

    write_chunk_end(&mut w)?;
    w.flush()?;

    Ok(EncodeSummary {
        mesh_count: meshes.len(),
        vertex_count,
        index_count,
        bytes_written: w.len(),
    })
}

/// Per-mesh 16-bit limits, checked before the first byte is written
fn check_mesh_ranges(mesh: &NormalizedMesh) -> Result<(), ExportError> {
    let limits = [
        ("vertex count", mesh.vertex_count(), MAX_VERTEX_COUNT),
        ("index count", mesh.index_count(), MAX_INDEX_COUNT),
    ];
    for (field, count, max) in limits {
        if count > max {
            return Err(ExportError::RangeExceeded {
                mesh: mesh.name.clone(),
                field,
                count,
                max,
            });
        }
    }
    Ok(())
}
