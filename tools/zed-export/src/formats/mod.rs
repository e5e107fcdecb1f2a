//! Chunk writers for `.zed` files
//!
//! Re-exports the format definitions from zed-common and adds the chunk
//! bodies built from normalized meshes.

pub use zed_common::formats::*;

use std::io::{Seek, Write};
use zed_common::{BinaryWriter, write_chunk};

use crate::error::ExportError;
use crate::mesh::{MAX_INDEX_COUNT, MAX_VERTEX_COUNT, NormalizedMesh};

/// Write the model-meta chunk. Returns the body size.
pub fn write_meta_chunk<W: Write + Seek>(
    w: &mut BinaryWriter<W>,
    meta: &ModelMetaChunk,
) -> Result<u32, ExportError> {
    write_chunk(w, CHUNK_MODEL_META, |w| {
        w.write_bytes(&meta.to_bytes())?;
        Ok(())
    })
}

/// Write one mesh-geometry chunk. Returns the body size.
///
/// The index-list length is a placeholder patched after the indices are
/// written, nested inside the chunk's own length patch.
pub fn write_mesh_chunk<W: Write + Seek>(
    w: &mut BinaryWriter<W>,
    mesh: &NormalizedMesh,
) -> Result<u32, ExportError> {
    let range_exceeded = |field: &'static str, count: usize, max: usize| {
        ExportError::RangeExceeded {
            mesh: mesh.name.clone(),
            field,
            count,
            max,
        }
    };

    if mesh.vertex_count() > MAX_VERTEX_COUNT {
        return Err(range_exceeded(
            "vertex count",
            mesh.vertex_count(),
            MAX_VERTEX_COUNT,
        ));
    }
    // Bounded by MAX_VERTEX_COUNT above
    let vertex_count = mesh.vertex_count() as u32;
    let index_count = u16::try_from(mesh.index_count())
        .map_err(|_| range_exceeded("index count", mesh.index_count(), MAX_INDEX_COUNT))?;

    write_chunk(w, CHUNK_MESH, |w| {
        w.write_bytes(&MeshChunkHeader::new(vertex_count).to_bytes())?;

        for vertex in &mesh.vertices {
            let components = vertex.position.to_array().into_iter();
            for component in components.chain(vertex.normal.to_array()) {
                w.write_f32(component)?;
            }
        }

        let list_length = w.reserve_u16()?;
        for &index in &mesh.indices {
            w.write_u16(index)?;
        }
        w.patch_u16(list_length, index_count)?;

        Ok(())
    })
}
