//! Mesh sources and conversion (OBJ/glTF -> normalized triangle lists)

mod gltf;
mod normalize;
mod normals;
mod obj;
mod types;

use anyhow::{Result, bail};
use std::path::Path;

use crate::error::ExportError;

// Re-export public API
pub use self::gltf::load_gltf;
pub use self::normalize::normalize;
pub use self::normals::compute_vertex_normals;
pub use self::obj::{load_obj, parse_obj};
pub use self::types::{
    MAX_INDEX_COUNT, MAX_VERTEX_COUNT, Mesh, Model, NormalizedMesh, Polygon, PolygonIndices,
    Vertex,
};

/// Load all meshes from a source file, detecting the format by extension
pub fn load_meshes(input: &Path) -> Result<Vec<Mesh>> {
    let ext = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "obj" => load_obj(input),
        "gltf" | "glb" => load_gltf(input),
        _ => bail!(
            "Unsupported mesh format: {:?} (use .obj, .gltf, or .glb)",
            input
        ),
    }
}

/// Keep the meshes named in `objects`, in source order.
///
/// An empty `objects` list selects everything. A name also selects the
/// per-primitive meshes of a multi-primitive object (`Name.0`, `Name.1`, ...).
/// Fails if there is nothing to export or a requested object does not exist.
pub fn select_meshes(meshes: Vec<Mesh>, objects: &[String]) -> Result<Vec<Mesh>, ExportError> {
    if meshes.is_empty() {
        return Err(ExportError::Selection("no mesh objects in source".to_string()));
    }
    if objects.is_empty() {
        return Ok(meshes);
    }

    let selects = |mesh: &Mesh, object: &str| {
        mesh.name == object
            || mesh
                .name
                .strip_prefix(object)
                .and_then(|rest| rest.strip_prefix('.'))
                .is_some_and(|suffix| suffix.parse::<usize>().is_ok())
    };

    if let Some(missing) = objects
        .iter()
        .find(|object| !meshes.iter().any(|mesh| selects(mesh, object.as_str())))
    {
        return Err(ExportError::Selection(format!(
            "object '{}' is not a mesh in the source",
            missing
        )));
    }

    Ok(meshes
        .into_iter()
        .filter(|mesh| objects.iter().any(|object| selects(mesh, object.as_str())))
        .collect())
}
