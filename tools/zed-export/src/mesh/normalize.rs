//! Geometry normalizer
//!
//! Converts an authored [`Mesh`] into a [`NormalizedMesh`]:
//!
//! 1. Range check: more than 65535 vertices cannot be indexed by u16.
//! 2. Vertex pass: world transform on positions, rotation only on normals,
//!    then the axis remap.
//! 3. Triangulation pass: triangles pass through, quads split along the
//!    (v0, v2) diagonal, winding optionally reversed.
//!
//! Quads are not checked for planarity or convexity. A concave or twisted
//! quad still yields two valid triangles, they just may not match the
//! authored surface.

use glam::{Mat3, Mat4, Quat};

use super::types::{MAX_INDEX_COUNT, MAX_VERTEX_COUNT, Mesh, NormalizedMesh, Vertex};
use crate::error::ExportError;
use crate::options::AxisConvention;

/// Normalize one mesh for encoding
pub fn normalize(
    mesh: &Mesh,
    axis: AxisConvention,
    flip_winding: bool,
) -> Result<NormalizedMesh, ExportError> {
    let vertex_count = mesh.vertex_count();
    if vertex_count > MAX_VERTEX_COUNT {
        return Err(ExportError::RangeExceeded {
            mesh: mesh.name.clone(),
            field: "vertex count",
            count: vertex_count,
            max: MAX_VERTEX_COUNT,
        });
    }

    let rotation = normal_rotation(mesh.transform);

    let vertices = mesh
        .vertices
        .iter()
        .map(|v| {
            Vertex::new(
                axis.apply(mesh.transform.transform_point3(v.position)),
                axis.apply((rotation * v.normal).try_normalize().unwrap_or(v.normal)),
            )
        })
        .collect();

    let mut indices: Vec<u16> = Vec::with_capacity(mesh.polygons.len() * 6);

    for (polygon_index, polygon) in mesh.polygons.iter().enumerate() {
        let arity = polygon.arity();
        if arity != 3 && arity != 4 {
            return Err(ExportError::UnsupportedTopology {
                mesh: mesh.name.clone(),
                polygon: polygon_index,
                arity,
            });
        }

        // Valid indices are < vertex_count <= 65535, so they fit in u16
        let mut corners = [0u16; 4];
        for (corner, &index) in corners.iter_mut().zip(&polygon.indices) {
            if index as usize >= vertex_count {
                return Err(ExportError::InvalidIndex {
                    mesh: mesh.name.clone(),
                    polygon: polygon_index,
                    index,
                    vertex_count,
                });
            }
            *corner = index as u16;
        }

        let [i0, i1, i2, i3] = corners;
        push_triangle(&mut indices, [i0, i1, i2], flip_winding);
        if arity == 4 {
            push_triangle(&mut indices, [i0, i2, i3], flip_winding);
        }
    }

    if indices.len() > MAX_INDEX_COUNT {
        return Err(ExportError::RangeExceeded {
            mesh: mesh.name.clone(),
            field: "index count",
            count: indices.len(),
            max: MAX_INDEX_COUNT,
        });
    }

    tracing::debug!(
        "Normalized mesh '{}': {} vertices, {} triangles",
        mesh.name,
        vertex_count,
        indices.len() / 3
    );

    Ok(NormalizedMesh {
        name: mesh.name.clone(),
        vertices,
        indices,
    })
}

/// Rotation part of a world transform, applied to normals.
///
/// A transform that collapses an axis (zero scale) has no recoverable
/// rotation; normals then keep their authored direction.
fn normal_rotation(transform: Mat4) -> Quat {
    let determinant = Mat3::from_mat4(transform).determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return Quat::IDENTITY;
    }
    let (_scale, rotation, _translation) = transform.to_scale_rotation_translation();
    if rotation.is_finite() {
        rotation
    } else {
        Quat::IDENTITY
    }
}

fn push_triangle(indices: &mut Vec<u16>, [a, b, c]: [u16; 3], flip_winding: bool) {
    if flip_winding {
        indices.extend_from_slice(&[c, b, a]);
    } else {
        indices.extend_from_slice(&[a, b, c]);
    }
}
