//! Vertex normal generation for sources that do not provide normals

use glam::Vec3;

use super::types::Polygon;

/// Fallback for vertices that touch no (non-degenerate) face
const DEFAULT_NORMAL: Vec3 = Vec3::Y;

/// Area-weighted vertex normals.
///
/// Each polygon is fanned from its first corner; every triangle's
/// unnormalized cross product (twice its area) is added to its corners.
/// Polygons with fewer than three corners or out-of-range indices are
/// skipped here and reported by the normalizer.
pub fn compute_vertex_normals(positions: &[Vec3], polygons: &[Polygon]) -> Vec<Vec3> {
    let mut accumulated = vec![Vec3::ZERO; positions.len()];

    for polygon in polygons {
        let corners = polygon.indices.as_slice();
        if corners.len() < 3 || corners.iter().any(|&i| i as usize >= positions.len()) {
            continue;
        }

        let origin = corners[0] as usize;
        for pair in corners[1..].windows(2) {
            let (b, c) = (pair[0] as usize, pair[1] as usize);
            let face = (positions[b] - positions[origin]).cross(positions[c] - positions[origin]);
            accumulated[origin] += face;
            accumulated[b] += face;
            accumulated[c] += face;
        }
    }

    accumulated
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(DEFAULT_NORMAL))
        .collect()
}
