//! OBJ mesh loading
//!
//! Every `o` or `g` statement starts a new mesh, so a multi-object OBJ maps
//! onto a multi-mesh model. Faces keep their authored arity; n-gons are
//! rejected later by the normalizer rather than silently fanned here.
//!
//! A position referenced with several `vn` normals gets their normalized
//! average, independent of face order.

use anyhow::{Context, Result, bail};
use glam::Vec3;
use hashbrown::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::normals::compute_vertex_normals;
use super::types::{Mesh, Polygon, Vertex};

/// Load every object in an OBJ file as a separate mesh
pub fn load_obj(input: &Path) -> Result<Vec<Mesh>> {
    let file = File::open(input).with_context(|| format!("Failed to open OBJ: {:?}", input))?;
    let default_name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "mesh".to_string());

    let meshes = parse_obj(BufReader::new(file), &default_name)
        .with_context(|| format!("Failed to parse OBJ: {:?}", input))?;

    tracing::info!("Loaded {} mesh(es) from {:?}", meshes.len(), input);
    Ok(meshes)
}

/// Parse OBJ text. Faces before the first `o`/`g` go into a mesh named
/// `default_name`.
pub fn parse_obj<R: BufRead>(reader: R, default_name: &str) -> Result<Vec<Mesh>> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();

    let mut meshes = Vec::new();
    let mut current = ObjectBuilder::new(default_name);

    for (line_index, line) in reader.lines().enumerate() {
        let line_no = line_index + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0] {
            "v" => positions.push(parse_vec3(&parts, line_no)?),
            "vn" => normals.push(parse_vec3(&parts, line_no)?),
            "o" | "g" => {
                let name = parts[1..].join(" ");
                let name = if name.is_empty() { default_name } else { name.as_str() };
                if current.is_empty() {
                    current.name = name.to_string();
                } else {
                    let finished = std::mem::replace(&mut current, ObjectBuilder::new(name));
                    meshes.push(finished.build(&positions));
                }
            }
            "f" => {
                let mut corners = Vec::with_capacity(parts.len() - 1);
                for token in &parts[1..] {
                    let (vi, vni) = parse_obj_vertex(token, positions.len(), normals.len())
                        .with_context(|| {
                            format!("Invalid face vertex '{}' on line {}", token, line_no)
                        })?;
                    corners.push(current.corner(vi, vni.map(|n| normals[n])));
                }
                current.polygons.push(Polygon::new(corners));
            }
            // vt, s, usemtl, mtllib, ... carry nothing the format stores
            _ => {}
        }
    }

    if !current.is_empty() {
        meshes.push(current.build(&positions));
    }

    if meshes.is_empty() {
        bail!("No faces found in OBJ file");
    }

    Ok(meshes)
}

/// Faces of one OBJ object, with file-global position indices remapped to
/// mesh-local ones in first-use order
struct ObjectBuilder {
    name: String,
    local_index: HashMap<usize, u32>,
    source_positions: Vec<usize>,
    /// Sum of the `vn` normals referenced for each local vertex
    normal_sums: Vec<Vec3>,
    polygons: Vec<Polygon>,
}

impl ObjectBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_index: HashMap::new(),
            source_positions: Vec::new(),
            normal_sums: Vec::new(),
            polygons: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Local index for a global position, accumulating its normal
    fn corner(&mut self, position: usize, normal: Option<Vec3>) -> u32 {
        let next = self.source_positions.len() as u32;
        let local = *self.local_index.entry(position).or_insert(next);
        if local == next {
            self.source_positions.push(position);
            self.normal_sums.push(Vec3::ZERO);
        }
        if let Some(normal) = normal.and_then(Vec3::try_normalize) {
            self.normal_sums[local as usize] += normal;
        }
        local
    }

    fn build(self, positions: &[Vec3]) -> Mesh {
        let local_positions: Vec<Vec3> =
            self.source_positions.iter().map(|&i| positions[i]).collect();

        // Positions with no usable `vn` (none given, or opposing normals
        // that cancel) fall back to face normals
        let averaged: Vec<Option<Vec3>> =
            self.normal_sums.iter().map(|sum| sum.try_normalize()).collect();
        let computed = if averaged.iter().any(Option::is_none) {
            compute_vertex_normals(&local_positions, &self.polygons)
        } else {
            Vec::new()
        };

        let vertices = local_positions
            .iter()
            .zip(&averaged)
            .enumerate()
            .map(|(i, (&position, normal))| {
                Vertex::new(position, normal.unwrap_or_else(|| computed[i]))
            })
            .collect();

        let mut mesh = Mesh::new(self.name);
        mesh.vertices = vertices;
        mesh.polygons = self.polygons;
        mesh
    }
}

fn parse_vec3(parts: &[&str], line_no: usize) -> Result<Vec3> {
    if parts.len() < 4 {
        bail!("Expected 3 components on line {}", line_no);
    }
    let mut v = [0.0f32; 3];
    for (slot, part) in v.iter_mut().zip(&parts[1..4]) {
        *slot = part
            .parse()
            .with_context(|| format!("Invalid number '{}' on line {}", part, line_no))?;
    }
    Ok(Vec3::from(v))
}

/// Parse OBJ vertex reference: "v", "v/vt", "v/vt/vn", or "v//vn".
///
/// Returns zero-based (position, normal) indices. OBJ indices are 1-based;
/// negative indices count back from the most recent element.
fn parse_obj_vertex(
    s: &str,
    position_count: usize,
    normal_count: usize,
) -> Option<(usize, Option<usize>)> {
    let parts: Vec<&str> = s.split('/').collect();

    let vi = resolve_index(parts.first()?, position_count)?;

    let vni = match parts.get(2).filter(|s| !s.is_empty()) {
        Some(s) => Some(resolve_index(s, normal_count)?),
        None => None,
    };

    Some((vi, vni))
}

fn resolve_index(s: &str, count: usize) -> Option<usize> {
    let raw: i64 = s.parse().ok()?;
    let index = if raw > 0 {
        usize::try_from(raw - 1).ok()?
    } else if raw < 0 {
        count.checked_sub(usize::try_from(raw.unsigned_abs()).ok()?)?
    } else {
        return None;
    };
    (index < count).then_some(index)
}
