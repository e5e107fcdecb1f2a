//! glTF/GLB mesh loading
//!
//! Walks the default scene (or the first scene when none is marked default)
//! and emits one [`Mesh`] per triangle-list primitive, carrying the owning
//! node's world transform. Vertex data stays in node-local space; the
//! normalizer applies the transform.

use anyhow::{Context, Result, bail};
use glam::{Mat4, Vec3};
use std::path::Path;

use super::normals::compute_vertex_normals;
use super::types::{Mesh, Polygon, Vertex};

/// Load every mesh instance in the scene
pub fn load_gltf(input: &Path) -> Result<Vec<Mesh>> {
    let (document, buffers, _images) =
        gltf::import(input).with_context(|| format!("Failed to load glTF: {:?}", input))?;

    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .context("No scenes found in glTF")?;

    let mut meshes = Vec::new();
    for node in scene.nodes() {
        collect_node(&node, Mat4::IDENTITY, &buffers, &mut meshes)?;
    }

    tracing::info!(
        "Loaded {} mesh(es) from scene '{}' in {:?}",
        meshes.len(),
        scene.name().unwrap_or("unnamed"),
        input
    );
    Ok(meshes)
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    meshes: &mut Vec<Mesh>,
) -> Result<()> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        let object_name = node
            .name()
            .or_else(|| mesh.name())
            .map(str::to_string)
            .unwrap_or_else(|| format!("mesh{}", mesh.index()));
        let primitive_count = mesh.primitives().len();

        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                tracing::warn!(
                    "Skipping primitive {} of '{}': mode {:?} is not a triangle list",
                    primitive.index(),
                    object_name,
                    primitive.mode()
                );
                continue;
            }

            let name = if primitive_count > 1 {
                format!("{}.{}", object_name, primitive.index())
            } else {
                object_name.clone()
            };

            let mut converted = read_primitive(&primitive, buffers, &name)?;
            converted.transform = world;
            meshes.push(converted);
        }
    }

    for child in node.children() {
        collect_node(&child, world, buffers, meshes)?;
    }

    Ok(())
}

fn read_primitive(
    primitive: &gltf::Primitive,
    buffers: &[gltf::buffer::Data],
    name: &str,
) -> Result<Mesh> {
    let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

    // Positions (required)
    let positions: Vec<Vec3> = reader
        .read_positions()
        .with_context(|| format!("No positions in mesh '{}'", name))?
        .map(Vec3::from)
        .collect();

    // Non-indexed primitives draw their vertices in order
    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    if indices.len() % 3 != 0 {
        bail!(
            "Mesh '{}' has {} indices, not a whole number of triangles",
            name,
            indices.len()
        );
    }

    let polygons: Vec<Polygon> = indices
        .chunks_exact(3)
        .map(|t| Polygon::triangle(t[0], t[1], t[2]))
        .collect();

    // Normals (optional)
    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(iter) => iter.map(Vec3::from).collect(),
        None => {
            tracing::debug!("Mesh '{}' has no normals, computing them", name);
            compute_vertex_normals(&positions, &polygons)
        }
    };

    if normals.len() != positions.len() {
        bail!(
            "Mesh '{}' has {} normals for {} positions",
            name,
            normals.len(),
            positions.len()
        );
    }

    let mut mesh = Mesh::new(name);
    mesh.vertices = positions
        .into_iter()
        .zip(normals)
        .map(|(position, normal)| Vertex::new(position, normal))
        .collect();
    mesh.polygons = polygons;
    Ok(mesh)
}
