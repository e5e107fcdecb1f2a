//! Types and constants for mesh conversion

use glam::{Mat4, Vec3};
use smallvec::SmallVec;
use zed_common::MAX_INDEX_VALUE;

/// Maximum vertices per mesh (every vertex must be addressable by a u16 index)
pub const MAX_VERTEX_COUNT: usize = MAX_INDEX_VALUE as usize;

/// Maximum indices per mesh (the in-chunk list length is a u16)
pub const MAX_INDEX_COUNT: usize = u16::MAX as usize;

/// Position and normal of one vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

/// Vertex indices of one polygon, stored inline for triangles and quads
pub type PolygonIndices = SmallVec<[u32; 4]>;

/// A face of a mesh, as authored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polygon {
    pub indices: PolygonIndices,
}

impl Polygon {
    pub fn new(indices: impl IntoIterator<Item = u32>) -> Self {
        Self {
            indices: indices.into_iter().collect(),
        }
    }

    pub fn triangle(a: u32, b: u32, c: u32) -> Self {
        Self::new([a, b, c])
    }

    pub fn quad(a: u32, b: u32, c: u32, d: u32) -> Self {
        Self::new([a, b, c, d])
    }

    pub fn arity(&self) -> usize {
        self.indices.len()
    }
}

/// A mesh object supplied by the host: local-space vertices, polygons and
/// the object's world transform
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub polygons: Vec<Polygon>,
    pub transform: Mat4,
}

impl Mesh {
    /// Empty mesh with an identity transform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vertices: Vec::new(),
            polygons: Vec::new(),
            transform: Mat4::IDENTITY,
        }
    }

    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = transform;
        self
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// Meshes exported together into one file
#[derive(Debug, Clone, Copy)]
pub struct Model<'a> {
    /// Name written to the meta chunk
    pub name: &'a str,
    pub meshes: &'a [Mesh],
}

impl<'a> Model<'a> {
    pub fn new(name: &'a str, meshes: &'a [Mesh]) -> Self {
        Self { name, meshes }
    }
}

/// A mesh converted to the file's layout: world-space vertices in the output
/// axis convention and a flat triangle list of u16 indices
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedMesh {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl NormalizedMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Index triples, one per triangle
    pub fn triangles(&self) -> impl Iterator<Item = [u16; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}
