//! Format-level properties of encoded models, checked through the library API


use glam::{Mat4, Vec3};
use std::io::{self, Cursor, Seek, SeekFrom, Write};

use zed_common::{CHUNK_END, ChunkHeader, ZED_MAGIC, ZedFileHeader};
use zed_export::{
    AxisConvention, ExportError, ExportOptions, Mesh, Model, Polygon, Vertex, encode_model,
};

fn vertex(x: f32, y: f32, z: f32) -> Vertex {
    Vertex::new(Vec3::new(x, y, z), Vec3::Z)
}

fn quad_mesh(name: &str) -> Mesh {
    let mut mesh = Mesh::new(name);
    mesh.vertices = vec![
        vertex(0.0, 0.0, 0.0),
        vertex(1.0, 0.0, 0.0),
        vertex(1.0, 1.0, 0.0),
        vertex(0.0, 1.0, 0.0),
    ];
    mesh.polygons = vec![Polygon::quad(0, 1, 2, 3)];
    mesh
}

/// Mesh with `vertex_count` vertices and `triangle_count` triangles
fn strip_mesh(name: &str, vertex_count: u32, triangle_count: u32) -> Mesh {
    let mut mesh = Mesh::new(name);
    mesh.vertices = (0..vertex_count)
        .map(|i| vertex(i as f32, (i % 2) as f32, 0.0))
        .collect();
    mesh.polygons = (0..triangle_count)
        .map(|i| {
            Polygon::triangle(
                i % vertex_count,
                (i + 1) % vertex_count,
                (i + 2) % vertex_count,
            )
        })
        .collect();
    mesh
}

fn encode(meshes: &[Mesh], options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
    let mut cursor = Cursor::new(Vec::new());
    encode_model(&mut cursor, &Model::new("Props", meshes), options)?;
    Ok(cursor.into_inner())
}

#[test]
fn test_header_invariant() {
    let data = encode(&[quad_mesh("A")], &ExportOptions::default()).unwrap();

    assert_eq!(&data[0..4], &ZED_MAGIC);
    assert_eq!(data[7], 1, "Patch version at byte 7");
    assert_eq!(&data[8..12], &[0, 0, 0, 0]);

    // First chunk starts right after the 12-byte header
    let first = ChunkHeader::from_bytes(&data[ZedFileHeader::SIZE..]).unwrap();
    assert_eq!(first.tag, 0x0002);
}

#[test]
fn test_chunk_lengths_walk_to_end() {
    let meshes = [quad_mesh("A"), strip_mesh("B", 10, 7), quad_mesh("C")];
    let data = encode(&meshes, &ExportOptions::default()).unwrap();

    // parse_zed checks every declared length and that the walk ends exactly
    // at the end of the data
    let file = zed_reader::parse_zed(&data);
    assert_eq!(file.meshes.len(), 3);
    assert_eq!(file.meshes[1].header.vertex_count, 10);
    assert_eq!(file.meshes[1].indices.len(), 21);
}

#[test]
fn test_single_terminator() {
    let data = encode(&[quad_mesh("A"), quad_mesh("B")], &ExportOptions::default()).unwrap();
    let file = zed_reader::parse_zed(&data);

    assert_eq!(file.tags.iter().filter(|&&t| t == CHUNK_END).count(), 1);
    assert_eq!(file.tags.last(), Some(&CHUNK_END));
    assert_eq!(&data[data.len() - 6..], &[0xFF, 0xFF, 0, 0, 0, 0]);
}

#[test]
fn test_quad_triangulation() {
    let data = encode(&[quad_mesh("Q")], &ExportOptions::default()).unwrap();
    let file = zed_reader::parse_zed(&data);
    assert_eq!(file.meshes[0].indices, vec![0, 1, 2, 0, 2, 3]);
    assert_eq!(file.meta.list_counts, [2, 2]);

    let flipped = ExportOptions::new(AxisConvention::AsAuthored, true);
    let data = encode(&[quad_mesh("Q")], &flipped).unwrap();
    let file = zed_reader::parse_zed(&data);
    assert_eq!(file.meshes[0].indices, vec![2, 1, 0, 3, 2, 0]);
}

#[test]
fn test_vertex_range_boundary() {
    let at_limit = strip_mesh("Max", 65535, 1);
    let data = encode(&[at_limit], &ExportOptions::default()).unwrap();
    let file = zed_reader::parse_zed(&data);
    assert_eq!(file.meshes[0].header.vertex_count, 65535);

    let over = strip_mesh("Over", 65536, 1);
    let mut cursor = Cursor::new(Vec::new());
    let err = encode_model(
        &mut cursor,
        &Model::new("Over", std::slice::from_ref(&over)),
        &ExportOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(err, ExportError::RangeExceeded { count: 65536, .. }));
    assert!(cursor.get_ref().is_empty(), "Nothing written on range error");
}

#[test]
fn test_aggregate_counts() {
    let meshes = [strip_mesh("A", 8, 12), strip_mesh("B", 24, 44)];
    let data = encode(&meshes, &ExportOptions::default()).unwrap();
    let file = zed_reader::parse_zed(&data);

    assert_eq!(file.meta.index_count, 168);
    assert_eq!(file.meta.list_counts, [56, 56]);
    assert_eq!(file.meta.mesh_count, 2);
    assert_eq!(file.meta.vertex_count, 32);
    assert_eq!(file.meta.material_count, 0);
}

#[test]
fn test_encoding_is_deterministic() {
    let meshes = [quad_mesh("A"), strip_mesh("B", 5, 3)];
    let options = ExportOptions::new(AxisConvention::ZUpToYUp, true);
    let first = encode(&meshes, &options).unwrap();
    let second = encode(&meshes, &options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_mesh_order_preserved() {
    let meshes = [
        strip_mesh("A", 3, 1),
        strip_mesh("B", 4, 2),
        strip_mesh("C", 5, 3),
    ];
    let data = encode(&meshes, &ExportOptions::default()).unwrap();
    let file = zed_reader::parse_zed(&data);

    let counts: Vec<u32> = file.meshes.iter().map(|m| m.header.vertex_count).collect();
    assert_eq!(counts, vec![3, 4, 5]);
}

#[test]
fn test_world_transform_and_axis() {
    let mesh = quad_mesh("Moved").with_transform(Mat4::from_scale_rotation_translation(
        Vec3::splat(2.0),
        glam::Quat::IDENTITY,
        Vec3::new(0.0, 0.0, 3.0),
    ));
    let options = ExportOptions::new(AxisConvention::ZUpToYUp, false);
    let data = encode(&[mesh], &options).unwrap();
    let file = zed_reader::parse_zed(&data);

    let (position, normal) = file.meshes[0].vertices[2];
    // (1, 1, 0) scaled to (2, 2, 0), moved to (2, 2, 3), then Z-up to Y-up
    assert_eq!(position, [2.0, 3.0, -2.0]);
    // Scale does not reach normals
    assert_eq!(normal, [0.0, 1.0, 0.0]);
}

/// Sink that fails every write after `limit` bytes
struct FailingSink {
    inner: Cursor<Vec<u8>>,
    limit: usize,
}

impl Write for FailingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.inner.get_ref().len() + buf.len() > self.limit {
            return Err(io::Error::other("disk full"));
        }
        self.inner.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Seek for FailingSink {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

#[test]
fn test_sink_failure_is_io_error() {
    let sink = FailingSink {
        inner: Cursor::new(Vec::new()),
        limit: 64,
    };
    let meshes = [quad_mesh("A")];
    let err = encode_model(sink, &Model::new("M", &meshes), &ExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, ExportError::Io(_)));
}
