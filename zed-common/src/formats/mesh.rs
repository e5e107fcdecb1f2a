//! Mesh-geometry chunk (tag `0x0004`)
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: material_id u32 (always 0)
//! 0x08: strip_count u32 (always 0)
//! 0x0C: list_count u32 (always 1)
//! 0x10: fan_count u32 (always 0)
//! 0x14: vertices (vertex_count × 24 bytes: position 3 × f32, normal 3 × f32)
//! var:  index_list_length u16
//! var:  indices (index_list_length × u16)
//! ```

use super::MESH_VERTEX_SIZE;

/// Fixed header at the start of a mesh chunk body (20 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct MeshChunkHeader {
    pub vertex_count: u32,
    pub material_id: u32,
    pub strip_count: u32,
    pub list_count: u32,
    pub fan_count: u32,
}

impl MeshChunkHeader {
    pub const SIZE: usize = 20;

    /// Header for a mesh with a single triangle list and no material
    pub fn new(vertex_count: u32) -> Self {
        Self {
            vertex_count,
            material_id: 0,
            strip_count: 0,
            list_count: 1,
            fan_count: 0,
        }
    }

    /// Total body size of a mesh chunk with this header and `index_count` indices
    pub fn body_size(&self, index_count: usize) -> usize {
        Self::SIZE + self.vertex_count as usize * MESH_VERTEX_SIZE + 2 + index_count * 2
    }

    /// Write header to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.material_id.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.strip_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.list_count.to_le_bytes());
        bytes[16..20].copy_from_slice(&self.fan_count.to_le_bytes());
        bytes
    }

    /// Read header from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < Self::SIZE {
            return None;
        }
        let u32_at = |offset: usize| {
            u32::from_le_bytes([
                bytes[offset],
                bytes[offset + 1],
                bytes[offset + 2],
                bytes[offset + 3],
            ])
        };
        Some(Self {
            vertex_count: u32_at(0),
            material_id: u32_at(4),
            strip_count: u32_at(8),
            list_count: u32_at(12),
            fan_count: u32_at(16),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_header_defaults() {
        let header = MeshChunkHeader::new(8);
        assert_eq!(header.material_id, 0);
        assert_eq!(header.strip_count, 0);
        assert_eq!(header.list_count, 1);
        assert_eq!(header.fan_count, 0);

        let bytes = header.to_bytes();
        assert_eq!(&bytes[0..4], &8u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &1u32.to_le_bytes());
    }

    #[test]
    fn test_mesh_body_size() {
        // 4 vertices, 6 indices (one quad)
        let header = MeshChunkHeader::new(4);
        assert_eq!(header.body_size(6), 20 + 96 + 2 + 12);
    }
}
