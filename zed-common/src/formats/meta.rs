//! Model-meta chunk body (tag `0x0002`)
//!
//! # Layout
//! ```text
//! 0x00: vertex_count u32
//! 0x04: index_count u32
//! 0x08: mesh_count u32
//! 0x0C: material_count u32 (always 0)
//! 0x10: name (64 bytes, ASCII, null filled)
//! 0x50: strip_counts 2 × u32 (always 0)
//! 0x58: list_counts 2 × u32 (triangle count, twice)
//! 0x60: fan_counts 2 × u32 (always 0)
//! 0x68: trailer 3 × u8 (format version)
//! ```
//!
//! The list-count pair stores the same triangle count twice. The two values
//! never differ; the duplication is kept for compatibility with existing
//! readers.

use super::ZED_VERSION;

/// Size of the fixed name field in bytes
pub const META_NAME_SIZE: usize = 64;

/// Model-meta chunk body (107 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelMetaChunk {
    pub vertex_count: u32,
    pub index_count: u32,
    pub mesh_count: u32,
    pub material_count: u32,
    pub name: [u8; META_NAME_SIZE],
    pub strip_counts: [u32; 2],
    pub list_counts: [u32; 2],
    pub fan_counts: [u32; 2],
    pub trailer: [u8; 3],
}

impl ModelMetaChunk {
    pub const SIZE: usize = 107;

    /// Build the meta body for a model. The list counts are derived from
    /// `index_count` (three indices per triangle).
    pub fn new(vertex_count: u32, index_count: u32, mesh_count: u32, name: &str) -> Self {
        let triangle_count = index_count / 3;
        Self {
            vertex_count,
            index_count,
            mesh_count,
            material_count: 0,
            name: encode_name(name),
            strip_counts: [0, 0],
            list_counts: [triangle_count, triangle_count],
            fan_counts: [0, 0],
            trailer: ZED_VERSION,
        }
    }

    pub fn triangle_count(&self) -> u32 {
        self.list_counts[0]
    }

    /// Name field with trailing nulls stripped
    pub fn name_str(&self) -> &str {
        let end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(META_NAME_SIZE);
        std::str::from_utf8(&self.name[..end]).unwrap_or("")
    }

    /// Write body to bytes
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0u8; Self::SIZE];
        bytes[0..4].copy_from_slice(&self.vertex_count.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.index_count.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.mesh_count.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.material_count.to_le_bytes());
        bytes[16..80].copy_from_slice(&self.name);

        let pairs = [self.strip_counts, self.list_counts, self.fan_counts];
        for (i, pair) in pairs.iter().enumerate() {
            let offset = 80 + i * 8;
            bytes[offset..offset + 4].copy_from_slice(&pair[0].to_le_bytes());
            bytes[offset + 4..offset + 8].copy_from_slice(&pair[1].to_le_bytes());
        }

        bytes[104..107].copy_from_slice(&self.trailer);
        bytes
    }

    /// Read body from bytes
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
        let mut name = [0u8; META_NAME_SIZE];
        name.copy_from_slice(&bytes[16..80]);

        Some(Self {
            vertex_count: u32_at(0),
            index_count: u32_at(4),
            mesh_count: u32_at(8),
            material_count: u32_at(12),
            name,
            strip_counts: [u32_at(80), u32_at(84)],
            list_counts: [u32_at(88), u32_at(92)],
            fan_counts: [u32_at(96), u32_at(100)],
            trailer: [bytes[104], bytes[105], bytes[106]],
        })
    }
}

/// Encode a model name into the fixed name field.
///
/// Non-ASCII characters become `?`. At most 63 bytes are kept so the field
/// always ends in a null.
fn encode_name(name: &str) -> [u8; META_NAME_SIZE] {
    let mut field = [0u8; META_NAME_SIZE];
    let ascii = name
        .chars()
        .map(|c| if c.is_ascii() && c != '\0' { c as u8 } else { b'?' })
        .take(META_NAME_SIZE - 1);
    for (slot, byte) in field.iter_mut().zip(ascii) {
        *slot = byte;
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_layout() {
        let meta = ModelMetaChunk::new(32, 168, 2, "Cube");
        let bytes = meta.to_bytes();

        assert_eq!(bytes.len(), 107);
        assert_eq!(&bytes[0..4], &32u32.to_le_bytes());
        assert_eq!(&bytes[4..8], &168u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &2u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &[0; 4]);
        assert_eq!(&bytes[16..20], b"Cube");
        assert!(bytes[20..80].iter().all(|&b| b == 0));
        assert_eq!(&bytes[80..88], &[0; 8]);
        assert_eq!(&bytes[88..92], &56u32.to_le_bytes());
        assert_eq!(&bytes[92..96], &56u32.to_le_bytes());
        assert_eq!(&bytes[96..104], &[0; 8]);
        assert_eq!(&bytes[104..107], &ZED_VERSION);
    }

    #[test]
    fn test_meta_name_truncation() {
        let long = "x".repeat(100);
        let meta = ModelMetaChunk::new(0, 0, 1, &long);
        assert_eq!(meta.name_str().len(), 63);
        assert_eq!(meta.name[63], 0);
    }

    #[test]
    fn test_meta_name_non_ascii() {
        let meta = ModelMetaChunk::new(0, 0, 1, "Würfel");
        assert_eq!(meta.name_str(), "W?rfel");
    }

    #[test]
    fn test_meta_parse_back() {
        let meta = ModelMetaChunk::new(8, 36, 1, "Crate");
        let parsed = ModelMetaChunk::from_bytes(&meta.to_bytes()).unwrap();
        assert_eq!(parsed, meta);
        assert_eq!(parsed.triangle_count(), 12);
        assert_eq!(parsed.name_str(), "Crate");
    }
}
