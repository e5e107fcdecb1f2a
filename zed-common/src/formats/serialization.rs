//! Binary serialization trait for fixed-size format structures.
//!
//! Every fixed-size ZED structure implements `BinarySerializable` so generic
//! code (such as tests that walk a file) can treat them uniformly, while
//! each type keeps its own `to_bytes()` returning a fixed-size array.

/// Trait for fixed-size, binary-serializable format structures.
///
/// The trait returns `Vec<u8>` because associated consts cannot size a
/// return array (`[u8; Self::SIZE]`) on stable Rust.
///
/// # Example
///
/// ```
/// use zed_common::formats::{BinarySerializable, ChunkHeader, CHUNK_MESH};
///
/// let header = ChunkHeader::new(CHUNK_MESH, 42);
/// let bytes = header.serialize();
/// let parsed = ChunkHeader::deserialize(&bytes).unwrap();
/// assert_eq!(parsed.length, 42);
/// ```
pub trait BinarySerializable: Sized {
    /// Size of the serialized structure in bytes.
    const SIZE: usize;

    /// Serialize to bytes.
    fn serialize(&self) -> Vec<u8>;

    /// Deserialize from bytes.
    ///
    /// Returns `None` if the byte slice is too short or contains invalid data.
    fn deserialize(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_binary_serializable {
    ($($ty:ty),* $(,)?) => {
        $(
            impl BinarySerializable for $ty {
                const SIZE: usize = <$ty>::SIZE;

                fn serialize(&self) -> Vec<u8> {
                    self.to_bytes().to_vec()
                }

                fn deserialize(bytes: &[u8]) -> Option<Self> {
                    Self::from_bytes(bytes)
                }
            }
        )*
    };
}

impl_binary_serializable!(
    super::ZedFileHeader,
    super::ChunkHeader,
    super::ModelMetaChunk,
    super::MeshChunkHeader,
);
