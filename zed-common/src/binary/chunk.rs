//! Chunk framer
//!
//! Writes `tag | length | body` where the length is only known once the body
//! has been written: a zero placeholder goes out first and is patched after
//! the body callback returns.

use std::io::{self, Seek, Write};

use super::BinaryWriter;
use crate::formats::{CHUNK_END, ChunkHeader};

/// Write one framed chunk and return its body size.
///
/// `body` writes the chunk payload through the same writer. When this
/// returns `Ok`, the cursor sits exactly at the end of the body, ready for
/// the next chunk or the terminator.
///
/// Fails if `tag` is the reserved terminator tag, if the body is empty, or
/// if the body does not fit in the `u32` length field. Errors from `body`
/// are returned unchanged; the chunk is then left unpatched.
pub fn write_chunk<W, E, F>(w: &mut BinaryWriter<W>, tag: u16, body: F) -> Result<u32, E>
where
    W: Write + Seek,
    E: From<io::Error>,
    F: FnOnce(&mut BinaryWriter<W>) -> Result<(), E>,
{
    if tag == CHUNK_END {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("chunk tag 0x{:04X} is reserved for the terminator", tag),
        )
        .into());
    }

    w.write_u16(tag)?;
    let length_field = w.reserve_u32()?;
    let body_start = w.tell();

    body(w)?;

    let body_size = w.tell() - body_start;
    if body_size == 0 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("chunk 0x{:04X} has an empty body", tag),
        )
        .into());
    }
    let body_size = u32::try_from(body_size).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "chunk 0x{:04X} body of {} bytes exceeds the u32 length field",
                tag, body_size
            ),
        )
    })?;

    w.patch_u32(length_field, body_size)?;
    debug_assert_eq!(w.tell(), body_start + u64::from(body_size));

    Ok(body_size)
}

/// Write the stream terminator (`0xFFFF` tag, zero length, no body)
pub fn write_chunk_end<W: Write + Seek>(w: &mut BinaryWriter<W>) -> io::Result<()> {
    w.write_bytes(&ChunkHeader::end().to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::CHUNK_MESH;
    use std::io::Cursor;

    fn new_writer() -> BinaryWriter<Cursor<Vec<u8>>> {
        BinaryWriter::new(Cursor::new(Vec::new()))
    }

    #[test]
    fn test_chunk_length_patched() {
        let mut w = new_writer();
        let size = write_chunk::<_, io::Error, _>(&mut w, CHUNK_MESH, |w| {
            w.write_u32(1)?;
            w.write_u16(2)
        })
        .unwrap();

        assert_eq!(size, 6);
        assert_eq!(w.tell(), 12);

        let bytes = w.into_inner().into_inner();
        let header = ChunkHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header, ChunkHeader::new(CHUNK_MESH, 6));
        assert_eq!(bytes.len(), ChunkHeader::SIZE + 6);
    }

    #[test]
    fn test_nested_patch_inside_chunk() {
        let mut w = new_writer();
        write_chunk::<_, io::Error, _>(&mut w, CHUNK_MESH, |w| {
            let count = w.reserve_u16()?;
            w.write_bytes(&[1, 0, 2, 0, 3, 0])?;
            w.patch_u16(count, 3)
        })
        .unwrap();
        write_chunk_end(&mut w).unwrap();

        let bytes = w.into_inner().into_inner();
        assert_eq!(&bytes[0..6], &[0x04, 0x00, 8, 0, 0, 0]);
        assert_eq!(&bytes[6..8], &[3, 0]);
        assert_eq!(&bytes[14..], &[0xFF, 0xFF, 0, 0, 0, 0]);
    }

    #[test]
    fn test_consecutive_chunks() {
        let mut w = new_writer();
        write_chunk::<_, io::Error, _>(&mut w, 0x0002, |w| w.write_bytes(&[0; 10])).unwrap();
        write_chunk::<_, io::Error, _>(&mut w, 0x0004, |w| w.write_bytes(&[0; 3])).unwrap();
        write_chunk_end(&mut w).unwrap();

        let bytes = w.into_inner().into_inner();
        let first = ChunkHeader::from_bytes(&bytes).unwrap();
        assert_eq!(first.length, 10);
        let second = ChunkHeader::from_bytes(&bytes[16..]).unwrap();
        assert_eq!(second, ChunkHeader::new(0x0004, 3));
        let end = ChunkHeader::from_bytes(&bytes[25..]).unwrap();
        assert!(end.is_end());
        assert_eq!(bytes.len(), 31);
    }

    #[test]
    fn test_empty_body_rejected() {
        let mut w = new_writer();
        let err = write_chunk::<_, io::Error, _>(&mut w, CHUNK_MESH, |_| Ok(())).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_reserved_tag_rejected() {
        let mut w = new_writer();
        let err =
            write_chunk::<_, io::Error, _>(&mut w, CHUNK_END, |w| w.write_u8(0)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(w.is_empty(), "nothing written for a rejected tag");
    }

    #[test]
    fn test_body_error_propagates() {
        #[derive(Debug)]
        #[allow(dead_code)]
        enum BodyError {
            Io(io::Error),
            Custom,
        }
        impl From<io::Error> for BodyError {
            fn from(e: io::Error) -> Self {
                BodyError::Io(e)
            }
        }

        let mut w = new_writer();
        let err = write_chunk(&mut w, CHUNK_MESH, |_| Err(BodyError::Custom)).unwrap_err();
        assert!(matches!(err, BodyError::Custom));
    }
}
