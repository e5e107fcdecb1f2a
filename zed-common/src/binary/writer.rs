//! Little-endian seekable writer

use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{self, Seek, SeekFrom, Write};

/// Writer for the ZED binary format
///
/// Tracks the cursor and the number of bytes written so far. Seeks are only
/// allowed inside the written range, so a backwards seek can revisit a
/// placeholder but never jump past the end of the data.
pub struct BinaryWriter<W: Write + Seek> {
    writer: W,
    pos: u64,
    len: u64,
}

impl<W: Write + Seek> BinaryWriter<W> {
    /// Create a new binary writer
    ///
    /// The sink must be empty and positioned at its start.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pos: 0,
            len: 0,
        }
    }

    /// Current cursor position
    pub fn tell(&self) -> u64 {
        self.pos
    }

    /// Number of bytes written so far (the furthest the cursor has been)
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.writer.write_u8(value)?;
        self.advance(1);
        Ok(())
    }

    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.writer.write_u16::<LittleEndian>(value)?;
        self.advance(2);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.writer.write_u32::<LittleEndian>(value)?;
        self.advance(4);
        Ok(())
    }

    pub fn write_f32(&mut self, value: f32) -> io::Result<()> {
        self.writer.write_f32::<LittleEndian>(value)?;
        self.advance(4);
        Ok(())
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.writer.write_all(bytes)?;
        self.advance(bytes.len() as u64);
        Ok(())
    }

    /// Move the cursor. `SeekFrom::End` is relative to the written length.
    ///
    /// Fails with `InvalidInput` if the target lies outside `0..=len()`.
    pub fn seek(&mut self, target: SeekFrom) -> io::Result<u64> {
        let (base, offset) = match target {
            SeekFrom::Start(offset) => (0, i128::from(offset)),
            SeekFrom::Current(offset) => (self.pos, i128::from(offset)),
            SeekFrom::End(offset) => (self.len, i128::from(offset)),
        };
        let dest = i128::from(base) + offset;
        if dest < 0 || dest > i128::from(self.len) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "seek to {} outside written range 0..={}",
                    dest, self.len
                ),
            ));
        }

        let dest = dest as u64;
        self.writer.seek(SeekFrom::Start(dest))?;
        self.pos = dest;
        Ok(dest)
    }

    /// Write a zero `u16` placeholder and return its offset
    pub fn reserve_u16(&mut self) -> io::Result<u64> {
        let at = self.pos;
        self.write_u16(0)?;
        Ok(at)
    }

    /// Write a zero `u32` placeholder and return its offset
    pub fn reserve_u32(&mut self) -> io::Result<u64> {
        let at = self.pos;
        self.write_u32(0)?;
        Ok(at)
    }

    /// Overwrite a previously written `u16` at `at`, then return the cursor
    /// to where it was.
    pub fn patch_u16(&mut self, at: u64, value: u16) -> io::Result<()> {
        self.patch(at, 2, |w| w.write_u16(value))
    }

    /// Overwrite a previously written `u32` at `at`, then return the cursor
    /// to where it was.
    pub fn patch_u32(&mut self, at: u64, value: u32) -> io::Result<()> {
        self.patch(at, 4, |w| w.write_u32(value))
    }

    /// Flush the underlying sink
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the writer and return the inner sink
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn patch<F>(&mut self, at: u64, width: u64, write: F) -> io::Result<()>
    where
        F: FnOnce(&mut Self) -> io::Result<()>,
    {
        if at.checked_add(width).is_none_or(|end| end > self.len) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "patch of {} bytes at {} outside written range 0..{}",
                    width, at, self.len
                ),
            ));
        }

        let resume = self.pos;
        self.seek(SeekFrom::Start(at))?;
        write(self)?;
        self.seek(SeekFrom::Start(resume))?;
        Ok(())
    }

    fn advance(&mut self, count: u64) {
        self.pos += count;
        self.len = self.len.max(self.pos);
    }
}
