//! Sequential byte reader over an in-memory .puz buffer.
//!
//! The cursor knows nothing about puzzles: it hands out fixed-width integers,
//! fixed-length strings, null-terminated strings and raw byte runs, advancing
//! an internal offset. Every read is bounds-checked and fails with
//! [`PuzError::OutOfBounds`] instead of panicking.

use byteorder::{ByteOrder, LittleEndian};
use encoding_rs::WINDOWS_1252;
use log::trace;
use crate::puz::types::error::{PuzError, Result};

/// Decodes single-byte text.
///
/// Crossword files are Latin-1. Like browsers, the `iso-8859-1` label is
/// treated as windows-1252, so every byte maps to exactly one `char`.
pub fn decode_latin1(bytes: &[u8]) -> String {
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    text.into_owned()
}

/// A monotonically advancing read head over an immutable byte buffer.
#[derive(Debug, Clone)]
pub struct BinaryCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BinaryCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Up to `len` bytes at the cursor, without advancing.
    pub fn peek(&self, len: usize) -> &'a [u8] {
        let end = (self.pos + len).min(self.buf.len());
        &self.buf[self.pos..end]
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if len > available {
            return Err(PuzError::OutOfBounds {
                offset: self.pos,
                requested: len,
                available,
            });
        }
        let bytes = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Reads a little-endian 16-bit word.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(LittleEndian::read_u16(bytes))
    }

    /// Reads `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        self.take(len)
    }

    /// Reads a byte array whose length is known at compile time.
    pub fn read_byte_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads `len` bytes as Latin-1 text.
    pub fn read_fixed_string(&mut self, len: usize) -> Result<String> {
        self.take(len).map(decode_latin1)
    }

    /// Reads up to the next zero byte and steps past it, returning the bytes
    /// without the terminator.
    pub fn read_null_terminated_bytes(&mut self) -> Result<&'a [u8]> {
        let rest = &self.buf[self.pos..];
        let Some(len) = rest.iter().position(|b| *b == 0) else {
            return Err(PuzError::OutOfBounds {
                offset: self.pos,
                requested: rest.len() + 1,
                available: rest.len(),
            });
        };
        trace!("Null-terminated run at {:#06x}: {} byte(s)", self.pos, len);
        let bytes = self.take(len)?;
        self.pos += 1;
        Ok(bytes)
    }

    /// Reads a null-terminated Latin-1 string.
    pub fn read_null_terminated_string(&mut self) -> Result<String> {
        self.read_null_terminated_bytes().map(decode_latin1)
    }
}
