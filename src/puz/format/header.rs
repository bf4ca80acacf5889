//! .puz header parsing.
//!
//! # Header Structure
//! ```text
//! [2 bytes]  Whole-file checksum (little-endian)
//! [12 bytes] "ACROSS&DOWN\0"
//! [2 bytes]  CIB checksum
//! [4 bytes]  Masked low checksums
//! [4 bytes]  Masked high checksums
//! [N bytes]  Version string, null-terminated (usually "1.3\0")
//! [2 bytes]  Reserved
//! [2 bytes]  Scrambled checksum
//! [12 bytes] Reserved
//! [1 byte]   Width
//! [1 byte]   Height
//! [2 bytes]  Clue count
//! [2 bytes]  Puzzle type bitmask
//! [2 bytes]  Scrambled tag
//! ```

use log::{debug, info, trace};
use crate::puz::cursor::{decode_latin1, BinaryCursor};
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::PuzzleHeader;
use crate::puz::format::MAGIC;

/// Parses the header from the start of the buffer.
///
/// Fails with [`PuzError::InvalidFormat`] as soon as any available magic byte
/// differs from `"ACROSS&DOWN\0"`, and with [`PuzError::OutOfBounds`] when the
/// buffer ends early.
pub fn parse(cursor: &mut BinaryCursor<'_>) -> Result<PuzzleHeader> {
    info!("Parsing .puz header");

    let checksum = cursor.read_u16_le()?;
    check_magic(cursor)?;
    let magic = cursor.read_null_terminated_string()?;

    let cib_checksum = cursor.read_u16_le()?;
    let masked_low_checksums = cursor.read_byte_array::<4>()?;
    let masked_high_checksums = cursor.read_byte_array::<4>()?;
    let version = cursor.read_null_terminated_string()?;
    let reserved_1c = cursor.read_byte_array::<2>()?;
    let scrambled_checksum = cursor.read_u16_le()?;
    let reserved_20 = cursor.read_byte_array::<12>()?;
    trace!("Dimensions start at offset {:#06x}", cursor.position());
    let width = cursor.read_byte()?;
    let height = cursor.read_byte()?;
    let clue_count = cursor.read_u16_le()?;
    let puzzle_type = cursor.read_u16_le()?;
    let scrambled_tag = cursor.read_u16_le()?;

    debug!(
        "Header: version='{}', {}x{}, {} clue(s), type={:#06x}, scrambled={:#06x}",
        version, width, height, clue_count, puzzle_type, scrambled_tag
    );

    Ok(PuzzleHeader {
        checksum,
        magic,
        cib_checksum,
        masked_low_checksums,
        masked_high_checksums,
        version,
        reserved_1c,
        scrambled_checksum,
        reserved_20,
        width,
        height,
        clue_count,
        puzzle_type,
        scrambled_tag,
    })
}

/// Rejects a wrong magic string even when the buffer is too short to hold all of it.
fn check_magic(cursor: &BinaryCursor<'_>) -> Result<()> {
    let expected: Vec<u8> = MAGIC.bytes().chain(std::iter::once(0)).collect();
    let available = cursor.peek(expected.len());
    if !expected.starts_with(available) {
        return Err(PuzError::InvalidFormat(format!(
            "Expected magic string '{}', found '{}'",
            MAGIC,
            decode_latin1(available).trim_end_matches('\0')
        )));
    }
    Ok(())
}
