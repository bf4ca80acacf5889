//! Decoding orchestration: header, content, checksum verification, assembly.

use std::fs;
use std::path::Path;
use log::{info, warn};
use crate::puz::checksum::{cksum_region, text_checksum, ChecksumText};
use crate::puz::cursor::BinaryCursor;
use crate::puz::format::{content, header};
use crate::puz::format::content::RawContent;
use crate::puz::puzzle::Puzzle;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::PuzzleHeader;

/// Knobs for [`PuzzleDecoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DecodeOptions {
    /// Fail on checksum mismatches instead of logging them.
    pub verify_checksums: bool,
}

/// Decodes .puz buffers into linked, numbered [`Puzzle`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct PuzzleDecoder {
    options: DecodeOptions,
}

impl PuzzleDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// Decodes one puzzle from `buf`.
    ///
    /// # Errors
    /// - [`PuzError::InvalidFormat`] if the magic string is wrong
    /// - [`PuzError::OutOfBounds`] if the buffer is truncated
    /// - [`PuzError::MalformedRow`] / [`PuzError::CountMismatch`] if the grid
    ///   or clue counts are inconsistent
    /// - [`PuzError::ChecksumMismatch`] in strict mode only
    pub fn decode(&self, buf: &[u8]) -> Result<Puzzle> {
        info!("Decoding .puz buffer ({} bytes)", buf.len());
        let mut cursor = BinaryCursor::new(buf);

        let header = header::parse(&mut cursor)?;
        let raw = content::parse(&mut cursor, &header)?;
        self.check_checksums(&header, &raw)?;

        let rows = raw.rows()?;
        let puzzle = Puzzle::assemble(header, raw.text(), rows)?;

        info!(
            "Decoded '{}' by {}: {}x{}, {} across, {} down",
            puzzle.title,
            puzzle.author,
            puzzle.width(),
            puzzle.height(),
            puzzle.across_clues().len(),
            puzzle.down_clues().len()
        );
        Ok(puzzle)
    }

    /// Reads `path` and decodes its contents.
    pub fn decode_file(&self, path: impl AsRef<Path>) -> Result<Puzzle> {
        let path = path.as_ref();
        info!("Opening .puz file: {}", path.display());
        let buf = fs::read(path)?;
        self.decode(&buf)
    }

    fn check_checksums(&self, header: &PuzzleHeader, raw: &RawContent<'_>) -> Result<()> {
        let cib = cksum_region(&header.cib_bytes(), 0);
        self.compare("CIB", header.cib_checksum, cib)?;

        let mut file = cksum_region(&raw.solution_bytes(), cib);
        file = cksum_region(&raw.user_bytes(), file);
        file = text_checksum(
            &ChecksumText {
                title: raw.title,
                author: raw.author,
                copyright: raw.copyright,
                clues: &raw.clues,
                notes: raw.notes,
            },
            file,
        );
        self.compare("file", header.checksum, file)
    }

    fn compare(&self, region: &'static str, expected: u16, actual: u16) -> Result<()> {
        if expected == actual {
            return Ok(());
        }
        if self.options.verify_checksums {
            return Err(PuzError::ChecksumMismatch { region, expected, actual });
        }
        warn!(
            "{} checksum mismatch: expected={:#06x}, actual={:#06x}",
            region, expected, actual
        );
        Ok(())
    }
}

/// Decodes `buf` with default (lenient) options.
pub fn decode(buf: &[u8]) -> Result<Puzzle> {
    PuzzleDecoder::default().decode(buf)
}
