//! Grid and string section decoding.
//!
//! After the header come `height` solution rows, `height` user-state rows
//! (each exactly `width` bytes), then title, author, copyright, `clue_count`
//! clues and the notes, all null-terminated.

use log::{debug, trace};
use crate::puz::cursor::{decode_latin1, BinaryCursor};
use crate::puz::puzzle::PuzzleText;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, PuzzleHeader};

/// Undecoded body sections, borrowed from the input buffer.
#[derive(Debug)]
pub struct RawContent<'a> {
    pub solution_rows: Vec<&'a [u8]>,
    pub user_rows: Vec<&'a [u8]>,
    pub title: &'a [u8],
    pub author: &'a [u8],
    pub copyright: &'a [u8],
    pub clues: Vec<&'a [u8]>,
    pub notes: &'a [u8],
}

impl RawContent<'_> {
    /// Both grids back to back, as the whole-file checksum covers them.
    pub fn solution_bytes(&self) -> Vec<u8> {
        self.solution_rows.concat()
    }

    pub fn user_bytes(&self) -> Vec<u8> {
        self.user_rows.concat()
    }

    /// Decodes the string section as Latin-1.
    pub fn text(&self) -> PuzzleText {
        PuzzleText {
            title: decode_latin1(self.title),
            author: decode_latin1(self.author),
            copyright: decode_latin1(self.copyright),
            clues: self.clues.iter().map(|c| decode_latin1(c)).collect(),
            notes: decode_latin1(self.notes),
        }
    }

    /// Pairs each solution row with its user-state row and builds cells.
    pub fn rows(&self) -> Result<Vec<Vec<Cell>>> {
        self.solution_rows
            .iter()
            .zip(&self.user_rows)
            .enumerate()
            .map(|(row, (solution, user))| {
                build_row(row, &decode_latin1(solution), &decode_latin1(user))
            })
            .collect()
    }
}

/// Reads the grids and strings that follow the header.
pub fn parse<'a>(cursor: &mut BinaryCursor<'a>, header: &PuzzleHeader) -> Result<RawContent<'a>> {
    let width = usize::from(header.width);
    let height = usize::from(header.height);
    trace!("Grids start at offset {:#06x}", cursor.position());

    let solution_rows = (0..height)
        .map(|_| cursor.read_bytes(width))
        .collect::<Result<Vec<_>>>()?;
    let user_rows = (0..height)
        .map(|_| cursor.read_bytes(width))
        .collect::<Result<Vec<_>>>()?;

    let title = cursor.read_null_terminated_bytes()?;
    let author = cursor.read_null_terminated_bytes()?;
    let copyright = cursor.read_null_terminated_bytes()?;
    let clues = (0..header.clue_count)
        .map(|_| cursor.read_null_terminated_bytes())
        .collect::<Result<Vec<_>>>()?;
    let notes = cursor.read_null_terminated_bytes()?;

    if !cursor.is_at_end() {
        debug!("Ignoring {} trailing byte(s) after notes", cursor.remaining());
    }

    Ok(RawContent {
        solution_rows,
        user_rows,
        title,
        author,
        copyright,
        clues,
        notes,
    })
}

/// Builds one grid row from its solution and user-state strings.
///
/// Column `i` takes `solution[i]` as the expected letter and `user[i]` as the
/// entered one, `'-'` meaning empty.
pub fn build_row(row: usize, solution: &str, user: &str) -> Result<Vec<Cell>> {
    let solution_len = solution.chars().count();
    let user_len = user.chars().count();
    if solution_len != user_len {
        return Err(PuzError::MalformedRow {
            row,
            solution_len,
            user_len,
        });
    }
    Ok(solution
        .chars()
        .zip(user.chars())
        .map(|(s, u)| Cell::from_raw(s, u))
        .collect())
}
