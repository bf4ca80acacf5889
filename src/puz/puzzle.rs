//! The decoded puzzle: header, metadata strings, grid and clue lists.

use log::debug;
use crate::puz::grid::Grid;
use crate::puz::types::error::{PuzError, Result};
use crate::puz::store::PuzzleId;
use crate::puz::types::models::{Cell, Clue, ClueDirection, Pos, PuzzleHeader};

/// A fully linked and numbered crossword.
///
/// Only cell user values change after construction. Everything derived
/// (neighbours, board numbers, clue lists) comes from [`Puzzle::assemble`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Storage key, assigned by a [`PuzzleStore`](crate::PuzzleStore).
    pub id: Option<PuzzleId>,
    pub header: PuzzleHeader,
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub notes: String,
    raw_clues: Vec<String>,
    grid: Grid,
    across_clues: Vec<Clue>,
    down_clues: Vec<Clue>,
}

/// Free-text fields that follow the grid in a .puz file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PuzzleText {
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub clues: Vec<String>,
    pub notes: String,
}

impl Puzzle {
    /// Checks the structural invariants, then numbers the grid.
    ///
    /// This is the one place derived state is computed, shared by the binary
    /// decoder and by restoration from a persisted record.
    pub fn assemble(header: PuzzleHeader, text: PuzzleText, rows: Vec<Vec<Cell>>) -> Result<Self> {
        let width = usize::from(header.width);
        let height = usize::from(header.height);
        if rows.len() != height {
            return Err(PuzError::CountMismatch {
                item_type: "rows",
                expected: height,
                found: rows.len(),
            });
        }
        if text.clues.len() != usize::from(header.clue_count) {
            return Err(PuzError::CountMismatch {
                item_type: "clues",
                expected: usize::from(header.clue_count),
                found: text.clues.len(),
            });
        }

        let mut grid = Grid::from_rows(rows, width)?;
        let lists = grid.number(&text.clues)?;
        debug!("Assembled {}x{} puzzle '{}'", width, height, text.title);

        Ok(Self {
            id: None,
            header,
            title: text.title,
            author: text.author,
            copyright: text.copyright,
            notes: text.notes,
            raw_clues: text.clues,
            grid,
            across_clues: lists.across,
            down_clues: lists.down,
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn cell(&self, pos: Pos) -> Option<&Cell> {
        self.grid.get(pos)
    }

    /// Clue texts in file order.
    pub fn raw_clues(&self) -> &[String] {
        &self.raw_clues
    }

    pub fn across_clues(&self) -> &[Clue] {
        &self.across_clues
    }

    pub fn down_clues(&self) -> &[Clue] {
        &self.down_clues
    }

    pub fn clues(&self, direction: ClueDirection) -> &[Clue] {
        match direction {
            ClueDirection::Across => &self.across_clues,
            ClueDirection::Down => &self.down_clues,
        }
    }

    /// The clue the cell at `pos` belongs to in `direction`.
    pub fn clue_at(&self, pos: Pos, direction: ClueDirection) -> Option<&Clue> {
        let index = self.cell(pos)?.clue_index(direction)?;
        self.clues(direction).get(index)
    }

    /// True when every open cell holds its solution letter.
    pub fn is_solved(&self) -> bool {
        self.grid.iter().all(|(_, cell)| cell.is_valid())
    }
}
