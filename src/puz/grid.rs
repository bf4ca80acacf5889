//! The cell matrix, its neighbour relation and clue numbering.
//!
//! Cells live in one row-major `Vec` owned by [`Grid`]. North/south/east/west
//! links are computed from row/column arithmetic, so the neighbour graph never
//! owns anything and needs no back-pointers.

use std::fmt;
use log::{debug, trace};
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, Clue, ClueDirection, Pos};

/// A compass direction to one of a cell's four neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbor {
    North,
    South,
    East,
    West,
}

impl Neighbor {
    /// The neighbour that comes before a cell in an entry of `direction`.
    pub fn before(direction: ClueDirection) -> Self {
        match direction {
            ClueDirection::Across => Neighbor::West,
            ClueDirection::Down => Neighbor::North,
        }
    }

    /// The neighbour that comes after a cell in an entry of `direction`.
    pub fn after(direction: ClueDirection) -> Self {
        match direction {
            ClueDirection::Across => Neighbor::East,
            ClueDirection::Down => Neighbor::South,
        }
    }
}

/// Across and down clue lists produced by numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClueLists {
    pub across: Vec<Clue>,
    pub down: Vec<Clue>,
}

/// Row-major cell matrix with derived neighbour links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Builds a grid from rows, checking every row against the declared width.
    pub fn from_rows(rows: Vec<Vec<Cell>>, width: usize) -> Result<Self> {
        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            if row.len() != width {
                return Err(PuzError::CountMismatch {
                    item_type: "cells in row",
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, pos: Pos) -> Option<usize> {
        (pos.row < self.height && pos.col < self.width).then(|| pos.row * self.width + pos.col)
    }

    pub fn get(&self, pos: Pos) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, pos: Pos) -> Option<&mut Cell> {
        self.index(pos).map(|i| &mut self.cells[i])
    }

    /// Rows in order, each a slice of `width` cells.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        (0..self.height).map(move |row| &self.cells[row * self.width..(row + 1) * self.width])
    }

    /// All cells with their positions, in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (Pos::new(i / width, i % width), cell))
    }

    /// Position of the neighbour in `towards`, if both it and `pos` lie inside the grid.
    pub fn neighbor(&self, pos: Pos, towards: Neighbor) -> Option<Pos> {
        self.index(pos)?;
        let next = match towards {
            Neighbor::North => Pos::new(pos.row.checked_sub(1)?, pos.col),
            Neighbor::South => Pos::new(pos.row.checked_add(1)?, pos.col),
            Neighbor::East => Pos::new(pos.row, pos.col.checked_add(1)?),
            Neighbor::West => Pos::new(pos.row, pos.col.checked_sub(1)?),
        };
        self.index(next).map(|_| next)
    }

    pub fn north(&self, pos: Pos) -> Option<Pos> {
        self.neighbor(pos, Neighbor::North)
    }

    pub fn south(&self, pos: Pos) -> Option<Pos> {
        self.neighbor(pos, Neighbor::South)
    }

    pub fn east(&self, pos: Pos) -> Option<Pos> {
        self.neighbor(pos, Neighbor::East)
    }

    pub fn west(&self, pos: Pos) -> Option<Pos> {
        self.neighbor(pos, Neighbor::West)
    }

    /// True when `pos` is inside the grid and not a separator.
    pub fn is_open(&self, pos: Pos) -> bool {
        self.get(pos).is_some_and(|cell| !cell.is_separator())
    }

    /// The neighbour in `towards`, only if it is an open cell.
    pub fn open_neighbor(&self, pos: Pos, towards: Neighbor) -> Option<Pos> {
        self.neighbor(pos, towards).filter(|next| self.is_open(*next))
    }

    /// Whether an entry in `direction` begins at `pos`.
    pub fn starts_entry(&self, pos: Pos, direction: ClueDirection) -> bool {
        self.is_open(pos) && self.open_neighbor(pos, Neighbor::before(direction)).is_none()
    }

    pub fn starts_across(&self, pos: Pos) -> bool {
        self.starts_entry(pos, ClueDirection::Across)
    }

    pub fn starts_down(&self, pos: Pos) -> bool {
        self.starts_entry(pos, ClueDirection::Down)
    }

    /// Assigns board numbers and clue indices, consuming `raw_clues` in scan order.
    ///
    /// For each open cell the across check runs before the down check, and each
    /// entry started takes the next raw clue text. A cell starting both entries
    /// receives a single board number. Cells that start nothing inherit their
    /// clue indices from the west (across) and north (down) neighbours, which
    /// scan order has already visited.
    ///
    /// Fails with [`PuzError::CountMismatch`] unless the entries found consume
    /// the raw clues exactly.
    pub(crate) fn number(&mut self, raw_clues: &[String]) -> Result<ClueLists> {
        let mut lists = ClueLists::default();
        let mut texts = raw_clues.iter();
        let mut clue_number: u16 = 1;

        for i in 0..self.cells.len() {
            let pos = Pos::new(i / self.width, i % self.width);
            if self.cells[i].is_separator {
                continue;
            }
            let starts_across = self.starts_across(pos);
            let starts_down = self.starts_down(pos);

            let across_clue = if starts_across {
                lists.across.push(Clue {
                    direction: ClueDirection::Across,
                    number: clue_number,
                    text: texts.next().cloned().unwrap_or_default(),
                });
                Some(lists.across.len() - 1)
            } else {
                self.west(pos).and_then(|w| self.cells[w.row * self.width + w.col].across_clue)
            };
            let down_clue = if starts_down {
                lists.down.push(Clue {
                    direction: ClueDirection::Down,
                    number: clue_number,
                    text: texts.next().cloned().unwrap_or_default(),
                });
                Some(lists.down.len() - 1)
            } else {
                self.north(pos).and_then(|n| self.cells[n.row * self.width + n.col].down_clue)
            };

            let cell = &mut self.cells[i];
            cell.across_clue = across_clue;
            cell.down_clue = down_clue;
            cell.board_number = None;
            if starts_across || starts_down {
                trace!("Board number {} at {}", clue_number, pos);
                cell.board_number = Some(clue_number);
                clue_number += 1;
            }
        }

        let needed = lists.across.len() + lists.down.len();
        if needed != raw_clues.len() {
            return Err(PuzError::CountMismatch {
                item_type: "clue texts",
                expected: needed,
                found: raw_clues.len(),
            });
        }
        debug!("Numbered grid: {} across, {} down", lists.across.len(), lists.down.len());
        Ok(lists)
    }

    /// First cell of the `direction` entry containing `pos`.
    pub fn entry_start(&self, pos: Pos, direction: ClueDirection) -> Option<Pos> {
        if !self.is_open(pos) {
            return None;
        }
        let mut cur = pos;
        while let Some(prev) = self.open_neighbor(cur, Neighbor::before(direction)) {
            cur = prev;
        }
        Some(cur)
    }

    /// Last cell of the `direction` entry containing `pos`.
    pub fn entry_end(&self, pos: Pos, direction: ClueDirection) -> Option<Pos> {
        if !self.is_open(pos) {
            return None;
        }
        let mut cur = pos;
        while let Some(next) = self.open_neighbor(cur, Neighbor::after(direction)) {
            cur = next;
        }
        Some(cur)
    }

    /// Every cell of the `direction` entry containing `pos`, first to last.
    pub fn entry_cells(&self, pos: Pos, direction: ClueDirection) -> Vec<Pos> {
        let mut cells = Vec::new();
        let mut cur = self.entry_start(pos, direction);
        while let Some(p) = cur {
            cells.push(p);
            cur = self.open_neighbor(p, Neighbor::after(direction));
        }
        cells
    }

    /// The first unfilled cell at or after `pos` in its entry, else the entry start.
    pub fn first_empty_in_entry(&self, pos: Pos, direction: ClueDirection) -> Option<Pos> {
        let start = self.entry_start(pos, direction)?;
        let mut cur = Some(pos);
        while let Some(p) = cur {
            if self.get(p).is_some_and(Cell::is_empty) {
                return Some(p);
            }
            cur = self.open_neighbor(p, Neighbor::after(direction));
        }
        Some(start)
    }

    /// Start cell of the clue at `index` in the `direction` list.
    pub fn cell_for_clue(&self, direction: ClueDirection, index: usize) -> Option<Pos> {
        self.iter()
            .find(|(_, cell)| cell.clue_index(direction) == Some(index))
            .map(|(pos, _)| pos)
    }
}

impl fmt::Display for Grid {
    /// One line per row: `#` for separators, `-` for empty cells, else the letter.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let line: String = row
                .iter()
                .map(|cell| match (cell.is_separator(), cell.user_value()) {
                    (true, _) => '#',
                    (false, Some(c)) => c,
                    (false, None) => '-',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
