//! Core data structures for the .puz grid and its clues.
//!
//! This module defines the fundamental types used throughout the library:
//! - Grid positions and the two direction enums
//! - Cells and clues
//! - The fixed header block of a .puz file

use std::fmt;

/// Solution byte marking a blocked (black) square.
pub const SEPARATOR_CHAR: char = '.';

/// User-state byte marking a square the solver has not filled yet.
pub const EMPTY_PLACEHOLDER: char = '-';

/// A position in the grid, zero-based, row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction tag of a clue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueDirection {
    Across,
    Down,
}

impl fmt::Display for ClueDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClueDirection::Across => write!(f, "Across"),
            ClueDirection::Down => write!(f, "Down"),
        }
    }
}

/// Direction the cursor advances in while typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl InputDirection {
    pub fn toggled(self) -> Self {
        match self {
            InputDirection::Horizontal => InputDirection::Vertical,
            InputDirection::Vertical => InputDirection::Horizontal,
        }
    }

    /// The clue list that entries in this direction belong to.
    pub fn clue_direction(self) -> ClueDirection {
        match self {
            InputDirection::Horizontal => ClueDirection::Across,
            InputDirection::Vertical => ClueDirection::Down,
        }
    }
}

impl From<ClueDirection> for InputDirection {
    fn from(direction: ClueDirection) -> Self {
        match direction {
            ClueDirection::Across => InputDirection::Horizontal,
            ClueDirection::Down => InputDirection::Vertical,
        }
    }
}

/// One square of the grid.
///
/// Neighbour links are not stored here: the owning [`Grid`](crate::Grid)
/// derives them from row/column arithmetic. Board number and clue indices are
/// filled in by numbering and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub(crate) user_value: Option<char>,
    pub(crate) expected_value: Option<char>,
    pub(crate) is_separator: bool,
    pub(crate) board_number: Option<u16>,
    pub(crate) across_clue: Option<usize>,
    pub(crate) down_clue: Option<usize>,
}

impl Cell {
    /// Builds a cell from plain values.
    ///
    /// A cell is a separator when its solution is `'.'` or when both values
    /// are absent. Separators never carry a letter.
    pub fn new(user_value: Option<char>, expected_value: Option<char>) -> Self {
        let is_separator = expected_value == Some(SEPARATOR_CHAR)
            || (user_value.is_none() && expected_value.is_none());
        if is_separator {
            return Self::separator();
        }
        Self {
            user_value: user_value.filter(|c| *c != EMPTY_PLACEHOLDER),
            expected_value,
            is_separator: false,
            board_number: None,
            across_clue: None,
            down_clue: None,
        }
    }

    /// Builds a cell from the raw solution and user-state characters of a .puz row.
    pub fn from_raw(solution: char, user: char) -> Self {
        Self::new(Some(user), Some(solution))
    }

    pub fn separator() -> Self {
        Self {
            user_value: None,
            expected_value: None,
            is_separator: true,
            board_number: None,
            across_clue: None,
            down_clue: None,
        }
    }

    pub fn user_value(&self) -> Option<char> {
        self.user_value
    }

    pub fn expected_value(&self) -> Option<char> {
        self.expected_value
    }

    pub fn is_separator(&self) -> bool {
        self.is_separator
    }

    pub fn is_empty(&self) -> bool {
        self.user_value.is_none()
    }

    pub fn board_number(&self) -> Option<u16> {
        self.board_number
    }

    /// Index into the across clue list of the entry this cell belongs to.
    pub fn across_clue(&self) -> Option<usize> {
        self.across_clue
    }

    /// Index into the down clue list of the entry this cell belongs to.
    pub fn down_clue(&self) -> Option<usize> {
        self.down_clue
    }

    pub fn clue_index(&self, direction: ClueDirection) -> Option<usize> {
        match direction {
            ClueDirection::Across => self.across_clue,
            ClueDirection::Down => self.down_clue,
        }
    }

    /// Separators are always valid; other cells when the entered letter matches the solution.
    pub fn is_valid(&self) -> bool {
        self.is_separator || self.user_value == self.expected_value
    }

    /// Sets the entered letter. Returns whether the cell changed.
    ///
    /// Separators ignore writes.
    pub fn set_user_value(&mut self, value: Option<char>) -> bool {
        if self.is_separator || self.user_value == value {
            return false;
        }
        self.user_value = value;
        true
    }
}

/// A numbered clue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub direction: ClueDirection,
    /// Board number printed in the entry's first square (1-based).
    pub number: u16,
    pub text: String,
}

impl fmt::Display for Clue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.number, self.text)
    }
}

/// The fixed-layout header at the start of a .puz file.
///
/// Checksums and reserved areas are kept verbatim so a decoded puzzle can be
/// persisted and restored without losing anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleHeader {
    pub checksum: u16,
    pub magic: String,
    pub cib_checksum: u16,
    pub masked_low_checksums: [u8; 4],
    pub masked_high_checksums: [u8; 4],
    pub version: String,
    pub reserved_1c: [u8; 2],
    pub scrambled_checksum: u16,
    pub reserved_20: [u8; 12],
    pub width: u8,
    pub height: u8,
    pub clue_count: u16,
    /// Bitmask at 0x30; `0x0001` for ordinary puzzles.
    pub puzzle_type: u16,
    /// Word at 0x32, non-zero when the solution is scrambled.
    ///
    /// Stored as `scrambledTag`. Records that carry the flag under an
    /// `isScrambled` key instead do not deserialize.
    pub scrambled_tag: u16,
}

impl PuzzleHeader {
    pub fn is_scrambled(&self) -> bool {
        self.scrambled_tag != 0
    }

    /// The 8-byte CIB block (width through the scrambled tag) as laid out on disk.
    pub fn cib_bytes(&self) -> [u8; 8] {
        let clue_count = self.clue_count.to_le_bytes();
        let puzzle_type = self.puzzle_type.to_le_bytes();
        let scrambled = self.scrambled_tag.to_le_bytes();
        [
            self.width,
            self.height,
            clue_count[0],
            clue_count[1],
            puzzle_type[0],
            puzzle_type[1],
            scrambled[0],
            scrambled[1],
        ]
    }
}
