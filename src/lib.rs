//! # puz-reader
//!
//! A reader for `.puz` crossword files (the Across Lite format).
//!
//! Decodes the binary layout into a [`Puzzle`] whose grid is linked and
//! numbered, and drives solving through a [`Navigator`] state machine that
//! follows the usual crossword cursor conventions.
//!
//! ```no_run
//! use puz_reader::{DecodeOptions, Key, Navigator, Pos, PuzzleDecoder};
//!
//! let puzzle = PuzzleDecoder::new(DecodeOptions::default()).decode_file("daily.puz").unwrap();
//! let mut nav = Navigator::new(puzzle);
//! nav.select(Pos::new(0, 0));
//! nav.handle_key(Key::Char('a'));
//! ```
pub mod logging;
pub mod puz;

// Re-export the main types for convenience
pub use puz::{
    decode, BinaryCursor, Cell, CellMark, CellRecord, Clue, ClueDirection, ClueRef, DecodeOptions,
    Grid, InputDirection, JsonDirStore, Key, MemoryStore, NavEvent, Navigator, Pos, PuzError,
    Puzzle, PuzzleDecoder, PuzzleHeader, PuzzleId, PuzzleRecord, PuzzleStore, Result, Session,
};
