//! Core .puz module: decoding, grid model, navigation and persistence.

pub mod checksum;
pub mod cursor;
pub mod decoder;
pub mod format;
pub mod grid;
pub mod navigator;
pub mod puzzle;
pub mod session;
pub mod store;
pub mod types;

pub use cursor::BinaryCursor;
pub use decoder::{decode, DecodeOptions, PuzzleDecoder};
pub use grid::{ClueLists, Grid, Neighbor};
pub use navigator::{CellMark, ClueRef, Key, NavEvent, Navigator};
pub use puzzle::{Puzzle, PuzzleText};
pub use session::Session;
pub use store::{CellRecord, JsonDirStore, MemoryStore, PuzzleId, PuzzleRecord, PuzzleStore};
pub use types::error::{PuzError, Result};
pub use types::models::{Cell, Clue, ClueDirection, InputDirection, Pos, PuzzleHeader};
