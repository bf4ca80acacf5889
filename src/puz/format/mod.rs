//! File format parsing layer for .puz crossword files.
//!
//! # Module Organization
//!
//! - [`header`]: the fixed 0x34-byte header (checksums, magic, dimensions)
//! - [`content`]: solution/user grids and the null-terminated text section
//!
//! # Architecture
//!
//! ```text
//! File Structure:
//! ┌─────────────────┐
//! │  Header         │ ← header::parse()
//! ├─────────────────┤
//! │  Solution grid  │
//! │  User grid      │ ← content::parse()
//! │  Strings        │
//! └─────────────────┘
//! ```

pub mod content;
pub mod header;

/// The magic string identifying a .puz file, stored null-terminated at offset 0x02.
pub const MAGIC: &str = "ACROSS&DOWN";

/// Size of the fixed header for the common 3-character version string.
pub const HEADER_SIZE: usize = 0x34;
