//! Persisted projection of a puzzle and the stores that keep it.
//!
//! Only header fields, strings and plain `{userValue, expectedValue}` pairs are
//! stored. Neighbour links, board numbers and clue lists are never trusted from
//! storage: [`PuzzleRecord::to_puzzle`] always rebuilds them through
//! [`Puzzle::assemble`].

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use crate::puz::puzzle::{Puzzle, PuzzleText};
use crate::puz::types::error::{PuzError, Result};
use crate::puz::types::models::{Cell, PuzzleHeader};

/// Identifier a store assigns to a saved puzzle.
pub type PuzzleId = u64;

/// One cell as stored: the entered letter and the solution, `""` when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellRecord {
    pub user_value: String,
    pub expected_value: String,
}

/// JSON-serializable projection of a [`Puzzle`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PuzzleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PuzzleId>,
    pub checksum: u16,
    pub magic_string: String,
    pub cib_checksum: u16,
    pub lows: [u8; 4],
    pub highs: [u8; 4],
    pub version: String,
    #[serde(rename = "res1C")]
    pub res_1c: [u8; 2],
    pub scrambled_check: u16,
    #[serde(rename = "res20")]
    pub res_20: [u8; 12],
    pub width: u8,
    pub height: u8,
    pub clue_ct: u16,
    pub puzzle_type: u16,
    pub scrambled_tag: u16,
    pub cells: Vec<Vec<CellRecord>>,
    pub title: String,
    pub author: String,
    pub copy: String,
    pub raw_clues: Vec<String>,
    pub notes: String,
}

fn value_to_string(value: Option<char>) -> String {
    value.map(String::from).unwrap_or_default()
}

fn parse_value(value: &str) -> Result<Option<char>> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => Ok(Some(c)),
        _ => Err(PuzError::InvalidFormat(format!(
            "Cell value '{}' is longer than one character",
            value
        ))),
    }
}

impl From<&Puzzle> for PuzzleRecord {
    fn from(puzzle: &Puzzle) -> Self {
        let header = &puzzle.header;
        let cells = puzzle
            .grid()
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| CellRecord {
                        user_value: value_to_string(cell.user_value()),
                        expected_value: value_to_string(cell.expected_value()),
                    })
                    .collect()
            })
            .collect();

        Self {
            id: puzzle.id,
            checksum: header.checksum,
            magic_string: header.magic.clone(),
            cib_checksum: header.cib_checksum,
            lows: header.masked_low_checksums,
            highs: header.masked_high_checksums,
            version: header.version.clone(),
            res_1c: header.reserved_1c,
            scrambled_check: header.scrambled_checksum,
            res_20: header.reserved_20,
            width: header.width,
            height: header.height,
            clue_ct: header.clue_count,
            puzzle_type: header.puzzle_type,
            scrambled_tag: header.scrambled_tag,
            cells,
            title: puzzle.title.clone(),
            author: puzzle.author.clone(),
            copy: puzzle.copyright.clone(),
            raw_clues: puzzle.raw_clues().to_vec(),
            notes: puzzle.notes.clone(),
        }
    }
}

impl PuzzleRecord {
    /// Rebuilds the runtime puzzle, re-deriving links and numbering.
    pub fn to_puzzle(&self) -> Result<Puzzle> {
        let header = PuzzleHeader {
            checksum: self.checksum,
            magic: self.magic_string.clone(),
            cib_checksum: self.cib_checksum,
            masked_low_checksums: self.lows,
            masked_high_checksums: self.highs,
            version: self.version.clone(),
            reserved_1c: self.res_1c,
            scrambled_checksum: self.scrambled_check,
            reserved_20: self.res_20,
            width: self.width,
            height: self.height,
            clue_count: self.clue_ct,
            puzzle_type: self.puzzle_type,
            scrambled_tag: self.scrambled_tag,
        };
        let rows = self
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| Ok(Cell::new(parse_value(&c.user_value)?, parse_value(&c.expected_value)?)))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let text = PuzzleText {
            title: self.title.clone(),
            author: self.author.clone(),
            copyright: self.copy.clone(),
            clues: self.raw_clues.clone(),
            notes: self.notes.clone(),
        };

        let mut puzzle = Puzzle::assemble(header, text, rows)?;
        puzzle.id = self.id;
        Ok(puzzle)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Where puzzles are saved between sessions.
///
/// Implementations decide how ids are assigned; `add` returns the new id and
/// `update` replaces the record stored under `record.id`.
pub trait PuzzleStore {
    fn add(&mut self, record: PuzzleRecord) -> Result<PuzzleId>;

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>>;

    /// Saves `record`, adding it when it has no id yet.
    fn update(&mut self, record: PuzzleRecord) -> Result<PuzzleId>;

    /// All saved records, ordered by id.
    fn list(&self) -> Result<Vec<PuzzleRecord>>;

    /// Loads and reconstructs the puzzle saved under `id`.
    fn load(&self, id: PuzzleId) -> Result<Option<Puzzle>> {
        self.get(id)?.map(|record| record.to_puzzle()).transpose()
    }
}

/// A store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<PuzzleId, PuzzleRecord>,
    next_id: PuzzleId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PuzzleStore for MemoryStore {
    fn add(&mut self, mut record: PuzzleRecord) -> Result<PuzzleId> {
        self.next_id += 1;
        let id = self.next_id;
        record.id = Some(id);
        self.records.insert(id, record);
        Ok(id)
    }

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>> {
        Ok(self.records.get(&id).cloned())
    }

    fn update(&mut self, record: PuzzleRecord) -> Result<PuzzleId> {
        match record.id {
            Some(id) => {
                self.next_id = self.next_id.max(id);
                self.records.insert(id, record);
                Ok(id)
            }
            None => self.add(record),
        }
    }

    fn list(&self) -> Result<Vec<PuzzleRecord>> {
        Ok(self.records.values().cloned().collect())
    }
}

/// A store keeping one pretty-printed `<id>.json` file per puzzle in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Opens (creating if needed) the store directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        info!("Puzzle store at {}", dir.display());
        Ok(Self { dir })
    }

    fn path_for(&self, id: PuzzleId) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    fn ids(&self) -> Result<Vec<PuzzleId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<PuzzleId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }

    fn write(&self, record: &PuzzleRecord, id: PuzzleId) -> Result<()> {
        let path = self.path_for(id);
        debug!("Writing puzzle {} to {}", id, path.display());
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, record)?;
        Ok(())
    }
}

impl PuzzleStore for JsonDirStore {
    fn add(&mut self, mut record: PuzzleRecord) -> Result<PuzzleId> {
        let id = self.ids()?.last().map_or(1, |last| last + 1);
        record.id = Some(id);
        self.write(&record, id)?;
        Ok(id)
    }

    fn get(&self, id: PuzzleId) -> Result<Option<PuzzleRecord>> {
        let path = self.path_for(id);
        if !path.exists() {
            return Ok(None);
        }
        let reader = BufReader::new(File::open(path)?);
        Ok(Some(serde_json::from_reader(reader)?))
    }

    fn update(&mut self, record: PuzzleRecord) -> Result<PuzzleId> {
        match record.id {
            Some(id) => {
                self.write(&record, id)?;
                Ok(id)
            }
            None => self.add(record),
        }
    }

    fn list(&self) -> Result<Vec<PuzzleRecord>> {
        self.ids()?
            .into_iter()
            .filter_map(|id| self.get(id).transpose())
            .collect()
    }
}
