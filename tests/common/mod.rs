#![allow(dead_code)]

use encoding_rs::WINDOWS_1252;
use puz_reader::puz::checksum::{cksum_region, text_checksum, ChecksumText};
use puz_reader::{Pos, Puzzle};

/// Clue texts for [`three_by_three`], in the order numbering consumes them.
pub const THREE_BY_THREE_CLUES: &[&str] = &[
    "Across 1", "Down 1", "Down 2", "Down 3", "Across 4", "Across 5", "Across 6", "Down 7",
];

/// Byte-level writer for .puz fixtures with correct checksums.
#[derive(Debug, Clone)]
pub struct PuzBuilder {
    pub solution: Vec<String>,
    pub user: Vec<String>,
    pub title: String,
    pub author: String,
    pub copyright: String,
    pub clues: Vec<String>,
    pub notes: String,
    pub version: String,
    pub scrambled_tag: u16,
    pub trailer: Vec<u8>,
}

fn latin1(s: &str) -> Vec<u8> {
    let (bytes, _, _) = WINDOWS_1252.encode(s);
    bytes.into_owned()
}

impl PuzBuilder {
    /// A puzzle with the given solution rows and an empty user grid.
    pub fn new(solution: &[&str]) -> Self {
        let user = solution
            .iter()
            .map(|row| row.chars().map(|c| if c == '.' { '.' } else { '-' }).collect())
            .collect();
        Self {
            solution: solution.iter().map(|r| r.to_string()).collect(),
            user,
            title: "Test Puzzle".to_string(),
            author: "A. Setter".to_string(),
            copyright: "(c) Nobody".to_string(),
            clues: Vec::new(),
            notes: String::new(),
            version: "1.3".to_string(),
            scrambled_tag: 0,
            trailer: Vec::new(),
        }
    }

    pub fn user(mut self, rows: &[&str]) -> Self {
        self.user = rows.iter().map(|r| r.to_string()).collect();
        self
    }

    pub fn clues(mut self, clues: &[&str]) -> Self {
        self.clues = clues.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = notes.to_string();
        self
    }

    pub fn scrambled_tag(mut self, tag: u16) -> Self {
        self.scrambled_tag = tag;
        self
    }

    pub fn trailer(mut self, bytes: &[u8]) -> Self {
        self.trailer = bytes.to_vec();
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let width = self.solution.first().map_or(0, |r| r.chars().count()) as u8;
        let height = self.solution.len() as u8;
        let clue_count = (self.clues.len() as u16).to_le_bytes();
        let tag = self.scrambled_tag.to_le_bytes();
        let cib = [width, height, clue_count[0], clue_count[1], 0x01, 0x00, tag[0], tag[1]];

        let solution = latin1(&self.solution.concat());
        let user = latin1(&self.user.concat());
        let title = latin1(&self.title);
        let author = latin1(&self.author);
        let copyright = latin1(&self.copyright);
        let notes = latin1(&self.notes);
        let clues: Vec<Vec<u8>> = self.clues.iter().map(|c| latin1(c)).collect();
        let clue_refs: Vec<&[u8]> = clues.iter().map(Vec::as_slice).collect();

        let cib_checksum = cksum_region(&cib, 0);
        let mut checksum = cksum_region(&solution, cib_checksum);
        checksum = cksum_region(&user, checksum);
        checksum = text_checksum(
            &ChecksumText {
                title: &title,
                author: &author,
                copyright: &copyright,
                clues: &clue_refs,
                notes: &notes,
            },
            checksum,
        );

        let mut out = Vec::new();
        out.extend(checksum.to_le_bytes());
        out.extend(b"ACROSS&DOWN\0");
        out.extend(cib_checksum.to_le_bytes());
        out.extend([0u8; 4]);
        out.extend([0u8; 4]);
        out.extend(self.version.as_bytes());
        out.push(0);
        out.extend([0u8; 2]);
        out.extend(0u16.to_le_bytes());
        out.extend([0u8; 12]);
        out.extend(cib);
        out.extend(&solution);
        out.extend(&user);
        for field in [&title, &author, &copyright] {
            out.extend(field);
            out.push(0);
        }
        for clue in &clues {
            out.extend(clue);
            out.push(0);
        }
        out.extend(&notes);
        out.push(0);
        out.extend(&self.trailer);
        out
    }
}

/// 3x3 grid with a separator in the centre.
///
/// ```text
/// A B C
/// D # E
/// F G H
/// ```
pub fn three_by_three() -> PuzBuilder {
    PuzBuilder::new(&["ABC", "D.E", "FGH"]).clues(THREE_BY_THREE_CLUES)
}

pub fn decode_three_by_three() -> Puzzle {
    puz_reader::decode(&three_by_three().build()).expect("fixture decodes")
}

pub fn p(row: usize, col: usize) -> Pos {
    Pos::new(row, col)
}
