mod common;

use common::{decode_three_by_three, p, three_by_three, PuzBuilder, THREE_BY_THREE_CLUES};
use puz_reader::puz::format::{content, HEADER_SIZE};
use puz_reader::{decode, DecodeOptions, PuzError, PuzzleDecoder};

fn strict() -> PuzzleDecoder {
    PuzzleDecoder::new(DecodeOptions { verify_checksums: true })
}

#[test]
fn decodes_header_and_metadata() {
    let puzzle = decode_three_by_three();

    assert_eq!(puzzle.header.magic, "ACROSS&DOWN");
    assert_eq!(puzzle.header.version, "1.3");
    assert_eq!(puzzle.header.width, 3);
    assert_eq!(puzzle.header.height, 3);
    assert_eq!(puzzle.header.clue_count, 8);
    assert_eq!(puzzle.header.puzzle_type, 1);
    assert!(!puzzle.header.is_scrambled());
    assert_eq!(puzzle.width(), 3);
    assert_eq!(puzzle.height(), 3);
    assert_eq!(puzzle.title, "Test Puzzle");
    assert_eq!(puzzle.author, "A. Setter");
    assert_eq!(puzzle.copyright, "(c) Nobody");
    assert_eq!(puzzle.notes, "");
    assert_eq!(puzzle.raw_clues(), THREE_BY_THREE_CLUES);
    assert_eq!(puzzle.id, None);
}

#[test]
fn decodes_cells_positionally() {
    let buf = three_by_three().user(&["A-C", "-.-", "--Q"]).build();
    let puzzle = decode(&buf).expect("decode");
    let grid = puzzle.grid();

    assert_eq!(grid.len(), 9);
    let a = grid.get(p(0, 0)).unwrap();
    assert_eq!(a.expected_value(), Some('A'));
    assert_eq!(a.user_value(), Some('A'));
    assert!(a.is_valid());

    let b = grid.get(p(0, 1)).unwrap();
    assert_eq!(b.expected_value(), Some('B'));
    assert_eq!(b.user_value(), None);
    assert!(!b.is_valid());

    let h = grid.get(p(2, 2)).unwrap();
    assert_eq!(h.user_value(), Some('Q'));
    assert!(!h.is_valid());

    let sep = grid.get(p(1, 1)).unwrap();
    assert!(sep.is_separator());
    assert_eq!(sep.expected_value(), None);
    assert_eq!(sep.user_value(), None);
    assert!(sep.is_valid());
}

#[test]
fn strict_mode_accepts_correct_checksums() {
    let puzzle = strict().decode(&three_by_three().notes("Have fun").build()).expect("decode");
    assert_eq!(puzzle.notes, "Have fun");
}

#[test]
fn header_is_0x34_bytes() {
    let buf = three_by_three().build();
    // solution grid starts right after the header
    assert_eq!(&buf[HEADER_SIZE..HEADER_SIZE + 3], b"ABC");
}

#[test]
fn short_buffer_is_out_of_bounds() {
    let buf = three_by_three().build();
    for len in [0, 1, 2, 13, 14, 0x20, HEADER_SIZE - 1] {
        let err = decode(&buf[..len]).unwrap_err();
        assert!(
            matches!(err, PuzError::OutOfBounds { .. }),
            "prefix of {} bytes gave {:?}",
            len,
            err
        );
    }
}

#[test]
fn every_truncation_fails_without_partial_result() {
    let buf = three_by_three().notes("n").build();
    for len in 0..buf.len() {
        match decode(&buf[..len]) {
            Err(PuzError::OutOfBounds { .. }) => {}
            other => panic!("prefix of {} bytes gave {:?}", len, other),
        }
    }
}

#[test]
fn wrong_magic_is_invalid_format() {
    let mut buf = three_by_three().build();
    buf[2] = b'X';
    assert!(matches!(decode(&buf), Err(PuzError::InvalidFormat(_))));

    // no terminator anywhere after the magic
    assert!(matches!(decode(b"xxNOT A PUZZLE"), Err(PuzError::InvalidFormat(_))));

    // correct text but missing terminator
    let mut buf = three_by_three().build();
    buf[13] = b'!';
    assert!(matches!(decode(&buf), Err(PuzError::InvalidFormat(_))));
}

#[test]
fn checksum_mismatch_is_lenient_by_default() {
    let mut buf = three_by_three().build();
    buf[0] ^= 0xff;
    assert!(decode(&buf).is_ok());
    match strict().decode(&buf) {
        Err(PuzError::ChecksumMismatch { region, .. }) => assert_eq!(region, "file"),
        other => panic!("expected file checksum mismatch, got {:?}", other),
    }

    let mut buf = three_by_three().build();
    buf[0x0e] ^= 0x01;
    match strict().decode(&buf) {
        Err(PuzError::ChecksumMismatch { region, .. }) => assert_eq!(region, "CIB"),
        other => panic!("expected CIB checksum mismatch, got {:?}", other),
    }
}

#[test]
fn edited_user_grid_breaks_file_checksum() {
    let mut buf = three_by_three().build();
    buf[HEADER_SIZE + 9] = b'A';
    assert!(matches!(
        strict().decode(&buf),
        Err(PuzError::ChecksumMismatch { region: "file", .. })
    ));
    let puzzle = decode(&buf).expect("lenient decode");
    assert_eq!(puzzle.cell(p(0, 0)).unwrap().user_value(), Some('A'));
}

#[test]
fn missing_clue_texts_are_a_count_mismatch() {
    let buf = PuzBuilder::new(&["ABC", "D.E", "FGH"])
        .clues(&THREE_BY_THREE_CLUES[..7])
        .build();
    match decode(&buf) {
        Err(PuzError::CountMismatch { item_type, expected, found }) => {
            assert_eq!(item_type, "clue texts");
            assert_eq!(expected, 8);
            assert_eq!(found, 7);
        }
        other => panic!("expected count mismatch, got {:?}", other),
    }
}

#[test]
fn extra_clue_texts_are_a_count_mismatch() {
    let mut clues = THREE_BY_THREE_CLUES.to_vec();
    clues.push("Spare");
    let buf = PuzBuilder::new(&["ABC", "D.E", "FGH"]).clues(&clues).build();
    assert!(matches!(decode(&buf), Err(PuzError::CountMismatch { .. })));
}

#[test]
fn trailing_sections_are_ignored() {
    let buf = three_by_three().trailer(b"GEXT\x09\x00\x00\x00").build();
    let puzzle = strict().decode(&buf).expect("decode");
    assert_eq!(puzzle.across_clues().len(), 4);
}

#[test]
fn text_is_latin1() {
    let buf = three_by_three().title("Café ©").build();
    let puzzle = strict().decode(&buf).expect("decode");
    assert_eq!(puzzle.title, "Café ©");
}

#[test]
fn scrambled_tag() {
    let puzzle = decode(&three_by_three().scrambled_tag(4).build()).expect("decode");
    assert!(puzzle.header.is_scrambled());
    assert_eq!(puzzle.header.scrambled_tag, 4);
}

#[test]
fn empty_grid() {
    let puzzle = decode(&PuzBuilder::new(&[]).build()).expect("decode");
    assert!(puzzle.grid().is_empty());
    assert!(puzzle.across_clues().is_empty());
    assert!(puzzle.down_clues().is_empty());
}

#[test]
fn mismatched_row_lengths() {
    match content::build_row(2, "ABC", "AB") {
        Err(PuzError::MalformedRow { row, solution_len, user_len }) => {
            assert_eq!((row, solution_len, user_len), (2, 3, 2));
        }
        other => panic!("expected malformed row, got {:?}", other),
    }
    let cells = content::build_row(0, "A.C", "-.X").expect("row");
    assert!(cells[1].is_separator());
    assert_eq!(cells[2].user_value(), Some('X'));
}

#[test]
fn decode_file_reads_from_disk() {
    let path = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("three_by_three.puz");
    std::fs::write(&path, three_by_three().build()).expect("write fixture");
    let puzzle = strict().decode_file(&path).expect("decode file");
    assert_eq!(puzzle, decode_three_by_three());

    let missing = path.with_file_name("does-not-exist.puz");
    assert!(matches!(strict().decode_file(missing), Err(PuzError::Io(_))));
}
