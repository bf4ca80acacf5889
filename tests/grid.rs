mod common;

use common::{decode_three_by_three, p, PuzBuilder};
use puz_reader::puz::grid::Neighbor;
use puz_reader::{ClueDirection, Pos, PuzzleRecord};

#[test]
fn three_by_three_board_numbers() {
    let puzzle = decode_three_by_three();
    let numbers: Vec<Option<u16>> = puzzle.grid().iter().map(|(_, c)| c.board_number()).collect();
    assert_eq!(
        numbers,
        vec![Some(1), Some(2), Some(3), Some(4), None, Some(5), Some(6), Some(7), None]
    );
}

#[test]
fn three_by_three_clue_lists() {
    let puzzle = decode_three_by_three();

    let across: Vec<(u16, &str)> = puzzle
        .across_clues()
        .iter()
        .map(|c| (c.number, c.text.as_str()))
        .collect();
    assert_eq!(across, vec![(1, "Across 1"), (4, "Across 4"), (5, "Across 5"), (6, "Across 6")]);

    let down: Vec<(u16, &str)> = puzzle
        .down_clues()
        .iter()
        .map(|c| (c.number, c.text.as_str()))
        .collect();
    assert_eq!(down, vec![(1, "Down 1"), (2, "Down 2"), (3, "Down 3"), (7, "Down 7")]);

    assert!(puzzle.across_clues().iter().all(|c| c.direction == ClueDirection::Across));
    assert!(puzzle.down_clues().iter().all(|c| c.direction == ClueDirection::Down));
    assert_eq!(puzzle.across_clues()[1].to_string(), "4 Across 4");
}

#[test]
fn three_by_three_clue_membership() {
    let puzzle = decode_three_by_three();
    let grid = puzzle.grid();
    let membership = |pos: Pos| {
        let cell = grid.get(pos).unwrap();
        (cell.across_clue(), cell.down_clue())
    };

    assert_eq!(membership(p(0, 0)), (Some(0), Some(0)));
    assert_eq!(membership(p(0, 1)), (Some(0), Some(1)));
    assert_eq!(membership(p(0, 2)), (Some(0), Some(2)));
    assert_eq!(membership(p(1, 0)), (Some(1), Some(0)));
    assert_eq!(membership(p(1, 1)), (None, None));
    assert_eq!(membership(p(1, 2)), (Some(2), Some(2)));
    assert_eq!(membership(p(2, 0)), (Some(3), Some(0)));
    assert_eq!(membership(p(2, 1)), (Some(3), Some(3)));
    assert_eq!(membership(p(2, 2)), (Some(3), Some(2)));

    assert_eq!(puzzle.clue_at(p(2, 2), ClueDirection::Down).unwrap().number, 3);
    assert_eq!(puzzle.clue_at(p(1, 2), ClueDirection::Across).unwrap().number, 5);
    assert!(puzzle.clue_at(p(1, 1), ClueDirection::Across).is_none());
}

/// A larger grid with irregular separators.
fn five_by_five() -> PuzBuilder {
    let solution = ["AB.CD", "EFGHI", "J.K.L", "MNOPQ", "RS.TU"];
    let mut builder = PuzBuilder::new(&solution);
    let mut needed = 0;
    for (r, row) in solution.iter().enumerate() {
        for (c, ch) in row.chars().enumerate() {
            if ch == '.' {
                continue;
            }
            let west_open = c > 0 && row.chars().nth(c - 1) != Some('.');
            let north_open = r > 0 && solution[r - 1].chars().nth(c) != Some('.');
            needed += usize::from(!west_open) + usize::from(!north_open);
        }
    }
    builder.clues = (0..needed).map(|i| format!("clue {i}")).collect();
    builder
}

#[test]
fn numbering_invariants_hold() {
    let puzzle = puz_reader::decode(&five_by_five().build()).expect("decode");
    let grid = puzzle.grid();

    let across_starts = grid.iter().filter(|(pos, _)| grid.starts_across(*pos)).count();
    let down_starts = grid.iter().filter(|(pos, _)| grid.starts_down(*pos)).count();
    assert_eq!(across_starts, puzzle.across_clues().len());
    assert_eq!(down_starts, puzzle.down_clues().len());
    assert_eq!(
        puzzle.across_clues().len() + puzzle.down_clues().len(),
        puzzle.raw_clues().len()
    );

    let mut last_number = 0;
    for (pos, cell) in grid.iter() {
        if cell.is_separator() {
            assert_eq!(cell.board_number(), None, "separator at {} numbered", pos);
            assert_eq!(cell.across_clue(), None);
            assert_eq!(cell.down_clue(), None);
            continue;
        }
        assert!(cell.across_clue().is_some(), "{} has no across clue", pos);
        assert!(cell.down_clue().is_some(), "{} has no down clue", pos);
        if let Some(n) = cell.board_number() {
            assert_eq!(n, last_number + 1, "board numbers skip at {}", pos);
            last_number = n;
        }
    }

    // clue texts are consumed across-then-down per cell in scan order
    let mut expected_order = Vec::new();
    for (pos, cell) in grid.iter() {
        if grid.starts_across(pos) {
            expected_order.push(&puzzle.across_clues()[cell.across_clue().unwrap()].text);
        }
        if grid.starts_down(pos) {
            expected_order.push(&puzzle.down_clues()[cell.down_clue().unwrap()].text);
        }
    }
    let raw: Vec<&String> = puzzle.raw_clues().iter().collect();
    assert_eq!(expected_order, raw);
}

#[test]
fn neighbours_follow_row_and_column() {
    let puzzle = decode_three_by_three();
    let grid = puzzle.grid();

    assert_eq!(grid.north(p(0, 1)), None);
    assert_eq!(grid.west(p(1, 0)), None);
    assert_eq!(grid.east(p(1, 2)), None);
    assert_eq!(grid.south(p(2, 0)), None);
    assert_eq!(grid.south(p(0, 1)), Some(p(1, 1)));
    assert_eq!(grid.east(p(2, 0)), Some(p(2, 1)));
    assert_eq!(grid.neighbor(p(1, 2), Neighbor::West), Some(p(1, 1)));
    assert_eq!(grid.open_neighbor(p(1, 2), Neighbor::West), None);
    assert_eq!(grid.get(p(3, 0)), None);
    assert!(!grid.is_open(p(0, 3)));
}

#[test]
fn positions_outside_the_grid_have_no_neighbours() {
    let puzzle = decode_three_by_three();
    let grid = puzzle.grid();

    assert_eq!(grid.neighbor(p(usize::MAX, 0), Neighbor::South), None);
    assert_eq!(grid.neighbor(p(0, usize::MAX), Neighbor::East), None);
    assert_eq!(grid.neighbor(p(3, 0), Neighbor::North), None);
    assert_eq!(grid.neighbor(p(0, 3), Neighbor::West), None);
    assert!(grid.entry_cells(p(usize::MAX, usize::MAX), ClueDirection::Across).is_empty());
}

#[test]
fn entry_helpers() {
    let puzzle = decode_three_by_three();
    let grid = puzzle.grid();

    assert_eq!(grid.entry_cells(p(2, 1), ClueDirection::Across), vec![p(2, 0), p(2, 1), p(2, 2)]);
    assert_eq!(grid.entry_cells(p(2, 2), ClueDirection::Down), vec![p(0, 2), p(1, 2), p(2, 2)]);
    assert_eq!(grid.entry_cells(p(1, 0), ClueDirection::Across), vec![p(1, 0)]);
    assert!(grid.entry_cells(p(1, 1), ClueDirection::Across).is_empty());
    assert_eq!(grid.entry_start(p(2, 2), ClueDirection::Across), Some(p(2, 0)));
    assert_eq!(grid.entry_end(p(0, 0), ClueDirection::Down), Some(p(2, 0)));
    assert_eq!(grid.cell_for_clue(ClueDirection::Down, 3), Some(p(2, 1)));
    assert_eq!(grid.cell_for_clue(ClueDirection::Across, 2), Some(p(1, 2)));
    assert_eq!(grid.cell_for_clue(ClueDirection::Across, 4), None);
    assert_eq!(grid.first_empty_in_entry(p(0, 0), ClueDirection::Across), Some(p(0, 0)));

    let mut record = PuzzleRecord::from(&puzzle);
    record.cells[0][0].user_value = "A".to_string();
    record.cells[0][1].user_value = "B".to_string();
    let partly_filled = record.to_puzzle().expect("restore");
    let grid = partly_filled.grid();
    assert_eq!(grid.first_empty_in_entry(p(0, 0), ClueDirection::Across), Some(p(0, 2)));
    assert_eq!(grid.first_empty_in_entry(p(0, 0), ClueDirection::Down), Some(p(1, 0)));
}

#[test]
fn displays_as_ascii() {
    let puzzle = decode_three_by_three();
    assert_eq!(puzzle.grid().to_string(), "---\n-#-\n---\n");
}
