//! Cursor navigation and solving state machine.
//!
//! A [`Navigator`] owns the active [`Puzzle`], the selected cell and the input
//! direction. Every operation runs synchronously and reports what changed as a
//! list of [`NavEvent`]s for the rendering and persistence collaborators.
//! Persistence is fire-and-forget: the navigator asks for a save with
//! [`NavEvent::PersistRequested`] and keeps going.

use std::collections::HashMap;
use log::{debug, trace};
use crate::puz::grid::Neighbor;
use crate::puz::puzzle::Puzzle;
use crate::puz::store::PuzzleRecord;
use crate::puz::types::models::{Clue, ClueDirection, InputDirection, Pos};

/// Keyboard input understood by [`Navigator::handle_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Backspace,
    Char(char),
}

/// Transient per-cell highlight, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellMark {
    Valid,
    Invalid,
    Solved,
}

/// A clue identified by its list and position in that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClueRef {
    pub direction: ClueDirection,
    pub index: usize,
}

/// Notifications for collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    /// The cursor moved (or the direction changed).
    ///
    /// `entry` lists the cells of the highlighted entry, first to last.
    SelectionChanged {
        pos: Pos,
        direction: InputDirection,
        clue: Option<ClueRef>,
        entry: Vec<Pos>,
    },
    /// A cell's entered letter changed.
    CellChanged { pos: Pos, value: Option<char> },
    /// One or more cell marks were set or cleared.
    MarksChanged,
    /// The puzzle should be saved.
    PersistRequested(PuzzleRecord),
}

/// Selection, direction and highlight state over one puzzle.
#[derive(Debug)]
pub struct Navigator {
    puzzle: Puzzle,
    selected: Option<Pos>,
    direction: InputDirection,
    marks: HashMap<Pos, CellMark>,
    persist_in_flight: bool,
}

impl Navigator {
    pub fn new(puzzle: Puzzle) -> Self {
        Self {
            puzzle,
            selected: None,
            direction: InputDirection::default(),
            marks: HashMap::new(),
            persist_in_flight: false,
        }
    }

    /// Swaps in a new puzzle and resets all selection state.
    pub fn load(&mut self, puzzle: Puzzle) {
        *self = Self::new(puzzle);
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn into_puzzle(self) -> Puzzle {
        self.puzzle
    }

    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    pub fn direction(&self) -> InputDirection {
        self.direction
    }

    pub fn mark(&self, pos: Pos) -> Option<CellMark> {
        self.marks.get(&pos).copied()
    }

    /// Whether typed input is currently being held back by an unsettled save.
    pub fn is_persist_in_flight(&self) -> bool {
        self.persist_in_flight
    }

    /// Reports that the save requested by typing has finished.
    pub fn persist_settled(&mut self) {
        self.persist_in_flight = false;
    }

    /// The clue for the selected cell in the current direction.
    pub fn current_clue(&self) -> Option<&Clue> {
        let pos = self.selected?;
        self.puzzle.clue_at(pos, self.direction.clue_direction())
    }

    fn clue_ref(&self, pos: Pos) -> Option<ClueRef> {
        let direction = self.direction.clue_direction();
        let index = self.puzzle.cell(pos)?.clue_index(direction)?;
        Some(ClueRef { direction, index })
    }

    fn set_selection(&mut self, pos: Pos) -> NavEvent {
        trace!("Selection {:?} -> {} ({:?})", self.selected, pos, self.direction);
        self.selected = Some(pos);
        NavEvent::SelectionChanged {
            pos,
            direction: self.direction,
            clue: self.clue_ref(pos),
            entry: self
                .puzzle
                .grid()
                .entry_cells(pos, self.direction.clue_direction()),
        }
    }

    /// Selects the cell at `pos`, toggling direction when it is already selected.
    ///
    /// Separators and positions outside the grid are ignored.
    pub fn select(&mut self, pos: Pos) -> Vec<NavEvent> {
        if !self.puzzle.grid().is_open(pos) {
            return Vec::new();
        }
        if self.selected == Some(pos) {
            self.direction = self.direction.toggled();
        }
        vec![self.set_selection(pos)]
    }

    /// Selects the first cell of a clue, switching to that clue's direction.
    pub fn select_clue(&mut self, direction: ClueDirection, index: usize) -> Vec<NavEvent> {
        let Some(pos) = self.puzzle.grid().cell_for_clue(direction, index) else {
            return Vec::new();
        };
        self.direction = direction.into();
        vec![self.set_selection(pos)]
    }

    /// Moves forward in the current direction. No-op without a selection.
    pub fn move_next(&mut self) -> Vec<NavEvent> {
        let Some(from) = self.selected else {
            return Vec::new();
        };
        let next = match self.direction {
            InputDirection::Horizontal => self.next_horizontal(from),
            InputDirection::Vertical => self.next_vertical(from),
        };
        next.map(|pos| vec![self.set_selection(pos)]).unwrap_or_default()
    }

    /// Moves backward in the current direction. No-op without a selection.
    pub fn move_prev(&mut self) -> Vec<NavEvent> {
        let Some(from) = self.selected else {
            return Vec::new();
        };
        let prev = self.prev_in(from, self.direction.clue_direction());
        prev.map(|pos| vec![self.set_selection(pos)]).unwrap_or_default()
    }

    /// The next open cell in scan order, wrapping from the last cell to the first.
    fn next_horizontal(&self, from: Pos) -> Option<Pos> {
        let grid = self.puzzle.grid();
        let (width, total) = (grid.width(), grid.len());
        let start = from.row * width + from.col;
        (1..=total)
            .map(|step| (start + step) % total)
            .map(|i| Pos::new(i / width, i % width))
            .find(|pos| grid.is_open(*pos))
    }

    /// South if open, else the first cell of the next down clue (wrapping to the first).
    fn next_vertical(&self, from: Pos) -> Option<Pos> {
        let grid = self.puzzle.grid();
        if let Some(south) = grid.open_neighbor(from, Neighbor::South) {
            return Some(south);
        }
        let count = self.puzzle.down_clues().len();
        let index = grid.get(from)?.down_clue()?;
        grid.cell_for_clue(ClueDirection::Down, (index + 1) % count)
    }

    /// The previous cell in the entry, else the last cell of the previous clue
    /// (wrapping to the last clue).
    fn prev_in(&self, from: Pos, direction: ClueDirection) -> Option<Pos> {
        let grid = self.puzzle.grid();
        if let Some(prev) = grid.open_neighbor(from, Neighbor::before(direction)) {
            return Some(prev);
        }
        let count = self.puzzle.clues(direction).len();
        let index = grid.get(from)?.clue_index(direction)?;
        let prev_index = index.checked_sub(1).unwrap_or(count - 1);
        let start = grid.cell_for_clue(direction, prev_index)?;
        grid.entry_end(start, direction)
    }

    /// Dispatches one key press.
    ///
    /// While a save requested by typing is unsettled every key is dropped.
    /// Arrows perpendicular to the current direction switch direction first.
    pub fn handle_key(&mut self, key: Key) -> Vec<NavEvent> {
        if self.persist_in_flight {
            debug!("Dropping {:?}: save still in flight", key);
            return Vec::new();
        }
        match key {
            Key::Up | Key::Left | Key::Down | Key::Right => {
                let direction = match key {
                    Key::Up | Key::Down => InputDirection::Vertical,
                    _ => InputDirection::Horizontal,
                };
                let switched = self.direction != direction;
                self.direction = direction;
                let mut events = match key {
                    Key::Up | Key::Left => self.move_prev(),
                    _ => self.move_next(),
                };
                if switched
                    && events.is_empty()
                    && let Some(pos) = self.selected
                {
                    events.push(self.set_selection(pos));
                }
                events
            }
            Key::Backspace => self.backspace(),
            Key::Char(c) => self.type_letter(c),
        }
    }

    /// Enters a letter in the selected cell, requests a save and advances.
    ///
    /// Only ASCII letters are accepted. Dropped while a previous save is in flight.
    pub fn type_letter(&mut self, c: char) -> Vec<NavEvent> {
        if self.persist_in_flight || !c.is_ascii_alphabetic() {
            return Vec::new();
        }
        let Some(pos) = self.selected else {
            return Vec::new();
        };
        let value = Some(c.to_ascii_uppercase());
        let mut events = Vec::new();
        if let Some(cell) = self.puzzle.grid_mut().get_mut(pos) {
            cell.set_user_value(value);
        }
        events.push(NavEvent::CellChanged { pos, value });
        if self.marks.remove(&pos).is_some() {
            events.push(NavEvent::MarksChanged);
        }
        self.persist_in_flight = true;
        events.push(NavEvent::PersistRequested(PuzzleRecord::from(&self.puzzle)));
        events.extend(self.move_next());
        events
    }

    /// Clears the selected cell without moving.
    pub fn backspace(&mut self) -> Vec<NavEvent> {
        let Some(pos) = self.selected else {
            return Vec::new();
        };
        let changed = self
            .puzzle
            .grid_mut()
            .get_mut(pos)
            .is_some_and(|cell| cell.set_user_value(None));
        if !changed {
            return Vec::new();
        }
        vec![NavEvent::CellChanged { pos, value: None }]
    }

    /// Clears one cell and requests a save.
    pub fn clear_cell(&mut self, pos: Pos) -> Vec<NavEvent> {
        let changed = self
            .puzzle
            .grid_mut()
            .get_mut(pos)
            .is_some_and(|cell| cell.set_user_value(None));
        if !changed {
            return Vec::new();
        }
        vec![
            NavEvent::CellChanged { pos, value: None },
            NavEvent::PersistRequested(PuzzleRecord::from(&self.puzzle)),
        ]
    }

    /// Empties every cell, drops all marks and requests a save.
    pub fn clear_puzzle(&mut self) -> Vec<NavEvent> {
        let positions: Vec<Pos> = self.puzzle.grid().iter().map(|(pos, _)| pos).collect();
        let mut events: Vec<NavEvent> = positions
            .into_iter()
            .filter(|pos| {
                self.puzzle
                    .grid_mut()
                    .get_mut(*pos)
                    .is_some_and(|cell| cell.set_user_value(None))
            })
            .map(|pos| NavEvent::CellChanged { pos, value: None })
            .collect();
        if !self.marks.is_empty() {
            self.marks.clear();
            events.push(NavEvent::MarksChanged);
        }
        events.push(NavEvent::PersistRequested(PuzzleRecord::from(&self.puzzle)));
        events
    }

    /// Fills one invalid cell with its solution and marks it solved.
    pub fn solve_cell(&mut self, pos: Pos) -> Vec<NavEvent> {
        let Some(cell) = self.puzzle.grid_mut().get_mut(pos) else {
            return Vec::new();
        };
        if cell.is_separator() || cell.is_valid() {
            return Vec::new();
        }
        let value = cell.expected_value();
        cell.set_user_value(value);
        self.marks.insert(pos, CellMark::Solved);
        vec![NavEvent::CellChanged { pos, value }, NavEvent::MarksChanged]
    }

    /// Fills every invalid cell with its solution.
    pub fn solve_puzzle(&mut self) -> Vec<NavEvent> {
        let positions: Vec<Pos> = self.puzzle.grid().iter().map(|(pos, _)| pos).collect();
        let mut events: Vec<NavEvent> = positions
            .into_iter()
            .flat_map(|pos| self.solve_cell(pos))
            .filter(|event| *event != NavEvent::MarksChanged)
            .collect();
        if !events.is_empty() {
            events.push(NavEvent::MarksChanged);
        }
        events
    }

    fn check(&mut self, pos: Pos) -> bool {
        let Some(cell) = self.puzzle.cell(pos) else {
            return false;
        };
        if cell.is_separator() {
            return false;
        }
        let mark = if cell.is_valid() { CellMark::Valid } else { CellMark::Invalid };
        self.marks.insert(pos, mark);
        true
    }

    /// Marks the selected cell valid or invalid.
    pub fn check_current_cell(&mut self) -> Vec<NavEvent> {
        let Some(pos) = self.selected else {
            return Vec::new();
        };
        if !self.check(pos) {
            return Vec::new();
        }
        vec![NavEvent::MarksChanged]
    }

    /// Marks every open cell valid or invalid without changing any value.
    pub fn validate_puzzle(&mut self) -> Vec<NavEvent> {
        let positions: Vec<Pos> = self.puzzle.grid().iter().map(|(pos, _)| pos).collect();
        let checked = positions.into_iter().filter(|pos| self.check(*pos)).count();
        debug!("Validated {} cell(s)", checked);
        if checked == 0 {
            return Vec::new();
        }
        vec![NavEvent::MarksChanged]
    }
}
