//! Glue between a [`Navigator`] and a [`PuzzleStore`].

use log::{error, info};
use crate::puz::navigator::{Key, NavEvent, Navigator};
use crate::puz::puzzle::Puzzle;
use crate::puz::store::{PuzzleId, PuzzleRecord, PuzzleStore};
use crate::puz::types::error::Result;

/// One solving session: the navigator plus the store its saves go to.
///
/// Saves are performed synchronously as soon as the navigator asks for them.
/// A failed save is logged and otherwise ignored, matching the
/// fire-and-forget contract of [`NavEvent::PersistRequested`].
#[derive(Debug)]
pub struct Session<S: PuzzleStore> {
    navigator: Navigator,
    store: S,
}

impl<S: PuzzleStore> Session<S> {
    /// Starts a session on `puzzle`, adding it to the store if it has no id yet.
    pub fn open(mut store: S, mut puzzle: Puzzle) -> Result<Self> {
        if puzzle.id.is_none() {
            let id = store.add(PuzzleRecord::from(&puzzle))?;
            info!("Saved new puzzle '{}' as {}", puzzle.title, id);
            puzzle.id = Some(id);
        }
        Ok(Self {
            navigator: Navigator::new(puzzle),
            store,
        })
    }

    /// Resumes the puzzle saved under `id`. Returns `None` if there is no such puzzle.
    pub fn resume(store: S, id: PuzzleId) -> Result<Option<Self>> {
        let Some(puzzle) = store.load(id)? else {
            return Ok(None);
        };
        info!("Resumed puzzle '{}' ({})", puzzle.title, id);
        Ok(Some(Self {
            navigator: Navigator::new(puzzle),
            store,
        }))
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn handle_key(&mut self, key: Key) -> Vec<NavEvent> {
        let events = self.navigator.handle_key(key);
        self.dispatch(events)
    }

    /// Runs any navigator operation and settles the saves it requests.
    pub fn apply(&mut self, op: impl FnOnce(&mut Navigator) -> Vec<NavEvent>) -> Vec<NavEvent> {
        let events = op(&mut self.navigator);
        self.dispatch(events)
    }

    /// Performs requested saves and returns the remaining events for rendering.
    fn dispatch(&mut self, events: Vec<NavEvent>) -> Vec<NavEvent> {
        let mut rendered = Vec::with_capacity(events.len());
        for event in events {
            match event {
                NavEvent::PersistRequested(record) => {
                    if let Err(e) = self.store.update(record) {
                        error!("Error updating puzzle: {}", e);
                    }
                    self.navigator.persist_settled();
                }
                other => rendered.push(other),
            }
        }
        rendered
    }
}
