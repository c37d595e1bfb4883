//! Ring-buffer log of recently executed game actions and their results.
//!
//! The [`ActionResultLog`] resource stores the last 64 `(GameAction, ActionResult)`
//! pairs, giving callers (UI, tests) a way to inspect what happened without
//! diffing the session every frame.

use bevy::prelude::*;

use super::{ActionResult, GameAction};

/// Maximum number of entries retained in the ring buffer.
const MAX_ENTRIES: usize = 64;

/// A ring-buffer log of the last [`MAX_ENTRIES`] action/result pairs.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActionResultLog {
    entries: Vec<(GameAction, ActionResult)>,
}

impl ActionResultLog {
    /// Record a new action/result pair. If the buffer is full the oldest entry
    /// is evicted.
    pub fn push(&mut self, action: GameAction, result: ActionResult) {
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.remove(0);
        }
        self.entries.push((action, result));
    }

    /// Return the last `n` entries (or fewer if the log is shorter).
    pub fn last_n(&self, n: usize) -> &[(GameAction, ActionResult)] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// The most recent result, if any.
    pub fn last_result(&self) -> Option<&ActionResult> {
        self.entries.last().map(|(_, r)| r)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
