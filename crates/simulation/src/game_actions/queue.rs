use bevy::prelude::*;

use super::GameAction;

/// FIFO of player actions waiting for the next executor run.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ActionQueue {
    pending: Vec<GameAction>,
}

impl ActionQueue {
    pub fn push(&mut self, action: GameAction) {
        self.pending.push(action);
    }

    pub fn drain(&mut self) -> Vec<GameAction> {
        self.pending.drain(..).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }
}
