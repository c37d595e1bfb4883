use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// A player intent, queued by the UI and applied by the executor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum GameAction {
    /// Start a new session, or restart the current one.
    StartSession,
    /// Send a truck to collect a bin.
    DispatchBin {
        bin_id: String,
        /// Arena position (percent) the truck heads to.
        target: (f32, f32),
    },
}

impl GameAction {
    pub fn dispatch(bin_id: impl Into<String>, target: Vec2) -> Self {
        GameAction::DispatchBin {
            bin_id: bin_id.into(),
            target: (target.x, target.y),
        }
    }
}
