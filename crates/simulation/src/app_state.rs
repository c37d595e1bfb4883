//! Session lifecycle state machine.
//!
//! Defines [`GamePhase`], used both as the `phase` field of the
//! [`Session`](crate::session::Session) aggregate and as a Bevy [`States`]
//! enum so UI systems can gate themselves with `in_state(..)`.
//!
//! The [`Session`](crate::session::Session) is the source of truth; the Bevy
//! state is a mirror updated by
//! [`sync_game_phase`](crate::app_state_plugin::sync_game_phase) at the end of
//! each frame.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of one play-through.
///
/// Transitions only move forward (`Menu` → `Playing` → `GameOver | Won`);
/// the only way back to `Playing` is an explicit restart.
#[derive(
    States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet.
    #[default]
    Menu,
    /// Active session; the tick loop is running.
    Playing,
    /// Overflow limit reached. Frozen until restart.
    GameOver,
    /// Final wave threshold exceeded. Frozen until restart.
    Won,
}

impl GamePhase {
    /// `GameOver` and `Won` end the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }

    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }
}
