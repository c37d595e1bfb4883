//! Plugin that registers the [`GamePhase`] state machine.
//!
//! Kept in its own file following the one-plugin-per-file convention.

use bevy::prelude::*;

use crate::app_state::GamePhase;
use crate::session::Session;
use crate::simulation_sets::SimulationUpdateSet;

/// Plugin that initializes the [`GamePhase`] state resource and keeps it in
/// step with [`Session::phase`].
///
/// Note: `init_state` needs the `StateTransition` schedule, so callers (the
/// app binary via `DefaultPlugins`, or the test harness via `StatesPlugin`)
/// must provide it **before** adding `SimulationPlugin`.
pub struct GamePhasePlugin;

impl Plugin for GamePhasePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GamePhase>();
        app.add_systems(Update, sync_game_phase.in_set(SimulationUpdateSet::Sync));
    }
}

/// Mirror the session's phase into the Bevy state so `OnEnter` / `in_state`
/// observers fire.
pub fn sync_game_phase(
    session: Res<Session>,
    state: Res<State<GamePhase>>,
    mut next: ResMut<NextState<GamePhase>>,
) {
    if session.phase != *state.get() {
        next.set(session.phase);
    }
}
