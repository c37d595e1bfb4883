use bevy::prelude::*;

use crate::*;

/// Register all simulation feature plugins.
///
/// `GameParamsPlugin` must come first: the session is sized from the params
/// resource it inserts.
pub(crate) fn register_feature_plugins(app: &mut App) {
    app.add_plugins(game_params::GameParamsPlugin);
    app.add_plugins(sim_rng::SimRngPlugin);
    app.add_plugins(events::SessionEventsPlugin);
    app.add_plugins(app_state_plugin::GamePhasePlugin);
    app.add_plugins(game_actions::GameActionsPlugin);
}
