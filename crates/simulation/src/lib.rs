use bevy::prelude::*;

pub mod app_state;
pub mod app_state_plugin;
pub mod bins;
pub mod dispatch;
pub mod events;
pub mod game_actions;
pub mod game_params;
pub mod log_feed;
mod plugin_registration;
pub mod session;
pub mod sim_rng;
pub mod simulation_loop;
pub mod simulation_sets;

#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use app_state::GamePhase;
pub use bins::{Bin, BinStatus};
pub use dispatch::{CollectionOutcome, CollectionReport, DispatchError, DispatchEvent, DispatchResolver};
pub use game_actions::{ActionQueue, ActionResult, ActionResultLog, GameAction};
pub use game_params::GameParams;
pub use log_feed::{LogEntry, LogFeed, LogKind};
pub use session::Session;
pub use sim_rng::SimRng;
pub use simulation_sets::{SimulationSet, SimulationUpdateSet};

/// Headless core of the game: session state, the fixed-rate tick, dispatch
/// resolution and the action queue. Rendering and input live in `ui`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                SimulationUpdateSet::Input,
                SimulationUpdateSet::Resolve,
                SimulationUpdateSet::Sync,
            )
                .chain(),
        );

        plugin_registration::register_feature_plugins(app);

        let session = Session::new(app.world().resource::<GameParams>());
        app.insert_resource(session)
            .init_resource::<DispatchResolver>()
            .add_systems(
                FixedUpdate,
                simulation_loop::run_simulation_tick
                    .run_if(simulation_loop::session_is_playing)
                    .in_set(SimulationSet::Simulation),
            )
            .add_systems(
                Update,
                dispatch::resolve_dispatches.in_set(SimulationUpdateSet::Resolve),
            );
    }
}
