//! # TestSession: headless integration test harness for Eco-Route
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running integration tests without a window or renderer.
//!
//! Virtual time only moves when a test asks it to (see
//! [`TestSession::advance`]), so dispatch resolution is deterministic.

mod assertions;
mod queries;
mod setup;

use std::time::Duration;

use bevy::app::App;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use crate::game_actions::{ActionQueue, GameAction};
use crate::game_params::GameParams;
use crate::sim_rng::SimRng;
use crate::SimulationPlugin;

/// A headless Bevy App wrapping `SimulationPlugin` for integration testing.
///
/// Use builder methods to set up session state, then call `tick()` to advance
/// the simulation and query/assert on the resulting resources.
pub struct TestSession {
    app: App,
}

impl Default for TestSession {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSession {
    // -----------------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------------

    /// Create a session in the menu with default params and the default seed.
    pub fn new() -> Self {
        Self::build(GameParams::default(), SimRng::default())
    }

    /// Create a session whose bin layout comes from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(GameParams::default(), SimRng::from_seed_u64(seed))
    }

    /// Create a session with custom tuning.
    pub fn with_params(params: GameParams) -> Self {
        Self::build(params, SimRng::default())
    }

    fn build(params: GameParams, rng: SimRng) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(StatesPlugin);

        // Inserted BEFORE SimulationPlugin so init_resource keeps them.
        app.insert_resource(params);
        app.insert_resource(rng);
        app.add_plugins(SimulationPlugin);

        // Frames do not move the clock unless a test advances it.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::ZERO));
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_max_delta(Duration::from_secs(60));

        // Run one update so Startup systems execute.
        app.update();

        Self { app }
    }

    /// Start play (menu → playing) and apply it immediately.
    pub fn started(mut self) -> Self {
        self.queue_start();
        self.flush();
        self
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    /// Queue a start/restart. Applied on the next frame.
    pub fn queue_start(&mut self) {
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(GameAction::StartSession);
    }

    /// Queue a dispatch to `bin_id`, targeting the bin's position (or the
    /// arena origin for an unknown id). Applied on the next frame.
    pub fn queue_dispatch(&mut self, bin_id: &str) {
        let target = self
            .session()
            .bin(bin_id)
            .map(|b| Vec2::new(b.x, b.y))
            .unwrap_or(Vec2::ZERO);
        self.app
            .world_mut()
            .resource_mut::<ActionQueue>()
            .push(GameAction::dispatch(bin_id, target));
    }
}
