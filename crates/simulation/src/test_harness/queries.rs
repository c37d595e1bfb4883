//! Query and simulation-tick methods for `TestSession`.

use std::time::Duration;

use bevy::ecs::event::Events;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::app_state::GamePhase;
use crate::bins::Bin;
use crate::dispatch::DispatchResolver;
use crate::game_actions::{ActionResult, ActionResultLog};
use crate::game_params::GameParams;
use crate::session::Session;

use super::TestSession;

impl TestSession {
    // -----------------------------------------------------------------------
    // Simulation
    // -----------------------------------------------------------------------

    /// Run N fixed-update ticks by directly executing the `FixedUpdate`
    /// schedule. Virtual time does not move, so in-flight dispatches stay
    /// in flight.
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.world_mut().run_schedule(FixedUpdate);
        }
    }

    /// Run one frame without moving the clock: applies queued actions,
    /// resolves anything already due and syncs the phase state.
    pub fn flush(&mut self) {
        self.step_clock(Duration::ZERO);
    }

    /// Move virtual time forward by `delta` in a single frame. The fixed
    /// loop catches up first (one tick per tick period), then due
    /// dispatches resolve.
    pub fn advance(&mut self, delta: Duration) {
        self.step_clock(delta);
        self.step_clock(Duration::ZERO);
    }

    fn step_clock(&mut self, delta: Duration) {
        self.app
            .insert_resource(TimeUpdateStrategy::ManualDuration(delta));
        self.app.update();
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Access the ECS world mutably.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn session(&self) -> &Session {
        self.resource::<Session>()
    }

    pub fn params(&self) -> &GameParams {
        self.resource::<GameParams>()
    }

    pub fn resolver(&self) -> &DispatchResolver {
        self.resource::<DispatchResolver>()
    }

    /// Panics on an unknown id.
    pub fn bin(&self, bin_id: &str) -> &Bin {
        self.session()
            .bin(bin_id)
            .unwrap_or_else(|| panic!("no bin {bin_id}"))
    }

    /// The Bevy-side phase state (lags the session by at most one frame).
    pub fn phase_state(&self) -> GamePhase {
        *self.resource::<State<GamePhase>>().get()
    }

    /// Result of the most recently executed action.
    pub fn last_action_result(&self) -> Option<ActionResult> {
        self.resource::<ActionResultLog>().last_result().cloned()
    }

    /// Every retained event of type `E` (current and previous frame).
    pub fn events<E: Event + Clone>(&self) -> Vec<E> {
        let events = self.resource::<Events<E>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).cloned().collect()
    }
}
