//! Action queue plumbing and custom tuning.

use std::time::Duration;

use bevy::prelude::*;

use crate::dispatch::DispatchError;
use crate::game_actions::{ActionQueue, ActionResult, ActionResultLog, GameAction};
use crate::game_params::GameParams;
use crate::test_harness::TestSession;

#[test]
fn test_queue_is_drained_each_frame() {
    let mut session = TestSession::new();
    session.queue_start();
    session.queue_dispatch("LY-01");
    assert_eq!(session.resource::<ActionQueue>().len(), 2);

    session.flush();
    assert!(session.resource::<ActionQueue>().is_empty());
}

#[test]
fn test_results_are_logged_in_order() {
    let mut session = TestSession::new();
    session.queue_dispatch("LY-01");
    session.queue_start();
    session.queue_dispatch("LY-01");
    session.flush();

    let log = session.resource::<ActionResultLog>();
    let entries = log.last_n(3);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].1, ActionResult::Rejected(DispatchError::NotPlaying));
    assert_eq!(entries[1], (GameAction::StartSession, ActionResult::Success));
    assert!(entries[2].1.is_success());
}

#[test]
fn test_custom_dispatch_cost() {
    let mut params = GameParams::default();
    params.fleet.dispatch_cost = 40.0;
    let mut session = TestSession::with_params(params).started();

    session.queue_dispatch("LY-01");
    session.queue_dispatch("LY-02");
    session.queue_dispatch("LY-03");
    session.flush();

    session.assert_fuel(20.0);
    session.assert_last_action_rejected(DispatchError::InsufficientFuel);
}

#[test]
fn test_custom_log_capacity() {
    let mut params = GameParams::default();
    params.log_capacity = 1;
    let session = TestSession::with_params(params).started();
    assert_eq!(session.session().log.len(), 1);
}

#[test]
fn test_fixed_timestep_matches_tick_period() {
    let mut params = GameParams::default();
    params.tick_period_ms = 100;
    let session = TestSession::with_params(params);
    let fixed = session.resource::<Time<Fixed>>();
    assert_eq!(fixed.timestep(), Duration::from_millis(100));
}

#[test]
fn test_advance_runs_one_tick_per_period() {
    let mut session = TestSession::new().started().with_idle_bins();
    session.advance(Duration::from_secs(2));
    assert_eq!(session.session().elapsed_ticks, 10);
}
