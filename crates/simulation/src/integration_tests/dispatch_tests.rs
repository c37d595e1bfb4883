//! Dispatch flow through the action queue and the resolver system.

use std::time::Duration;

use crate::app_state::GamePhase;
use crate::bins::BinStatus;
use crate::dispatch::{CollectionOutcome, DispatchError, MSG_INSUFFICIENT_FUEL};
use crate::events::{CollectionResolved, DispatchAccepted};
use crate::test_harness::TestSession;

const TRAVEL: Duration = Duration::from_secs(1);

fn session_with_full_bin(fill: f32) -> TestSession {
    TestSession::new()
        .started()
        .with_idle_bins()
        .with_bin_fill("LY-01", fill)
        .with_bin_rate("LY-01", 0.5)
}

// ====================================================================
// Acceptance
// ====================================================================

#[test]
fn test_dispatch_locks_bin_and_costs_fuel() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.assert_last_action_succeeded();
    session.assert_fuel(85.0);
    session.assert_bin_status("LY-01", BinStatus::PendingCollection);
    session.assert_log_contains("DISPATCHING ROUTE TO LY-01");
    assert_eq!(session.resolver().in_flight().len(), 1);

    let accepted = session.events::<DispatchAccepted>();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].bin_id, "LY-01");
}

#[test]
fn test_locked_bin_does_not_fill() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.flush();
    session.tick(3);
    assert_eq!(session.bin("LY-01").fill, 80.0);
}

// ====================================================================
// Rejections
// ====================================================================

#[test]
fn test_dispatch_rejected_in_menu() {
    let mut session = TestSession::new();
    session.queue_dispatch("LY-01");
    session.flush();
    session.assert_last_action_rejected(DispatchError::NotPlaying);
    assert!(session.resolver().is_idle());
}

#[test]
fn test_dispatch_rejected_for_unknown_bin() {
    let mut session = TestSession::new().started();
    session.queue_dispatch("LY-99");
    session.flush();
    session.assert_last_action_rejected(DispatchError::UnknownBin);
    session.assert_fuel(100.0);
}

#[test]
fn test_second_dispatch_to_pending_bin_rejected() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.queue_dispatch("LY-01");
    session.flush();

    session.assert_last_action_rejected(DispatchError::AlreadyPending);
    session.assert_fuel(85.0);
    assert_eq!(session.resolver().in_flight().len(), 1);
}

#[test]
fn test_low_fuel_rejects_without_side_effects() {
    let mut session = session_with_full_bin(80.0).with_fuel(14.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.assert_last_action_rejected(DispatchError::InsufficientFuel);
    session.assert_fuel(14.0);
    session.assert_bin_status("LY-01", BinStatus::Nominal);
    session.assert_log_contains(MSG_INSUFFICIENT_FUEL);
    assert!(session.resolver().is_idle());
}

// ====================================================================
// Resolution
// ====================================================================

#[test]
fn test_optimal_collection_after_one_second() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.advance(TRAVEL);

    session.assert_score(200);
    assert_eq!(session.bin("LY-01").fill, 0.0);
    session.assert_bin_status("LY-01", BinStatus::Nominal);
    session.assert_log_contains("LY-01 COLLECTED OPTIMALLY");
    // 85 after the dispatch, plus five ticks of regen while the truck drove.
    session.assert_fuel(87.5);
    assert!(session.resolver().is_idle());

    let resolved = session.events::<CollectionResolved>();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].0.outcome, CollectionOutcome::Optimal);
    assert_eq!(resolved[0].0.reward, 200);
}

#[test]
fn test_not_resolved_before_travel_time() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.advance(Duration::from_millis(999));
    session.assert_bin_status("LY-01", BinStatus::PendingCollection);
    session.assert_score(0);

    session.advance(Duration::from_millis(1));
    session.assert_score(200);
}

#[test]
fn test_overfull_collection_cuts_it_close() {
    let mut session = session_with_full_bin(97.0);
    session.queue_dispatch("LY-01");
    session.flush();
    session.advance(TRAVEL);
    session.assert_score(50);
}

#[test]
fn test_premature_collection_floors_score() {
    let mut session = session_with_full_bin(50.0).with_score(20);
    session.queue_dispatch("LY-01");
    session.flush();
    session.advance(TRAVEL);

    session.assert_score(0);
    session.assert_log_contains("LY-01 PREMATURE COLLECTION");
}

#[test]
fn test_concurrent_dispatches() {
    let mut session = session_with_full_bin(80.0).with_bin_fill("LY-04", 90.0);
    session.queue_dispatch("LY-01");
    session.queue_dispatch("LY-04");
    session.flush();

    assert_eq!(session.session().pending_count(), 2);
    session.assert_fuel(70.0);

    session.advance(TRAVEL);
    session.assert_score(400);
    assert_eq!(session.session().pending_count(), 0);
}

#[test]
fn test_restart_discards_in_flight_dispatch() {
    let mut session = session_with_full_bin(80.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.queue_start();
    session.flush();
    session.advance(TRAVEL);

    session.assert_score(0);
    assert!(session.resolver().is_idle());
    assert_ne!(session.bin("LY-01").status, BinStatus::PendingCollection);
}

#[test]
fn test_game_over_freezes_pending_collection() {
    let mut session = session_with_full_bin(80.0)
        .with_overflows(4)
        .with_bin_fill("LY-02", 99.9)
        .with_bin_rate("LY-02", 1.0);
    session.queue_dispatch("LY-01");
    session.flush();

    session.advance(TRAVEL);

    session.assert_phase(GamePhase::GameOver);
    session.assert_score(0);
    session.assert_bin_status("LY-01", BinStatus::PendingCollection);
}
