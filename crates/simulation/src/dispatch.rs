//! Dispatch resolver: the player's "collect this bin" action.
//!
//! Accepting a dispatch costs fuel up front and locks the bin. After a fixed
//! wall-clock delay the collection resolves and is scored by the bin's fill
//! **at resolution time**:
//!
//! | fill          | outcome      | reward |
//! |---------------|--------------|--------|
//! | `[75, 95]`    | optimal      | +200   |
//! | `(95, ∞)`     | cut it close | +50    |
//! | `[0, 75)`     | premature    | −50    |
//!
//! Each in-flight [`DispatchEvent`] has its own id and resolution instant, so
//! any number of different bins may be pending at once.

use std::fmt;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::events::CollectionResolved;
use crate::game_params::{GameParams, ScoringParams};
use crate::log_feed::LogKind;
use crate::session::Session;

pub const MSG_INSUFFICIENT_FUEL: &str = "INSUFFICIENT FUEL FOR DISPATCH";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dispatch was refused. A refusal never changes the session (apart
/// from the advisory feed line for [`DispatchError::InsufficientFuel`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DispatchError {
    NotPlaying,
    UnknownBin,
    AlreadyPending,
    InsufficientFuel,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            DispatchError::NotPlaying => "session is not active",
            DispatchError::UnknownBin => "no such bin",
            DispatchError::AlreadyPending => "bin already has a truck en route",
            DispatchError::InsufficientFuel => "insufficient fuel for dispatch",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for DispatchError {}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionOutcome {
    Optimal,
    CutItClose,
    Premature,
}

impl CollectionOutcome {
    /// Classify a collection by the bin's fill at resolution time.
    pub fn classify(fill: f32, scoring: &ScoringParams) -> Self {
        if fill > scoring.optimal_max {
            CollectionOutcome::CutItClose
        } else if fill >= scoring.optimal_min {
            CollectionOutcome::Optimal
        } else {
            CollectionOutcome::Premature
        }
    }

    pub fn reward(self, scoring: &ScoringParams) -> i32 {
        match self {
            CollectionOutcome::Optimal => scoring.optimal_reward,
            CollectionOutcome::CutItClose => scoring.late_reward,
            CollectionOutcome::Premature => scoring.premature_reward,
        }
    }

    /// Floating-text caption, e.g. `OPTIMAL! +200`.
    pub fn caption(self, reward: i32) -> String {
        let title = match self {
            CollectionOutcome::Optimal => "OPTIMAL!",
            CollectionOutcome::CutItClose => "CUT IT CLOSE!",
            CollectionOutcome::Premature => "INEFFICIENT!",
        };
        format!("{title} {reward:+}")
    }
}

/// Result of one resolved dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionReport {
    pub event_id: u64,
    pub bin_id: String,
    pub target: Vec2,
    pub fill_at_resolution: f32,
    pub outcome: CollectionOutcome,
    pub reward: i32,
}

// ---------------------------------------------------------------------------
// In-flight dispatches
// ---------------------------------------------------------------------------

/// A scheduled collection, owned by the [`DispatchResolver`].
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchEvent {
    pub id: u64,
    pub bin_id: String,
    /// Arena position (percent) the truck drives to.
    pub target: Vec2,
    pub dispatched_at: Duration,
    pub resolve_at: Duration,
    /// Session generation at dispatch time.
    pub generation: u64,
}

impl DispatchEvent {
    /// Travel progress in `0.0..=1.0` for the truck line.
    pub fn progress(&self, now: Duration) -> f32 {
        let total = self.resolve_at.saturating_sub(self.dispatched_at);
        if total.is_zero() {
            return 1.0;
        }
        let done = now.saturating_sub(self.dispatched_at);
        (done.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[derive(Resource, Debug, Clone, Default)]
pub struct DispatchResolver {
    in_flight: Vec<DispatchEvent>,
    next_id: u64,
}

impl DispatchResolver {
    /// Validate and schedule a collection of `bin_id`.
    ///
    /// On success the fuel is spent, the bin is locked and the new event id is
    /// returned.
    pub fn dispatch(
        &mut self,
        session: &mut Session,
        params: &GameParams,
        bin_id: &str,
        target: Vec2,
        now: Duration,
    ) -> Result<u64, DispatchError> {
        if !session.is_playing() {
            return Err(DispatchError::NotPlaying);
        }
        let Some(bin) = session.bin(bin_id) else {
            return Err(DispatchError::UnknownBin);
        };
        if bin.is_pending() {
            return Err(DispatchError::AlreadyPending);
        }
        if !session.try_spend_fuel(params.fleet.dispatch_cost) {
            session.log.push(LogKind::Error, MSG_INSUFFICIENT_FUEL);
            return Err(DispatchError::InsufficientFuel);
        }

        if let Some(bin) = session.bin_mut(bin_id) {
            bin.lock();
        }
        session
            .log
            .push(LogKind::System, format!("DISPATCHING ROUTE TO {bin_id}"));

        let id = self.next_id;
        self.next_id += 1;
        self.in_flight.push(DispatchEvent {
            id,
            bin_id: bin_id.to_string(),
            target,
            dispatched_at: now,
            resolve_at: now + params.dispatch_delay(),
            generation: session.generation,
        });
        Ok(id)
    }

    /// Resolve every dispatch whose time has come.
    ///
    /// Dispatches from an earlier generation, or against a session that has
    /// already ended, are dropped without touching the session.
    pub fn resolve_due(
        &mut self,
        session: &mut Session,
        params: &GameParams,
        now: Duration,
    ) -> Vec<CollectionReport> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|e| e.resolve_at <= now);
        self.in_flight = pending;

        let mut reports = Vec::new();
        for event in due {
            if event.generation != session.generation || !session.is_playing() {
                debug!("Dropping stale dispatch {} for {}", event.id, event.bin_id);
                continue;
            }
            if let Some(report) = resolve_one(session, params, &event) {
                reports.push(report);
            }
        }
        reports
    }

    pub fn in_flight(&self) -> &[DispatchEvent] {
        &self.in_flight
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_empty()
    }
}

fn resolve_one(
    session: &mut Session,
    params: &GameParams,
    event: &DispatchEvent,
) -> Option<CollectionReport> {
    let bin = session.bin_mut(&event.bin_id)?;
    let fill = bin.fill;
    bin.empty();

    let outcome = CollectionOutcome::classify(fill, &params.scoring);
    let reward = outcome.reward(&params.scoring);
    session.apply_reward(reward);

    match outcome {
        CollectionOutcome::Optimal => session
            .log
            .push(LogKind::Success, format!("{} COLLECTED OPTIMALLY", event.bin_id)),
        CollectionOutcome::Premature => session
            .log
            .push(LogKind::Warning, format!("{} PREMATURE COLLECTION", event.bin_id)),
        CollectionOutcome::CutItClose => {}
    }

    Some(CollectionReport {
        event_id: event.id,
        bin_id: event.bin_id.clone(),
        target: event.target,
        fill_at_resolution: fill,
        outcome,
        reward,
    })
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Resolve due dispatches against the virtual clock.
pub fn resolve_dispatches(
    time: Res<Time>,
    params: Res<GameParams>,
    mut session: ResMut<Session>,
    mut resolver: ResMut<DispatchResolver>,
    mut resolved: EventWriter<CollectionResolved>,
) {
    if resolver.is_idle() {
        return;
    }
    for report in resolver.resolve_due(&mut session, &params, time.elapsed()) {
        info!(
            "Collected {} at {:.1}% -> {:?} ({:+}), score {}",
            report.bin_id, report.fill_at_resolution, report.outcome, report.reward, session.score
        );
        resolved.send(CollectionResolved(report));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::GamePhase;
    use crate::bins::{Bin, BinStatus};

    const T0: Duration = Duration::from_millis(0);
    const ONE_SEC: Duration = Duration::from_secs(1);

    fn session_with_fill(fill: f32) -> (Session, GameParams) {
        let params = GameParams::default();
        let mut session = Session::new(&params);
        session.phase = GamePhase::Playing;
        session.generation = 1;
        session.bins = vec![
            Bin::new("LY-01", 40.0, 40.0, fill, 1.0),
            Bin::new("LY-02", 60.0, 60.0, 10.0, 1.0),
        ];
        (session, params)
    }

    #[test]
    fn test_classify_boundaries() {
        let s = ScoringParams::default();
        assert_eq!(CollectionOutcome::classify(75.0, &s), CollectionOutcome::Optimal);
        assert_eq!(CollectionOutcome::classify(95.0, &s), CollectionOutcome::Optimal);
        assert_eq!(CollectionOutcome::classify(95.01, &s), CollectionOutcome::CutItClose);
        assert_eq!(CollectionOutcome::classify(140.0, &s), CollectionOutcome::CutItClose);
        assert_eq!(CollectionOutcome::classify(74.99, &s), CollectionOutcome::Premature);
        assert_eq!(CollectionOutcome::classify(0.0, &s), CollectionOutcome::Premature);
    }

    #[test]
    fn test_captions() {
        assert_eq!(CollectionOutcome::Optimal.caption(200), "OPTIMAL! +200");
        assert_eq!(CollectionOutcome::CutItClose.caption(50), "CUT IT CLOSE! +50");
        assert_eq!(CollectionOutcome::Premature.caption(-50), "INEFFICIENT! -50");
    }

    #[test]
    fn test_dispatch_locks_bin_and_spends_fuel() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        let id = resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::new(40.0, 40.0), T0)
            .expect("dispatch accepted");
        assert_eq!(id, 0);
        assert_eq!(session.fuel, 85.0);
        assert_eq!(session.bins[0].status, BinStatus::PendingCollection);
        assert_eq!(resolver.in_flight().len(), 1);
        assert_eq!(resolver.in_flight()[0].resolve_at, ONE_SEC);
        assert!(session.log.contains("DISPATCHING ROUTE TO LY-01"));
    }

    #[test]
    fn test_dispatch_rejected_when_not_playing() {
        let (mut session, params) = session_with_fill(80.0);
        session.phase = GamePhase::Menu;
        let before = session.clone();
        let mut resolver = DispatchResolver::default();
        let err = resolver.dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0);
        assert_eq!(err, Err(DispatchError::NotPlaying));
        assert_eq!(session, before);
        assert!(resolver.is_idle());
    }

    #[test]
    fn test_dispatch_rejected_for_unknown_bin() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        let err = resolver.dispatch(&mut session, &params, "LY-42", Vec2::ZERO, T0);
        assert_eq!(err, Err(DispatchError::UnknownBin));
    }

    #[test]
    fn test_second_dispatch_to_same_bin_rejected() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("first dispatch");
        let fuel = session.fuel;
        let err = resolver.dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0);
        assert_eq!(err, Err(DispatchError::AlreadyPending));
        assert_eq!(session.fuel, fuel);
        assert_eq!(resolver.in_flight().len(), 1);
    }

    #[test]
    fn test_insufficient_fuel_leaves_state_unchanged() {
        let (mut session, params) = session_with_fill(80.0);
        session.fuel = 14.9;
        let mut resolver = DispatchResolver::default();
        let err = resolver.dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0);
        assert_eq!(err, Err(DispatchError::InsufficientFuel));
        assert_eq!(session.fuel, 14.9);
        assert_eq!(session.bins[0].status, BinStatus::Nominal);
        assert!(resolver.is_idle());
        assert_eq!(
            session.log.latest().map(|e| e.message.as_str()),
            Some(MSG_INSUFFICIENT_FUEL)
        );
    }

    #[test]
    fn test_exact_cost_is_enough() {
        let (mut session, params) = session_with_fill(80.0);
        session.fuel = 15.0;
        let mut resolver = DispatchResolver::default();
        assert!(resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .is_ok());
        assert_eq!(session.fuel, 0.0);
    }

    #[test]
    fn test_not_due_before_delay() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        let reports =
            resolver.resolve_due(&mut session, &params, Duration::from_millis(999));
        assert!(reports.is_empty());
        assert_eq!(session.bins[0].status, BinStatus::PendingCollection);
    }

    #[test]
    fn test_optimal_uses_fill_at_resolution() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        session.bins[0].fill = 82.0;

        let reports = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].outcome, CollectionOutcome::Optimal);
        assert_eq!(reports[0].fill_at_resolution, 82.0);
        assert_eq!(session.score, 200);
        assert_eq!(session.bins[0].fill, 0.0);
        assert_eq!(session.bins[0].status, BinStatus::Nominal);
        assert!(session.log.contains("LY-01 COLLECTED OPTIMALLY"));
    }

    #[test]
    fn test_cut_it_close_reward() {
        let (mut session, params) = session_with_fill(96.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        let reports = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert_eq!(reports[0].outcome, CollectionOutcome::CutItClose);
        assert_eq!(session.score, 50);
    }

    #[test]
    fn test_premature_floors_score() {
        let (mut session, params) = session_with_fill(50.0);
        session.score = 20;
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        let reports = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert_eq!(reports[0].outcome, CollectionOutcome::Premature);
        assert_eq!(reports[0].reward, -50);
        assert_eq!(session.score, 0);
        assert!(session.log.contains("LY-01 PREMATURE COLLECTION"));
    }

    #[test]
    fn test_concurrent_dispatches_resolve_independently() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        let a = resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("a");
        let b = resolver
            .dispatch(
                &mut session,
                &params,
                "LY-02",
                Vec2::ZERO,
                Duration::from_millis(400),
            )
            .expect("b");
        assert_ne!(a, b);
        assert_eq!(session.pending_count(), 2);

        let first = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].event_id, a);
        assert_eq!(session.pending_count(), 1);

        let second = resolver.resolve_due(&mut session, &params, Duration::from_millis(1400));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].event_id, b);
        assert_eq!(session.score, 150);
        assert!(resolver.is_idle());
    }

    #[test]
    fn test_stale_generation_is_inert() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        session.generation += 1;
        session.bins[0].empty();
        session.bins[0].fill = 85.0;

        let reports = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert!(reports.is_empty());
        assert!(resolver.is_idle());
        assert_eq!(session.score, 0);
        assert_eq!(session.bins[0].fill, 85.0);
    }

    #[test]
    fn test_resolution_after_game_over_is_inert() {
        let (mut session, params) = session_with_fill(80.0);
        let mut resolver = DispatchResolver::default();
        resolver
            .dispatch(&mut session, &params, "LY-01", Vec2::ZERO, T0)
            .expect("dispatch");
        session.end(GamePhase::GameOver);
        let frozen_score = session.score;

        let reports = resolver.resolve_due(&mut session, &params, ONE_SEC);
        assert!(reports.is_empty());
        assert_eq!(session.score, frozen_score);
        assert!(resolver.is_idle());
    }

    #[test]
    fn test_progress() {
        let event = DispatchEvent {
            id: 0,
            bin_id: "LY-01".into(),
            target: Vec2::ZERO,
            dispatched_at: Duration::from_secs(2),
            resolve_at: Duration::from_secs(3),
            generation: 1,
        };
        assert_eq!(event.progress(Duration::from_secs(1)), 0.0);
        assert!((event.progress(Duration::from_millis(2500)) - 0.5).abs() < 1e-5);
        assert_eq!(event.progress(Duration::from_secs(9)), 1.0);
    }
}
