//! Assertion helpers for `TestSession` integration tests.

use crate::app_state::GamePhase;
use crate::bins::BinStatus;
use crate::dispatch::DispatchError;
use crate::game_actions::ActionResult;

use super::TestSession;

impl TestSession {
    pub fn assert_phase(&self, expected: GamePhase) {
        let phase = self.session().phase;
        assert_eq!(phase, expected, "Expected phase {expected:?}, got {phase:?}");
    }

    pub fn assert_score(&self, expected: u32) {
        let score = self.session().score;
        assert_eq!(score, expected, "Expected score {expected}, got {score}");
    }

    pub fn assert_overflows(&self, expected: u32) {
        let overflows = self.session().overflows;
        assert_eq!(
            overflows, expected,
            "Expected {expected} overflows, got {overflows}"
        );
    }

    /// Assert fuel within 1e-3 of `expected`.
    pub fn assert_fuel(&self, expected: f32) {
        let fuel = self.session().fuel;
        assert!(
            (fuel - expected).abs() < 1e-3,
            "Expected fuel {expected}, got {fuel}"
        );
    }

    pub fn assert_bin_status(&self, bin_id: &str, expected: BinStatus) {
        let status = self.bin(bin_id).status;
        assert_eq!(
            status, expected,
            "Expected {bin_id} to be {expected:?}, got {status:?}"
        );
    }

    pub fn assert_log_contains(&self, message: &str) {
        let session = self.session();
        assert!(
            session.log.contains(message),
            "Expected feed to contain {message:?}, got {:?}",
            session.log.entries().map(|e| &e.message).collect::<Vec<_>>()
        );
    }

    pub fn assert_last_action_succeeded(&self) {
        let result = self.last_action_result();
        assert_eq!(result, Some(ActionResult::Success));
    }

    pub fn assert_last_action_rejected(&self, expected: DispatchError) {
        let result = self.last_action_result();
        assert_eq!(result, Some(ActionResult::Rejected(expected)));
    }
}
