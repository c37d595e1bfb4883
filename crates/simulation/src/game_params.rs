//! Data-driven game parameters.
//!
//! Gathers every simulation constant (bin spawning, fleet fuel, wave
//! scaling, scoring windows) into a single [`GameParams`] resource so they
//! can be tuned without touching the loop or resolver code.
//!
//! Systems read `Res<GameParams>`; the pure session functions take
//! `&GameParams` directly.

use std::ops::Range;
use std::time::Duration;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Parameter groups
// ---------------------------------------------------------------------------

/// Bin spawning and fill tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinParams {
    /// Bins created per session.
    pub count: usize,
    /// Horizontal spawn band, percent of arena width.
    pub spawn_x: Range<f32>,
    /// Vertical spawn band, percent of arena height.
    pub spawn_y: Range<f32>,
    /// Initial fill drawn uniformly from this range.
    pub initial_fill: Range<f32>,
    /// Base fill per tick, before the wave multiplier.
    pub fill_rate: Range<f32>,
    /// Fill strictly above this is shown as `Warning`.
    pub warning_threshold: f32,
    /// Fill at or above this overflows.
    pub overflow_level: f32,
}

impl Default for BinParams {
    fn default() -> Self {
        Self {
            count: 6,
            spawn_x: 15.0..85.0,
            spawn_y: 20.0..80.0,
            initial_fill: 0.0..30.0,
            fill_rate: 0.5..2.0,
            warning_threshold: 80.0,
            overflow_level: 100.0,
        }
    }
}

/// Dispatch fuel economy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetParams {
    pub dispatch_cost: f32,
    pub fuel_max: f32,
    /// Fuel regained every tick.
    pub fuel_regen: f32,
    /// Wall-clock delay between a dispatch and its resolution.
    pub dispatch_delay_ms: u64,
}

impl Default for FleetParams {
    fn default() -> Self {
        Self {
            dispatch_cost: 15.0,
            fuel_max: 100.0,
            fuel_regen: 0.5,
            dispatch_delay_ms: 1000,
        }
    }
}

/// Difficulty progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveParams {
    /// Fill multiplier is `1 + wave * rate_factor`.
    pub rate_factor: f32,
    /// A wave advances once score exceeds `wave * score_step`.
    pub score_step: u32,
    pub max_wave: u8,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            rate_factor: 0.2,
            score_step: 1500,
            max_wave: 3,
        }
    }
}

/// Collection rewards and the losing condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringParams {
    /// Inclusive fill window that earns the optimal reward.
    pub optimal_min: f32,
    pub optimal_max: f32,
    pub optimal_reward: i32,
    /// Reward for collecting above `optimal_max`.
    pub late_reward: i32,
    /// Reward for collecting below `optimal_min` (negative).
    pub premature_reward: i32,
    /// Cumulative overflows that end the session.
    pub overflow_limit: u32,
}

impl Default for ScoringParams {
    fn default() -> Self {
        Self {
            optimal_min: 75.0,
            optimal_max: 95.0,
            optimal_reward: 200,
            late_reward: 50,
            premature_reward: -50,
            overflow_limit: 5,
        }
    }
}

// ---------------------------------------------------------------------------
// GameParams resource
// ---------------------------------------------------------------------------

/// Every tunable of the collection mini-game.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameParams {
    /// Fixed simulation step.
    pub tick_period_ms: u64,
    /// Log feed ring-buffer size.
    pub log_capacity: usize,
    pub bins: BinParams,
    pub fleet: FleetParams,
    pub waves: WaveParams,
    pub scoring: ScoringParams,
}

impl Default for GameParams {
    fn default() -> Self {
        Self {
            tick_period_ms: 200,
            log_capacity: 6,
            bins: BinParams::default(),
            fleet: FleetParams::default(),
            waves: WaveParams::default(),
            scoring: ScoringParams::default(),
        }
    }
}

impl GameParams {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms)
    }

    pub fn dispatch_delay(&self) -> Duration {
        Duration::from_millis(self.fleet.dispatch_delay_ms)
    }

    /// Fill-rate multiplier applied during `wave`.
    pub fn wave_multiplier(&self, wave: u8) -> f32 {
        1.0 + wave as f32 * self.waves.rate_factor
    }

    /// Score that must be exceeded to leave `wave`.
    pub fn wave_threshold(&self, wave: u8) -> u32 {
        wave as u32 * self.waves.score_step
    }
}

// ---------------------------------------------------------------------------
// Plugin
// ---------------------------------------------------------------------------

/// Initializes [`GameParams`] (keeping a caller-inserted override) and sets
/// the `FixedUpdate` timestep to the configured tick period.
pub struct GameParamsPlugin;

impl Plugin for GameParamsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameParams>();
        let period = app.world().resource::<GameParams>().tick_period();
        app.insert_resource(Time::<Fixed>::from_duration(period));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_design_constants() {
        let p = GameParams::default();
        assert_eq!(p.tick_period(), Duration::from_millis(200));
        assert_eq!(p.log_capacity, 6);
        assert_eq!(p.bins.count, 6);
        assert_eq!(p.fleet.dispatch_cost, 15.0);
        assert_eq!(p.fleet.fuel_max, 100.0);
        assert_eq!(p.dispatch_delay(), Duration::from_secs(1));
        assert_eq!(p.scoring.overflow_limit, 5);
        assert_eq!(p.waves.max_wave, 3);
    }

    #[test]
    fn test_wave_multiplier() {
        let p = GameParams::default();
        assert!((p.wave_multiplier(1) - 1.2).abs() < 1e-6);
        assert!((p.wave_multiplier(2) - 1.4).abs() < 1e-6);
        assert!((p.wave_multiplier(3) - 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_wave_threshold() {
        let p = GameParams::default();
        assert_eq!(p.wave_threshold(1), 1500);
        assert_eq!(p.wave_threshold(2), 3000);
        assert_eq!(p.wave_threshold(3), 4500);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut p = GameParams::default();
        p.fleet.dispatch_cost = 20.0;
        p.bins.spawn_x = 10.0..90.0;
        let json = serde_json::to_string(&p).expect("serialize");
        let restored: GameParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(restored, p);
    }

    #[test]
    fn test_plugin_sets_fixed_timestep() {
        let mut app = App::new();
        app.insert_resource(GameParams {
            tick_period_ms: 50,
            ..Default::default()
        });
        app.add_plugins(GameParamsPlugin);
        assert_eq!(
            app.world().resource::<Time<Fixed>>().timestep(),
            Duration::from_millis(50)
        );
        assert_eq!(app.world().resource::<GameParams>().tick_period_ms, 50);
    }
}
