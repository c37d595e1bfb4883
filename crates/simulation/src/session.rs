//! The [`Session`] aggregate: one play-through of the collection game.
//!
//! All mutable game state (score, fuel, wave, bins, feed) lives here and is
//! passed by reference to the tick loop and the dispatch resolver. Every
//! mutation goes through a named transition on this type.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::app_state::GamePhase;
use crate::bins::{spawn_bins, Bin};
use crate::game_params::GameParams;
use crate::log_feed::{LogFeed, LogKind};

pub const MSG_ENGINE_ONLINE: &str = "ML ROUTING ENGINE: ONLINE";
pub const MSG_OBJECTIVE: &str = "OBJECTIVE: DISPATCH TRUCKS AT 80% CAPACITY";
pub const MSG_OVERWHELMED: &str = "SYSTEM OVERWHELMED";
pub const MSG_COMPLETE: &str = "OPTIMIZATION COMPLETE";

/// One play-through.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Never negative; rewards are applied with a floor of zero.
    pub score: u32,
    pub overflows: u32,
    /// Kept within `0..=fuel_max`.
    pub fuel: f32,
    /// 1-based difficulty tier.
    pub wave: u8,
    pub elapsed_ticks: u64,
    pub phase: GamePhase,
    pub bins: Vec<Bin>,
    pub log: LogFeed,
    /// Bumped on every start. Dispatches remember the generation they were
    /// scheduled in so a restart makes them inert.
    pub generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            score: 0,
            overflows: 0,
            fuel: 100.0,
            wave: 1,
            elapsed_ticks: 0,
            phase: GamePhase::Menu,
            bins: Vec::new(),
            log: LogFeed::default(),
            generation: 0,
        }
    }
}

impl Session {
    /// Build a session sized for `params` but still sitting in the menu.
    pub fn new(params: &GameParams) -> Self {
        Self {
            fuel: params.fleet.fuel_max,
            log: LogFeed::with_capacity(params.log_capacity),
            ..Default::default()
        }
    }

    /// Start (or restart) a play-through: fresh bins, full fuel, wave 1.
    ///
    /// Valid from any phase; this is the only transition back into `Playing`.
    pub fn start<R: Rng + ?Sized>(&mut self, params: &GameParams, rng: &mut R) {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            phase: GamePhase::Playing,
            bins: spawn_bins(&params.bins, rng),
            generation,
            ..Self::new(params)
        };
        self.log.push(LogKind::Success, MSG_ENGINE_ONLINE);
        self.log.push(LogKind::Info, MSG_OBJECTIVE);
    }

    pub fn is_playing(&self) -> bool {
        self.phase.is_playing()
    }

    pub fn bin(&self, id: &str) -> Option<&Bin> {
        self.bins.iter().find(|b| b.id == id)
    }

    pub fn bin_mut(&mut self, id: &str) -> Option<&mut Bin> {
        self.bins.iter_mut().find(|b| b.id == id)
    }

    /// Add a (possibly negative) reward; the score never drops below zero.
    pub fn apply_reward(&mut self, reward: i32) {
        self.score = (i64::from(self.score) + i64::from(reward)).clamp(0, i64::from(u32::MAX)) as u32;
    }

    /// Deduct `cost` if the tank holds at least that much.
    pub fn try_spend_fuel(&mut self, cost: f32) -> bool {
        if self.fuel < cost {
            return false;
        }
        self.fuel = (self.fuel - cost).max(0.0);
        true
    }

    pub fn regen_fuel(&mut self, amount: f32, max: f32) {
        self.fuel = (self.fuel + amount).clamp(0.0, max);
    }

    /// Freeze the session in a terminal phase.
    pub fn end(&mut self, phase: GamePhase) {
        debug_assert!(phase.is_terminal());
        self.phase = phase;
        match phase {
            GamePhase::GameOver => self.log.push(LogKind::Error, MSG_OVERWHELMED),
            GamePhase::Won => self.log.push(LogKind::Success, MSG_COMPLETE),
            _ => {}
        }
    }

    /// Active play time in seconds for display.
    pub fn elapsed_secs(&self, params: &GameParams) -> f32 {
        (self.elapsed_ticks as f64 * params.tick_period().as_secs_f64()) as f32
    }

    /// Bins currently locked by an in-flight dispatch.
    pub fn pending_count(&self) -> usize {
        self.bins.iter().filter(|b| b.is_pending()).count()
    }
}
