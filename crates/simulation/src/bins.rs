//! Waste bins: the only entities in the arena.
//!
//! A [`Bin`] fills a little every tick, warns past 80 %, overflows at 100 %
//! and is locked (`PendingCollection`) while a truck is en route.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game_params::BinParams;

/// Display status of a bin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BinStatus {
    #[default]
    Nominal,
    /// Fill above the warning threshold.
    Warning,
    /// A dispatch is in flight; fill is frozen until it resolves.
    PendingCollection,
}

/// A simulated waste receptacle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: String,
    /// Horizontal position, percent of arena width.
    pub x: f32,
    /// Vertical position, percent of arena height.
    pub y: f32,
    /// Current fill. Never negative; may briefly sit above 100 while locked.
    pub fill: f32,
    /// Base fill per tick.
    pub rate: f32,
    pub status: BinStatus,
}

impl Bin {
    pub fn new(id: impl Into<String>, x: f32, y: f32, fill: f32, rate: f32) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            fill: fill.max(0.0),
            rate,
            status: BinStatus::Nominal,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == BinStatus::PendingCollection
    }

    /// Add one tick of waste. Returns `true` if the bin overflowed, in which
    /// case it has already been emptied.
    ///
    /// Locked bins are left untouched.
    pub fn accrue(&mut self, multiplier: f32, params: &BinParams) -> bool {
        if self.is_pending() {
            return false;
        }
        self.fill = (self.fill + self.rate * multiplier).max(0.0);
        let overflowed = self.fill >= params.overflow_level;
        if overflowed {
            self.fill = 0.0;
        }
        self.refresh_status(params);
        overflowed
    }

    /// Recompute `Nominal` / `Warning` from the fill level. Locked bins keep
    /// their status.
    pub fn refresh_status(&mut self, params: &BinParams) {
        if self.is_pending() {
            return;
        }
        self.status = if self.fill > params.warning_threshold {
            BinStatus::Warning
        } else {
            BinStatus::Nominal
        };
    }

    pub fn lock(&mut self) {
        self.status = BinStatus::PendingCollection;
    }

    /// Empty the bin after a collection and release the lock.
    pub fn empty(&mut self) {
        self.fill = 0.0;
        self.status = BinStatus::Nominal;
    }
}

/// Bin label for the `index`-th bin (zero based): `LY-01`, `LY-02`, ...
pub fn bin_label(index: usize) -> String {
    format!("LY-{:02}", index + 1)
}

/// Spawn a fresh set of bins with randomized position, rate and initial fill.
pub fn spawn_bins<R: Rng + ?Sized>(params: &BinParams, rng: &mut R) -> Vec<Bin> {
    (0..params.count)
        .map(|i| {
            let x = rng.gen_range(params.spawn_x.clone());
            let y = rng.gen_range(params.spawn_y.clone());
            let fill = rng.gen_range(params.initial_fill.clone());
            let rate = rng.gen_range(params.fill_rate.clone());
            let mut bin = Bin::new(bin_label(i), x, y, fill, rate);
            bin.refresh_status(params);
            bin
        })
        .collect()
}
