//! Builder methods that force session state for a scenario.

use crate::bins::Bin;
use crate::game_params::{BinParams, GameParams};
use crate::session::Session;

use super::TestSession;

impl TestSession {
    fn session_mut(&mut self) -> bevy::prelude::Mut<'_, Session> {
        self.app.world_mut().resource_mut::<Session>()
    }

    fn bin_params(&self) -> BinParams {
        self.app.world().resource::<GameParams>().bins.clone()
    }

    /// Set a bin's fill and refresh its status. Panics on an unknown id.
    pub fn with_bin_fill(mut self, bin_id: &str, fill: f32) -> Self {
        let params = self.bin_params();
        {
            let mut session = self.session_mut();
            let bin = session
                .bin_mut(bin_id)
                .unwrap_or_else(|| panic!("no bin {bin_id}"));
            bin.fill = fill;
            bin.refresh_status(&params);
        }
        self
    }

    /// Set a bin's per-tick rate. Panics on an unknown id.
    pub fn with_bin_rate(mut self, bin_id: &str, rate: f32) -> Self {
        self.session_mut()
            .bin_mut(bin_id)
            .unwrap_or_else(|| panic!("no bin {bin_id}"))
            .rate = rate;
        self
    }

    /// Freeze every bin: zero fill and zero rate.
    pub fn with_idle_bins(mut self) -> Self {
        let params = self.bin_params();
        for bin in &mut self.session_mut().bins {
            bin.fill = 0.0;
            bin.rate = 0.0;
            bin.refresh_status(&params);
        }
        self
    }

    /// Replace the bin layout.
    pub fn with_bins(mut self, bins: Vec<Bin>) -> Self {
        self.session_mut().bins = bins;
        self
    }

    pub fn with_fuel(mut self, fuel: f32) -> Self {
        self.session_mut().fuel = fuel;
        self
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.session_mut().score = score;
        self
    }

    pub fn with_overflows(mut self, overflows: u32) -> Self {
        self.session_mut().overflows = overflows;
        self
    }

    pub fn with_wave(mut self, wave: u8) -> Self {
        self.session_mut().wave = wave;
        self
    }
}
