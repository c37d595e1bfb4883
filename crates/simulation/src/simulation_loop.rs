//! Fixed-rate simulation loop.
//!
//! Every `FixedUpdate` step (200 ms by default) while the session is
//! `Playing`:
//!
//! 1. Unlocked bins accrue `rate × (1 + wave × 0.2)`.
//! 2. Bins at or above 100 % overflow: counted, emptied, left `Nominal`.
//! 3. Bin status is recomputed (`Warning` above 80 %).
//! 4. Reaching the overflow limit ends the session (`GameOver`) at once.
//! 5. Fuel regenerates, capped at the tank size.
//! 6. Score above `wave × 1500` advances the wave; exceeding the last wave's
//!    threshold wins the session.
//!
//! [`advance_session`] is the pure step; [`run_simulation_tick`] wraps it as
//! a Bevy system and fans the outcome out as events.

use bevy::prelude::*;

use crate::app_state::GamePhase;
use crate::events::{BinOverflowed, SessionEnded, WaveAdvanced};
use crate::game_params::GameParams;
use crate::log_feed::LogKind;
use crate::session::Session;

/// What happened during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Ids of bins that overflowed this tick.
    pub overflowed: Vec<String>,
    /// New wave number, if the wave advanced.
    pub wave_advanced_to: Option<u8>,
    /// Terminal phase entered this tick.
    pub ended: Option<GamePhase>,
}

/// Advance the session by one fixed step. No-op unless `Playing`.
pub fn advance_session(session: &mut Session, params: &GameParams) -> TickReport {
    let mut report = TickReport::default();
    if !session.is_playing() {
        return report;
    }
    session.elapsed_ticks += 1;

    // 1–3. Fill, overflow, status.
    let multiplier = params.wave_multiplier(session.wave);
    for bin in &mut session.bins {
        if bin.accrue(multiplier, &params.bins) {
            report.overflowed.push(bin.id.clone());
        }
    }
    for id in &report.overflowed {
        session
            .log
            .push(LogKind::Error, format!("[ALERT] {id} CRITICAL OVERFLOW!"));
    }

    // 4. Losing condition.
    session.overflows += report.overflowed.len() as u32;
    if session.overflows >= params.scoring.overflow_limit {
        session.end(GamePhase::GameOver);
        report.ended = Some(GamePhase::GameOver);
        return report;
    }

    // 5. Fuel.
    session.regen_fuel(params.fleet.fuel_regen, params.fleet.fuel_max);

    // 6. Waves. Cumulative score, no per-wave baseline.
    if session.score > params.wave_threshold(session.wave) {
        if session.wave >= params.waves.max_wave {
            session.end(GamePhase::Won);
            report.ended = Some(GamePhase::Won);
        } else {
            session.wave += 1;
            session.log.push(
                LogKind::System,
                format!("WAVE {} MULTIPLIER ACTIVE", session.wave),
            );
            report.wave_advanced_to = Some(session.wave);
        }
    }

    report
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

/// Run condition: the tick loop only runs during play. Leaving `Playing`
/// stops the loop without any explicit cancellation.
pub fn session_is_playing(session: Res<Session>) -> bool {
    session.is_playing()
}

pub fn run_simulation_tick(
    mut session: ResMut<Session>,
    params: Res<GameParams>,
    mut overflowed: EventWriter<BinOverflowed>,
    mut waves: EventWriter<WaveAdvanced>,
    mut ended: EventWriter<SessionEnded>,
) {
    let report = advance_session(&mut session, &params);

    for id in report.overflowed {
        warn!("Bin {} overflowed ({} total)", id, session.overflows);
        if let Some(bin) = session.bin(&id) {
            overflowed.send(BinOverflowed {
                bin_id: id.clone(),
                position: Vec2::new(bin.x, bin.y),
            });
        }
    }
    if let Some(wave) = report.wave_advanced_to {
        info!("Wave {} reached at score {}", wave, session.score);
        waves.send(WaveAdvanced { wave });
    }
    if let Some(phase) = report.ended {
        info!(
            "Session ended: {:?} (score {}, overflows {}, wave {})",
            phase, session.score, session.overflows, session.wave
        );
        ended.send(SessionEnded {
            phase,
            score: session.score,
            overflows: session.overflows,
            wave: session.wave,
        });
    }
}
