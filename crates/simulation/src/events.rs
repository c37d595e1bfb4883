//! Outcome events emitted by the loop and the resolver.
//!
//! These only feed presentation (floating text, particles, screen shake).
//! Nothing in the simulation reads them.

use bevy::prelude::*;

use crate::app_state::GamePhase;
use crate::dispatch::CollectionReport;

/// A dispatch passed its preconditions and a truck is en route.
#[derive(Event, Debug, Clone)]
pub struct DispatchAccepted {
    pub event_id: u64,
    pub bin_id: String,
    /// Arena position (percent) the truck is heading to.
    pub target: Vec2,
}

/// A dispatch resolved and its reward was applied.
#[derive(Event, Debug, Clone)]
pub struct CollectionResolved(pub CollectionReport);

/// A bin reached 100 % and was force-emptied.
#[derive(Event, Debug, Clone)]
pub struct BinOverflowed {
    pub bin_id: String,
    /// Arena position (percent) of the bin.
    pub position: Vec2,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct WaveAdvanced {
    pub wave: u8,
}

/// The session entered `GameOver` or `Won`.
#[derive(Event, Debug, Clone, Copy)]
pub struct SessionEnded {
    pub phase: GamePhase,
    pub score: u32,
    pub overflows: u32,
    pub wave: u8,
}

pub struct SessionEventsPlugin;

impl Plugin for SessionEventsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DispatchAccepted>()
            .add_event::<CollectionResolved>()
            .add_event::<BinOverflowed>()
            .add_event::<WaveAdvanced>()
            .add_event::<SessionEnded>();
    }
}
