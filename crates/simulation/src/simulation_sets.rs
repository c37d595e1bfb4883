//! Deterministic simulation ordering via `SystemSet` phases.
//!
//! # FixedUpdate phases (`SimulationSet`)
//!
//! * **Simulation** – The fixed-rate session tick (fill, overflow, fuel,
//!   waves). Only runs while the session is `Playing`.
//!
//! # Update phases (`SimulationUpdateSet`)
//!
//! ```text
//! Input  →  Resolve  →  Sync
//! ```
//!
//! * **Input** – Drain the action queue (start, dispatch).
//! * **Resolve** – Settle dispatches whose travel time has elapsed.
//! * **Sync** – Mirror the session phase into the Bevy `State`.

use bevy::prelude::*;

/// Phases for systems running in the `FixedUpdate` schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Simulation,
}

/// Ordered phases for systems running in the `Update` schedule.
///
/// Configured as a chain: `Input` → `Resolve` → `Sync`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationUpdateSet {
    /// Player actions queued by the UI (or a test) are applied here.
    Input,
    /// Due dispatches are scored against the current bin fill.
    Resolve,
    /// Derived state (the `GamePhase` state) catches up with the session.
    Sync,
}
