use bevy::prelude::*;

use simulation::SimulationUpdateSet;

pub mod arena;
pub mod effects;
pub mod hud;
pub mod overlay;
mod plugin_registration;
pub mod telemetry_panel;
pub mod theme;

/// Frame order for the egui passes. Side panels must claim their space
/// before the central arena panel, and the modal overlay draws last.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum UiSet {
    Effects,
    Panels,
    Arena,
    Overlay,
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (UiSet::Effects, UiSet::Panels, UiSet::Arena, UiSet::Overlay)
                .chain()
                .after(SimulationUpdateSet::Sync),
        );
        plugin_registration::register_ui_systems(app);
    }
}
