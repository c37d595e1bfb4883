use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use crate::*;

/// Register all UI plugins and systems.
pub(crate) fn register_ui_systems(app: &mut App) {
    // Core egui
    app.add_plugins(EguiPlugin);
    app.add_systems(Startup, theme::apply_eco_theme);

    // UI feature plugins
    app.add_plugins(effects::EffectsPlugin);
    app.add_plugins(hud::HudPlugin);
    app.add_plugins(telemetry_panel::TelemetryPanelPlugin);
    app.add_plugins(arena::ArenaPlugin);
    app.add_plugins(overlay::OverlayPlugin);
}
