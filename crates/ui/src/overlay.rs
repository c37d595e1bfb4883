//! Modal overlay for the menu and the two endings, with the start/restart
//! button.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::{ActionQueue, GameAction, GameParams, GamePhase, Session};

use crate::effects::VisualEffects;
use crate::theme;
use crate::UiSet;

const BRIEFING: &str = "Play the role of the Random Forest algorithm. Click bins to dispatch \
trucks when they reach 80% capacity. Collecting too early wastes fuel. Missing a full bin \
causes overflow.";

const BUTTON_SIZE: egui::Vec2 = egui::Vec2 { x: 300.0, y: 52.0 };

/// Title, accent colour and button caption for a phase. `None` while playing.
pub fn overlay_copy(phase: GamePhase) -> Option<(&'static str, egui::Color32, &'static str)> {
    match phase {
        GamePhase::Menu => Some(("SWMS ROUTING", egui::Color32::WHITE, "INITIALIZE AI ROUTING")),
        GamePhase::GameOver => Some(("SYSTEM OVERWHELMED", theme::RED, "RESTART SIMULATION")),
        GamePhase::Won => Some(("OPTIMIZATION COMPLETE", theme::TEAL_LIGHT, "RESTART SIMULATION")),
        GamePhase::Playing => None,
    }
}

pub fn final_summary(session: &Session, params: &GameParams) -> String {
    format!(
        "Final Score: {} | Overflows: {}/{} | Waves Cleared: {}",
        session.score, session.overflows, params.scoring.overflow_limit, session.wave
    )
}

pub fn overlay_ui(
    mut contexts: EguiContexts,
    phase: Res<State<GamePhase>>,
    session: Res<Session>,
    params: Res<GameParams>,
    mut queue: ResMut<ActionQueue>,
    mut effects: ResMut<VisualEffects>,
) {
    let Some((title, accent, button)) = overlay_copy(*phase.get()) else {
        return;
    };
    let ctx = contexts.ctx_mut();
    let screen = ctx.screen_rect();

    egui::Area::new(egui::Id::new("eco_route_overlay"))
        .fixed_pos(screen.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(egui::Color32::from_black_alpha(205))
                .show(ui, |ui| {
                    ui.set_min_size(screen.size());
                    ui.vertical_centered(|ui| {
                        ui.add_space(screen.height() * 0.28);
                        ui.label(egui::RichText::new(title).size(56.0).strong().color(accent));
                        ui.add_space(16.0);

                        let body = if *phase.get() == GamePhase::Menu {
                            BRIEFING.to_string()
                        } else {
                            final_summary(&session, &params)
                        };
                        ui.scope(|ui| {
                            ui.set_max_width(640.0);
                            ui.label(
                                egui::RichText::new(body)
                                    .monospace()
                                    .size(14.0)
                                    .color(theme::MUTED),
                            );
                        });
                        ui.add_space(32.0);

                        let start = ui.add_sized(
                            BUTTON_SIZE,
                            egui::Button::new(
                                egui::RichText::new(button)
                                    .size(18.0)
                                    .strong()
                                    .color(egui::Color32::BLACK),
                            )
                            .fill(theme::EMERALD),
                        );
                        if start.clicked() {
                            info!("Starting session from {:?}", phase.get());
                            effects.clear();
                            queue.push(GameAction::StartSession);
                        }
                    });
                });
        });
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, overlay_ui.in_set(UiSet::Overlay));
    }
}
