//! Top bar: title, score and the overflow counter.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::{GameParams, Session};

use crate::theme;
use crate::UiSet;

/// Overflow counts above this are shown in red.
const OVERFLOW_ALARM: u32 = 3;

pub fn overflow_color(overflows: u32) -> egui::Color32 {
    if overflows > OVERFLOW_ALARM {
        theme::RED
    } else {
        theme::EMERALD
    }
}

fn stat(ui: &mut egui::Ui, caption: &str, value: egui::RichText) {
    ui.vertical(|ui| {
        ui.label(
            egui::RichText::new(caption.to_uppercase())
                .monospace()
                .size(10.0)
                .color(theme::DIM),
        );
        ui.label(value.monospace().size(22.0).strong());
    });
}

pub fn hud_ui(mut contexts: EguiContexts, session: Res<Session>, params: Res<GameParams>) {
    egui::TopBottomPanel::top("eco_route_hud")
        .frame(
            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(1.0, theme::BORDER))
                .inner_margin(egui::Margin::symmetric(24, 12)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new("ECO-ROUTE ENGINE")
                            .size(20.0)
                            .strong()
                            .color(theme::EMERALD_LIGHT),
                    );
                    ui.label(
                        egui::RichText::new("SWMS PREDICTIVE SIMULATOR")
                            .monospace()
                            .size(10.0)
                            .color(theme::TEAL),
                    );
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    stat(
                        ui,
                        "Overflows",
                        egui::RichText::new(format!(
                            "{}/{}",
                            session.overflows, params.scoring.overflow_limit
                        ))
                        .color(overflow_color(session.overflows)),
                    );
                    ui.add_space(32.0);
                    stat(
                        ui,
                        "System Score",
                        egui::RichText::new(session.score.to_string()).color(egui::Color32::WHITE),
                    );
                });
            });
        });
}

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, hud_ui.in_set(UiSet::Panels));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overflow_color_turns_red_above_three() {
        assert_eq!(overflow_color(0), theme::EMERALD);
        assert_eq!(overflow_color(3), theme::EMERALD);
        assert_eq!(overflow_color(4), theme::RED);
    }
}
