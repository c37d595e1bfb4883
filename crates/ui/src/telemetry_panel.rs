//! Right-hand telemetry panel: fleet fuel, live analytics and the network
//! feed.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::log_feed::LogKind;
use simulation::{GameParams, Session};

use crate::theme;
use crate::UiSet;

const PANEL_WIDTH: f32 = 320.0;
/// Fuel below this is drawn in red.
const LOW_FUEL: f32 = 20.0;

pub fn fuel_color(fuel: f32) -> egui::Color32 {
    if fuel < LOW_FUEL {
        theme::RED
    } else {
        theme::EMERALD
    }
}

pub fn log_kind_color(kind: LogKind) -> egui::Color32 {
    match kind {
        LogKind::Error => theme::RED_LIGHT,
        LogKind::Warning => theme::YELLOW,
        LogKind::Success => theme::EMERALD_LIGHT,
        LogKind::System => theme::TEAL,
        LogKind::Info => theme::MUTED,
    }
}

/// Whole seconds of active play, e.g. `42s`.
pub fn format_time_active(secs: f32) -> String {
    format!("{}s", secs.max(0.0).floor() as u64)
}

/// Caption under the fuel bar, e.g. `COST: 15% PER ROUTE`.
pub fn dispatch_cost_caption(params: &GameParams) -> String {
    let pct = params.fleet.dispatch_cost / params.fleet.fuel_max * 100.0;
    format!("COST: {}% PER ROUTE", pct.round() as i64)
}

fn card(ui: &mut egui::Ui, title: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgba_unmultiplied(23, 23, 23, 110))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(12)))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(title.to_uppercase())
                    .monospace()
                    .size(11.0)
                    .color(theme::MUTED),
            );
            ui.add_space(8.0);
            add_contents(ui);
        });
}

fn fuel_bar(ui: &mut egui::Ui, fuel: f32, max: f32) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 14.0),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 7.0, egui::Color32::BLACK);
    let frac = if max > 0.0 { (fuel / max).clamp(0.0, 1.0) } else { 0.0 };
    let inner = rect.shrink(2.0);
    let filled = egui::Rect::from_min_size(
        inner.min,
        egui::vec2(inner.width() * frac, inner.height()),
    );
    painter.rect_filled(filled, 5.0, fuel_color(fuel));
}

fn analytics_row(ui: &mut egui::Ui, caption: &str, value: String, color: egui::Color32) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(caption).monospace().size(10.0).color(theme::DIM));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(egui::RichText::new(value).size(18.0).strong().color(color));
        });
    });
}

pub fn telemetry_panel_ui(
    mut contexts: EguiContexts,
    session: Res<Session>,
    params: Res<GameParams>,
) {
    egui::SidePanel::right("eco_route_telemetry")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::new()
                .fill(theme::BACKGROUND)
                .inner_margin(egui::Margin::same(16)),
        )
        .show(contexts.ctx_mut(), |ui| {
            card(ui, "Fleet Dispatch Energy", |ui| {
                fuel_bar(ui, session.fuel, params.fleet.fuel_max);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    ui.label(
                        egui::RichText::new(dispatch_cost_caption(&params))
                            .monospace()
                            .size(10.0)
                            .color(theme::DIM),
                    );
                });
            });
            ui.add_space(12.0);

            card(ui, "Live Analytics", |ui| {
                analytics_row(
                    ui,
                    "Current Wave",
                    session.wave.to_string(),
                    egui::Color32::WHITE,
                );
                analytics_row(
                    ui,
                    "Time Active",
                    format_time_active(session.elapsed_secs(&params)),
                    egui::Color32::WHITE,
                );
                analytics_row(
                    ui,
                    "Trucks En Route",
                    session.pending_count().to_string(),
                    theme::TEAL_LIGHT,
                );
            });
            ui.add_space(12.0);

            egui::Frame::new()
                .fill(theme::PANEL)
                .stroke(egui::Stroke::new(1.0, theme::BORDER))
                .corner_radius(egui::CornerRadius::same(12))
                .inner_margin(egui::Margin::same(12))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(
                        egui::RichText::new("NETWORK FEED")
                            .monospace()
                            .size(10.0)
                            .color(theme::EMERALD),
                    );
                    ui.separator();
                    for entry in session.log.entries() {
                        let mut text = egui::RichText::new(&entry.message)
                            .monospace()
                            .size(11.0)
                            .color(log_kind_color(entry.kind));
                        if entry.kind == LogKind::Error {
                            text = text.strong();
                        }
                        ui.label(text);
                    }
                });
        });
}

pub struct TelemetryPanelPlugin;

impl Plugin for TelemetryPanelPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            telemetry_panel_ui.after(crate::hud::hud_ui).in_set(UiSet::Panels),
        );
    }
}
