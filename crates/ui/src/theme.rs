use bevy_egui::{egui, EguiContexts};

// Palette shared by the panels and the arena painter.
pub const BACKGROUND: egui::Color32 = egui::Color32::from_rgb(2, 6, 5);
pub const PANEL: egui::Color32 = egui::Color32::from_rgb(5, 10, 8);
pub const ARENA: egui::Color32 = egui::Color32::from_rgb(6, 13, 10);
pub const BORDER: egui::Color32 = egui::Color32::from_rgb(6, 78, 59);
pub const EMERALD: egui::Color32 = egui::Color32::from_rgb(16, 185, 129);
pub const EMERALD_LIGHT: egui::Color32 = egui::Color32::from_rgb(52, 211, 153);
pub const TEAL: egui::Color32 = egui::Color32::from_rgb(20, 184, 166);
pub const TEAL_LIGHT: egui::Color32 = egui::Color32::from_rgb(45, 212, 191);
pub const RED: egui::Color32 = egui::Color32::from_rgb(239, 68, 68);
pub const RED_LIGHT: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
pub const YELLOW: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
pub const NEUTRAL: egui::Color32 = egui::Color32::from_rgb(82, 82, 82);
pub const MUTED: egui::Color32 = egui::Color32::from_rgb(163, 163, 163);
pub const DIM: egui::Color32 = egui::Color32::from_rgb(115, 115, 115);

pub fn apply_eco_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();

    let inactive = egui::Color32::from_rgb(12, 28, 22);
    let hover = egui::Color32::from_rgb(6, 95, 70);
    let active = EMERALD;

    style.visuals.widgets.noninteractive.bg_fill = PANEL;
    style.visuals.widgets.inactive.bg_fill = inactive;
    style.visuals.widgets.hovered.bg_fill = hover;
    style.visuals.widgets.active.bg_fill = active;
    style.visuals.widgets.inactive.weak_bg_fill = inactive;
    style.visuals.widgets.hovered.weak_bg_fill = hover;
    style.visuals.widgets.active.weak_bg_fill = active;

    style.visuals.window_fill = PANEL;
    style.visuals.panel_fill = BACKGROUND;
    style.visuals.extreme_bg_color = egui::Color32::BLACK;
    style.visuals.faint_bg_color = ARENA;
    style.visuals.window_stroke = egui::Stroke::new(1.0, BORDER);

    style.visuals.selection.bg_fill = active;
    style.visuals.selection.stroke = egui::Stroke::new(1.0, active);

    let window_rounding = egui::CornerRadius::same(12);
    let widget_rounding = egui::CornerRadius::same(8);

    style.visuals.window_corner_radius = window_rounding;
    style.visuals.widgets.noninteractive.corner_radius = widget_rounding;
    style.visuals.widgets.inactive.corner_radius = widget_rounding;
    style.visuals.widgets.hovered.corner_radius = widget_rounding;
    style.visuals.widgets.active.corner_radius = widget_rounding;

    ctx.set_style(style);
}
