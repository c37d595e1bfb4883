//! The collection arena: bins, truck routes and cosmetic effects, painted
//! into the central panel. Clicking a bin queues a dispatch.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use simulation::dispatch::DispatchResolver;
use simulation::{ActionQueue, Bin, GameAction, Session};

use crate::effects::{EffectTone, VisualEffects};
use crate::theme;
use crate::UiSet;

const BIN_RADIUS: f32 = 26.0;
/// Fill above which an unlocked bin pulses to draw attention.
const PULSE_FILL: f32 = 75.0;
const GRID_SPACING: f32 = 48.0;

// ---------------------------------------------------------------------------
// Geometry and colour helpers
// ---------------------------------------------------------------------------

/// Map an arena position in percent onto `rect`.
pub fn to_screen(rect: egui::Rect, percent: Vec2) -> egui::Pos2 {
    egui::pos2(
        rect.min.x + rect.width() * percent.x / 100.0,
        rect.min.y + rect.height() * percent.y / 100.0,
    )
}

/// Trucks leave from the depot at the bottom centre of the arena.
pub fn depot(rect: egui::Rect) -> egui::Pos2 {
    egui::pos2(rect.center().x, rect.max.y)
}

pub fn gauge_color(fill: f32) -> egui::Color32 {
    if fill > 90.0 {
        theme::RED
    } else if fill > 70.0 {
        theme::EMERALD
    } else {
        theme::NEUTRAL
    }
}

pub fn shows_pulse(bin: &Bin) -> bool {
    bin.fill > PULSE_FILL && !bin.is_pending()
}

/// The bin under `pointer`, if any.
pub fn bin_at<'a>(bins: &'a [Bin], rect: egui::Rect, pointer: egui::Pos2) -> Option<&'a Bin> {
    bins.iter()
        .find(|b| to_screen(rect, Vec2::new(b.x, b.y)).distance(pointer) <= BIN_RADIUS)
}

pub fn tone_color(tone: EffectTone) -> egui::Color32 {
    match tone {
        EffectTone::Good => theme::EMERALD_LIGHT,
        EffectTone::Warning => theme::YELLOW,
        EffectTone::Bad => theme::RED,
    }
}

fn with_alpha(color: egui::Color32, alpha: f32) -> egui::Color32 {
    color.gamma_multiply(alpha.clamp(0.0, 1.0))
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

fn draw_grid(painter: &egui::Painter, rect: egui::Rect) {
    let stroke = egui::Stroke::new(1.0, egui::Color32::from_rgba_unmultiplied(16, 185, 129, 10));
    let mut x = rect.min.x;
    while x < rect.max.x {
        painter.line_segment([egui::pos2(x, rect.min.y), egui::pos2(x, rect.max.y)], stroke);
        x += GRID_SPACING;
    }
    let mut y = rect.min.y;
    while y < rect.max.y {
        painter.line_segment([egui::pos2(rect.min.x, y), egui::pos2(rect.max.x, y)], stroke);
        y += GRID_SPACING;
    }
}

fn draw_bin(painter: &egui::Painter, rect: egui::Rect, bin: &Bin, elapsed_secs: f32) {
    let center = to_screen(rect, Vec2::new(bin.x, bin.y));
    let pending = bin.is_pending();

    if shows_pulse(bin) {
        let phase = (elapsed_secs * 1.5).fract();
        painter.circle_stroke(
            center,
            BIN_RADIUS * (1.0 + phase),
            egui::Stroke::new(2.0, with_alpha(theme::EMERALD, 0.4 * (1.0 - phase))),
        );
    }

    let (fill, border) = if pending {
        (egui::Color32::from_rgb(19, 78, 74), theme::TEAL)
    } else {
        (egui::Color32::BLACK, egui::Color32::from_white_alpha(50))
    };
    painter.circle(center, BIN_RADIUS, fill, egui::Stroke::new(2.0, border));

    // Gauge
    let gauge = egui::Rect::from_center_size(center, egui::vec2(10.0, BIN_RADIUS * 1.2));
    painter.rect_filled(gauge, 2.0, egui::Color32::from_white_alpha(12));
    let level = (bin.fill / 100.0).clamp(0.0, 1.0);
    let filled = egui::Rect::from_min_max(
        egui::pos2(gauge.min.x, gauge.max.y - gauge.height() * level),
        gauge.max,
    );
    painter.rect_filled(filled, 2.0, gauge_color(bin.fill));

    // Label
    let label_pos = center + egui::vec2(0.0, BIN_RADIUS + 14.0);
    painter.text(
        label_pos,
        egui::Align2::CENTER_CENTER,
        &bin.id,
        egui::FontId::monospace(10.0),
        egui::Color32::WHITE,
    );
    let pct_color = if bin.fill > 80.0 { theme::EMERALD_LIGHT } else { theme::MUTED };
    painter.text(
        label_pos + egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_CENTER,
        format!("{}%", bin.fill.floor() as i32),
        egui::FontId::monospace(10.0),
        pct_color,
    );

    if pending {
        let blink = 0.5 + 0.5 * (elapsed_secs * 6.0).sin();
        painter.text(
            center - egui::vec2(0.0, BIN_RADIUS + 12.0),
            egui::Align2::CENTER_CENTER,
            "EN ROUTE",
            egui::FontId::monospace(10.0),
            with_alpha(theme::TEAL_LIGHT, 0.4 + 0.6 * blink),
        );
    }
}

fn draw_routes(
    painter: &egui::Painter,
    rect: egui::Rect,
    resolver: &DispatchResolver,
    now: std::time::Duration,
) {
    let start = depot(rect);
    for event in resolver.in_flight() {
        let progress = event.progress(now);
        let end = to_screen(rect, event.target);
        let color = with_alpha(theme::EMERALD, 1.0 - progress);
        painter.extend(egui::Shape::dashed_line(
            &[start, end],
            egui::Stroke::new(3.0, color),
            5.0,
            5.0,
        ));
        painter.circle_filled(start.lerp(end, progress), 5.0, theme::EMERALD_LIGHT);
    }
}

fn draw_effects(painter: &egui::Painter, rect: egui::Rect, effects: &VisualEffects) {
    for particle in &effects.particles {
        let t = particle.progress();
        painter.circle_filled(
            to_screen(rect, particle.position()),
            4.0 * (1.0 - t),
            with_alpha(tone_color(particle.tone), 1.0 - t),
        );
    }
    for text in &effects.texts {
        let t = text.progress();
        let base = match text.tone {
            EffectTone::Good => 24.0,
            EffectTone::Bad => 20.0,
            EffectTone::Warning => 18.0,
        };
        painter.text(
            to_screen(rect, text.position()),
            egui::Align2::CENTER_CENTER,
            &text.text,
            egui::FontId::monospace(base * (0.5 + t)),
            with_alpha(tone_color(text.tone), 1.0 - t),
        );
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

pub fn arena_ui(
    mut contexts: EguiContexts,
    session: Res<Session>,
    resolver: Res<DispatchResolver>,
    effects: Res<VisualEffects>,
    time: Res<Time>,
    mut queue: ResMut<ActionQueue>,
) {
    let elapsed = time.elapsed_secs();
    egui::CentralPanel::default()
        .frame(
            egui::Frame::new()
                .fill(theme::BACKGROUND)
                .inner_margin(egui::Margin::same(16)),
        )
        .show(contexts.ctx_mut(), |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::click());
            let shake = effects.shake_offset(elapsed);
            let rect = response.rect.translate(egui::vec2(shake.x, shake.y));

            painter.rect_filled(rect, 16.0, theme::ARENA);
            draw_grid(&painter, rect.shrink(1.0));
            painter.rect_stroke(
                rect,
                16.0,
                egui::Stroke::new(1.0, theme::BORDER),
                egui::StrokeKind::Outside,
            );

            draw_routes(&painter, rect, &resolver, time.elapsed());
            for bin in &session.bins {
                draw_bin(&painter, rect, bin, elapsed);
            }
            draw_effects(&painter, rect, &effects);

            if response.clicked() && session.is_playing() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if let Some(bin) = bin_at(&session.bins, rect, pos) {
                        debug!("Queueing dispatch to {}", bin.id);
                        queue.push(GameAction::dispatch(&bin.id, Vec2::new(bin.x, bin.y)));
                    }
                }
            }
        });
}

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, arena_ui.in_set(UiSet::Arena));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_rect() -> egui::Rect {
        egui::Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(800.0, 600.0))
    }

    #[test]
    fn test_to_screen_maps_percent() {
        let rect = arena_rect();
        assert_eq!(to_screen(rect, Vec2::new(0.0, 0.0)), egui::pos2(100.0, 50.0));
        assert_eq!(to_screen(rect, Vec2::new(50.0, 50.0)), egui::pos2(500.0, 350.0));
        assert_eq!(to_screen(rect, Vec2::new(100.0, 100.0)), egui::pos2(900.0, 650.0));
        assert_eq!(depot(rect), egui::pos2(500.0, 650.0));
    }

    #[test]
    fn test_gauge_color_bands() {
        assert_eq!(gauge_color(50.0), theme::NEUTRAL);
        assert_eq!(gauge_color(70.0), theme::NEUTRAL);
        assert_eq!(gauge_color(70.1), theme::EMERALD);
        assert_eq!(gauge_color(90.0), theme::EMERALD);
        assert_eq!(gauge_color(90.1), theme::RED);
    }

    #[test]
    fn test_pulse_only_for_full_unlocked_bins() {
        let mut bin = Bin::new("LY-01", 50.0, 50.0, 76.0, 1.0);
        assert!(shows_pulse(&bin));
        bin.lock();
        assert!(!shows_pulse(&bin));
        let low = Bin::new("LY-02", 50.0, 50.0, 75.0, 1.0);
        assert!(!shows_pulse(&low));
    }

    #[test]
    fn test_bin_hit_testing() {
        let rect = arena_rect();
        let bins = vec![
            Bin::new("LY-01", 25.0, 25.0, 10.0, 1.0),
            Bin::new("LY-02", 75.0, 75.0, 10.0, 1.0),
        ];
        let hit = bin_at(&bins, rect, egui::pos2(305.0, 200.0));
        assert_eq!(hit.map(|b| b.id.as_str()), Some("LY-01"));
        let hit = bin_at(&bins, rect, egui::pos2(700.0, 500.0));
        assert_eq!(hit.map(|b| b.id.as_str()), Some("LY-02"));
        assert!(bin_at(&bins, rect, egui::pos2(500.0, 350.0)).is_none());
    }
}
