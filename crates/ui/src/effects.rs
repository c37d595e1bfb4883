//! Cosmetic feedback: floating outcome captions, particle bursts and screen
//! shake.
//!
//! Everything here is driven by simulation events and has no effect on the
//! session. Positions are stored in arena percent so the arena painter can
//! map them onto whatever rect it was given this frame.

use bevy::prelude::*;
use rand::Rng;

use simulation::dispatch::CollectionOutcome;
use simulation::events::{BinOverflowed, CollectionResolved};

use crate::UiSet;

pub const FLOATING_TEXT_SECS: f32 = 0.8;
pub const PARTICLE_SECS: f32 = 0.6;
pub const SHAKE_SECS: f32 = 0.3;
pub const PARTICLES_PER_BURST: usize = 10;

/// How far a caption drifts upward over its lifetime, in arena percent.
const TEXT_RISE: f32 = 8.0;
/// Particle travel distance range, in arena percent.
const PARTICLE_REACH: std::ops::Range<f32> = 6.0..18.0;
/// Peak shake displacement in points.
const SHAKE_AMPLITUDE: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectTone {
    Good,
    Warning,
    Bad,
}

impl From<CollectionOutcome> for EffectTone {
    fn from(outcome: CollectionOutcome) -> Self {
        match outcome {
            CollectionOutcome::Optimal => EffectTone::Good,
            CollectionOutcome::CutItClose => EffectTone::Warning,
            CollectionOutcome::Premature => EffectTone::Bad,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloatingText {
    pub text: String,
    pub tone: EffectTone,
    pub origin: Vec2,
    pub age: f32,
}

impl FloatingText {
    /// `0.0` at spawn, `1.0` when expired.
    pub fn progress(&self) -> f32 {
        (self.age / FLOATING_TEXT_SECS).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec2 {
        self.origin - Vec2::new(0.0, TEXT_RISE * ease_out(self.progress()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub origin: Vec2,
    /// Full travel over the particle's lifetime.
    pub offset: Vec2,
    pub tone: EffectTone,
    pub age: f32,
}

impl Particle {
    pub fn progress(&self) -> f32 {
        (self.age / PARTICLE_SECS).clamp(0.0, 1.0)
    }

    pub fn position(&self) -> Vec2 {
        self.origin + self.offset * ease_out(self.progress())
    }
}

fn ease_out(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Live cosmetic effects.
#[derive(Resource, Debug, Default)]
pub struct VisualEffects {
    pub texts: Vec<FloatingText>,
    pub particles: Vec<Particle>,
    /// Remaining shake time in seconds.
    pub shake: f32,
}

impl VisualEffects {
    pub fn spawn_caption(&mut self, text: String, tone: EffectTone, origin: Vec2) {
        self.texts.push(FloatingText {
            text,
            tone,
            origin,
            age: 0.0,
        });
    }

    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, origin: Vec2, tone: EffectTone, rng: &mut R) {
        for _ in 0..PARTICLES_PER_BURST {
            let angle = rng.gen_range(0.0..std::f32::consts::TAU);
            let reach = rng.gen_range(PARTICLE_REACH);
            self.particles.push(Particle {
                origin,
                offset: Vec2::from_angle(angle) * reach,
                tone,
                age: 0.0,
            });
        }
    }

    pub fn start_shake(&mut self) {
        self.shake = SHAKE_SECS;
    }

    /// Age everything by `dt` seconds and drop what has expired.
    pub fn advance(&mut self, dt: f32) {
        for text in &mut self.texts {
            text.age += dt;
        }
        for particle in &mut self.particles {
            particle.age += dt;
        }
        self.texts.retain(|t| t.age < FLOATING_TEXT_SECS);
        self.particles.retain(|p| p.age < PARTICLE_SECS);
        self.shake = (self.shake - dt).max(0.0);
    }

    /// Screen offset for the arena this frame. Decays to zero with the
    /// remaining shake time.
    pub fn shake_offset(&self, elapsed_secs: f32) -> Vec2 {
        if self.shake <= 0.0 {
            return Vec2::ZERO;
        }
        let strength = SHAKE_AMPLITUDE * (self.shake / SHAKE_SECS);
        Vec2::new(
            (elapsed_secs * 90.0).sin() * strength,
            (elapsed_secs * 70.0).cos() * strength * 0.5,
        )
    }

    pub fn is_idle(&self) -> bool {
        self.texts.is_empty() && self.particles.is_empty() && self.shake <= 0.0
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

fn spawn_effects(
    mut effects: ResMut<VisualEffects>,
    mut resolved: EventReader<CollectionResolved>,
    mut overflowed: EventReader<BinOverflowed>,
) {
    let mut rng = rand::thread_rng();
    for CollectionResolved(report) in resolved.read() {
        let tone = EffectTone::from(report.outcome);
        effects.spawn_caption(report.outcome.caption(report.reward), tone, report.target);
        effects.spawn_burst(report.target, tone, &mut rng);
    }
    if overflowed.read().count() > 0 {
        effects.start_shake();
    }
}

fn age_effects(time: Res<Time>, mut effects: ResMut<VisualEffects>) {
    if effects.is_idle() {
        return;
    }
    effects.advance(time.delta_secs());
}

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<VisualEffects>().add_systems(
            Update,
            (age_effects, spawn_effects).chain().in_set(UiSet::Effects),
        );
    }
}
