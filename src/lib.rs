//! Drift Rocks - a wrapping-plane rock shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, collisions, game state)
//! - `tuning`: Data-driven game balance
//! - `renderer`: Presentation adapters driven by simulation snapshots
//! - `platform`: Host input adapter (raw key events to tick intents)

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
///
/// These are the defaults behind [`Tuning::default`]. Units are world units
/// and ticks; one tick is one display refresh.
pub mod consts {
    /// Play area dimensions
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Craft defaults
    pub const CRAFT_RADIUS: f32 = 12.0;
    /// Angular velocity while a rotate intent is held (radians/tick)
    pub const CRAFT_TURN_RATE: f32 = 0.07;
    /// Acceleration along the heading while thrusting (units/tick²)
    pub const CRAFT_THRUST: f32 = 0.08;
    /// Multiplicative velocity decay per tick when not thrusting
    pub const CRAFT_FRICTION: f32 = 0.99;
    /// Starting heading: facing up (screen y grows downward)
    pub const CRAFT_START_HEADING: f32 = -std::f32::consts::FRAC_PI_2;
    /// Distance from craft center to its nose, where projectiles appear
    pub const CRAFT_NOSE_OFFSET: f32 = 14.0;
    /// Ticks between shots
    pub const FIRE_COOLDOWN_TICKS: i32 = 10;
    /// Post-collision immunity window
    pub const INVULNERABILITY_TICKS: u32 = 90;
    /// Blink cycle length while invulnerable (visible for the first half)
    pub const BLINK_PERIOD_TICKS: u32 = 6;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 6.0;
    pub const PROJECTILE_LIFETIME_TICKS: u32 = 60;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_SPEED_MIN: f32 = 0.5;
    pub const OBSTACLE_SPEED_MAX: f32 = 2.2;
    /// Cosmetic spin bound (radians/tick, symmetric)
    pub const OBSTACLE_SPIN_MAX: f32 = 0.02;
    /// Per-vertex radial jitter bound (fraction of nominal radius)
    pub const OBSTACLE_JAGGEDNESS: f32 = 0.4;
    /// Obstacles above this radius split when shot
    pub const SPLIT_THRESHOLD: f32 = 20.0;
    /// Child radius as a fraction of the parent's
    pub const SPLIT_FACTOR: f32 = 0.6;

    /// Spawn policy defaults
    pub const SPAWN_BASE_COUNT: u32 = 4;
    pub const SPAWN_CAP: u32 = 10;
    pub const SPAWN_RADIUS_MIN: f32 = 30.0;
    pub const SPAWN_RADIUS_MAX: f32 = 60.0;
    /// Minimum distance between a fresh obstacle and the craft
    pub const SPAWN_EXCLUSION_RADIUS: f32 = 120.0;
    /// Rerolls per obstacle before placement falls back to unconstrained
    pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

    /// Scoring and lives
    pub const SCORE_PER_HIT: u64 = 10;
    pub const STARTING_LIVES: u32 = 3;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Wrap a position onto the torus `[0, width] × [0, height]`
///
/// A coordinate past either edge moves by exactly one extent, so positions
/// already in range are left untouched.
#[inline]
pub fn wrap(mut pos: Vec2, width: f32, height: f32) -> Vec2 {
    if pos.x < 0.0 {
        pos.x += width;
    } else if pos.x > width {
        pos.x -= width;
    }
    if pos.y < 0.0 {
        pos.y += height;
    } else if pos.y > height {
        pos.y -= height;
    }
    pos
}

/// Straight-line distance between two points
#[inline]
pub fn distance(p: Vec2, q: Vec2) -> f32 {
    p.distance(q)
}

/// Uniform sample in `[min, max)`; an empty range yields `min`
#[inline]
pub fn random_range<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}
