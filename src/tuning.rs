//! Data-driven game balance
//!
//! Every gameplay constant lives here so a host can load an alternate balance
//! from JSON. Missing fields fall back to [`crate::consts`].

use std::fmt;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Toroidal play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: WORLD_WIDTH,
            height: WORLD_HEIGHT,
        }
    }
}

impl WorldConfig {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Center of the play area (craft spawn and respawn point)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }

    /// Wrap a position onto this world's torus
    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        crate::wrap(pos, self.width, self.height)
    }

    /// Shortest displacement from `from` to `to` across the wrapped edges
    pub fn wrapped_delta(&self, from: Vec2, to: Vec2) -> Vec2 {
        let mut d = to - from;
        if d.x > self.width / 2.0 {
            d.x -= self.width;
        } else if d.x < -self.width / 2.0 {
            d.x += self.width;
        }
        if d.y > self.height / 2.0 {
            d.y -= self.height;
        } else if d.y < -self.height / 2.0 {
            d.y += self.height;
        }
        d
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraftTuning {
    pub radius: f32,
    pub turn_rate: f32,
    pub thrust: f32,
    pub friction: f32,
    pub start_heading: f32,
    pub nose_offset: f32,
    pub fire_cooldown_ticks: i32,
    pub invulnerability_ticks: u32,
    pub blink_period_ticks: u32,
}

impl Default for CraftTuning {
    fn default() -> Self {
        Self {
            radius: CRAFT_RADIUS,
            turn_rate: CRAFT_TURN_RATE,
            thrust: CRAFT_THRUST,
            friction: CRAFT_FRICTION,
            start_heading: CRAFT_START_HEADING,
            nose_offset: CRAFT_NOSE_OFFSET,
            fire_cooldown_ticks: FIRE_COOLDOWN_TICKS,
            invulnerability_ticks: INVULNERABILITY_TICKS,
            blink_period_ticks: BLINK_PERIOD_TICKS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub lifetime_ticks: u32,
    pub radius: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            lifetime_ticks: PROJECTILE_LIFETIME_TICKS,
            radius: PROJECTILE_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    pub speed_min: f32,
    pub speed_max: f32,
    pub spin_max: f32,
    pub jaggedness: f32,
    pub split_threshold: f32,
    pub split_factor: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            speed_min: OBSTACLE_SPEED_MIN,
            speed_max: OBSTACLE_SPEED_MAX,
            spin_max: OBSTACLE_SPIN_MAX,
            jaggedness: OBSTACLE_JAGGEDNESS,
            split_threshold: SPLIT_THRESHOLD,
            split_factor: SPLIT_FACTOR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTuning {
    pub base_count: u32,
    pub cap: u32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub exclusion_radius: f32,
    pub max_attempts: u32,
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self {
            base_count: SPAWN_BASE_COUNT,
            cap: SPAWN_CAP,
            radius_min: SPAWN_RADIUS_MIN,
            radius_max: SPAWN_RADIUS_MAX,
            exclusion_radius: SPAWN_EXCLUSION_RADIUS,
            max_attempts: MAX_SPAWN_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTuning {
    pub score_per_hit: u64,
    pub starting_lives: u32,
}

impl Default for RulesTuning {
    fn default() -> Self {
        Self {
            score_per_hit: SCORE_PER_HIT,
            starting_lives: STARTING_LIVES,
        }
    }
}

/// Complete balance sheet for one simulation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub world: WorldConfig,
    pub craft: CraftTuning,
    pub projectile: ProjectileTuning,
    pub obstacle: ObstacleTuning,
    pub spawn: SpawnTuning,
    pub rules: RulesTuning,
}

/// Why a tuning file was rejected
#[derive(Debug)]
pub enum TuningError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read tuning file: {err}"),
            Self::Parse(err) => write!(f, "malformed tuning JSON: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for TuningError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

fn require(ok: bool, field: &'static str, reason: &'static str) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid { field, reason })
    }
}

impl Tuning {
    /// Parse and validate a JSON balance sheet
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON balance sheet from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would break simulation invariants
    ///
    /// An exclusion radius that cannot be satisfied anywhere in the world is
    /// allowed; spawning falls back to unconstrained placement and warns.
    pub fn validate(&self) -> Result<(), TuningError> {
        let w = &self.world;
        require(w.width > 0.0 && w.width.is_finite(), "world.width", "must be positive")?;
        require(w.height > 0.0 && w.height.is_finite(), "world.height", "must be positive")?;

        let c = &self.craft;
        require(c.radius > 0.0, "craft.radius", "must be positive")?;
        require(
            (0.0..=1.0).contains(&c.friction),
            "craft.friction",
            "must be within [0, 1]",
        )?;
        require(c.fire_cooldown_ticks >= 0, "craft.fire_cooldown_ticks", "must not be negative")?;
        require(c.blink_period_ticks >= 2, "craft.blink_period_ticks", "must be at least 2")?;

        let p = &self.projectile;
        require(p.radius > 0.0, "projectile.radius", "must be positive")?;
        require(p.lifetime_ticks > 0, "projectile.lifetime_ticks", "must be positive")?;

        let o = &self.obstacle;
        require(o.speed_min >= 0.0, "obstacle.speed_min", "must not be negative")?;
        require(o.speed_max >= o.speed_min, "obstacle.speed_max", "must be >= speed_min")?;
        require(
            (0.0..1.0).contains(&o.jaggedness),
            "obstacle.jaggedness",
            "must be within [0, 1)",
        )?;
        require(
            o.split_factor > 0.0 && o.split_factor < 1.0,
            "obstacle.split_factor",
            "must be within (0, 1)",
        )?;
        require(o.split_threshold > 0.0, "obstacle.split_threshold", "must be positive")?;

        let s = &self.spawn;
        require(s.cap > 0, "spawn.cap", "must be positive")?;
        require(s.radius_min > 0.0, "spawn.radius_min", "must be positive")?;
        require(s.radius_max >= s.radius_min, "spawn.radius_max", "must be >= radius_min")?;
        require(s.max_attempts > 0, "spawn.max_attempts", "must be positive")?;

        require(self.rules.starting_lives > 0, "rules.starting_lives", "must be positive")?;

        if s.exclusion_radius >= w.diagonal() {
            log::warn!(
                "spawn.exclusion_radius {} >= world diagonal {}; obstacles will spawn unconstrained",
                s.exclusion_radius,
                w.diagonal()
            );
        }

        Ok(())
    }
}
