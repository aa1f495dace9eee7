//! Game state and core simulation types
//!
//! `GameState` is the single owner of everything that changes during play.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::tuning::{CraftTuning, ObstacleTuning, ProjectileTuning, Tuning, TuningError, WorldConfig};
use crate::{normalize_angle, polar_to_cartesian, random_range};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Active,
    /// Out of lives, waiting for an explicit restart
    GameOver,
}

/// The player's craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Craft {
    pub pos: Vec2,
    /// Persists across ticks, decays by friction while not thrusting
    pub vel: Vec2,
    /// Heading in radians
    pub heading: f32,
    /// Set from rotate intents every tick, never integrated
    pub angular_vel: f32,
    pub radius: f32,
    /// Thrust intent applied on the latest update
    pub thrusting: bool,
    /// Ticks until the next shot is allowed (may go negative)
    pub fire_cooldown: i32,
    /// Ticks of post-collision immunity remaining
    pub invulnerability: u32,
}

impl Craft {
    /// Fresh craft at the world center, at rest, facing the start heading
    pub fn new(world: &WorldConfig, tuning: &CraftTuning) -> Self {
        Self {
            pos: world.center(),
            vel: Vec2::ZERO,
            heading: tuning.start_heading,
            angular_vel: 0.0,
            radius: tuning.radius,
            thrusting: false,
            fire_cooldown: 0,
            invulnerability: 0,
        }
    }

    /// Latch this tick's steering intents
    ///
    /// Right overrides left when both are held.
    pub fn steer(&mut self, rotate_left: bool, rotate_right: bool, thrust: bool, tuning: &CraftTuning) {
        self.angular_vel = 0.0;
        if rotate_left {
            self.angular_vel = -tuning.turn_rate;
        }
        if rotate_right {
            self.angular_vel = tuning.turn_rate;
        }
        self.thrusting = thrust;
    }

    /// Advance one tick: turn, thrust or coast, move, wrap, tick down immunity
    pub fn update(&mut self, tuning: &CraftTuning, world: &WorldConfig) {
        self.heading = normalize_angle(self.heading + self.angular_vel);

        if self.thrusting {
            self.vel += polar_to_cartesian(tuning.thrust, self.heading);
        } else {
            self.vel *= tuning.friction;
        }

        self.pos = world.wrap(self.pos + self.vel);
        self.invulnerability = self.invulnerability.saturating_sub(1);
    }

    #[inline]
    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerability > 0
    }

    /// Blink cue: drawn for the first half of each blink period
    ///
    /// A zero period means no blinking.
    pub fn is_visible(&self, tuning: &CraftTuning) -> bool {
        self.invulnerability
            .checked_rem(tuning.blink_period_ticks)
            .is_none_or(|phase| phase < tuning.blink_period_ticks / 2)
    }

    /// Respawn after a hit: back to center at rest, heading kept
    pub fn recenter(&mut self, world: &WorldConfig, invulnerability_ticks: u32) {
        self.pos = world.center();
        self.vel = Vec2::ZERO;
        self.invulnerability = invulnerability_ticks;
    }
}

/// A projectile fired by the craft
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks before expiry
    pub lifetime: u32,
    pub radius: f32,
}

impl Projectile {
    /// Launch from the craft's nose along its current heading
    pub fn fire_from(craft: &Craft, craft_tuning: &CraftTuning, tuning: &ProjectileTuning) -> Self {
        Self {
            pos: craft.pos + polar_to_cartesian(craft_tuning.nose_offset, craft.heading),
            vel: polar_to_cartesian(tuning.speed, craft.heading),
            lifetime: tuning.lifetime_ticks,
            radius: tuning.radius,
        }
    }

    pub fn update(&mut self, world: &WorldConfig) {
        self.pos = world.wrap(self.pos + self.vel);
        self.lifetime = self.lifetime.saturating_sub(1);
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.lifetime == 0
    }
}

/// A drifting rock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Fixed at creation
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic rotation, does not affect collision
    pub rotation: f32,
    pub spin: f32,
    /// Radial distance of each outline vertex, evenly spaced around the circle
    pub vertex_radii: Vec<f32>,
}

impl Obstacle {
    /// Random heading and speed, jagged outline generated once
    pub fn new<R: Rng + ?Sized>(pos: Vec2, radius: f32, tuning: &ObstacleTuning, rng: &mut R) -> Self {
        let speed = random_range(rng, tuning.speed_min, tuning.speed_max);
        let direction = random_range(rng, 0.0, std::f32::consts::TAU);

        let count = vertex_count(radius);
        let vertex_radii = (0..count)
            .map(|_| radius * (1.0 + random_range(rng, -tuning.jaggedness, tuning.jaggedness)))
            .collect();

        Self {
            pos,
            vel: polar_to_cartesian(speed, direction),
            radius,
            rotation: 0.0,
            spin: random_range(rng, -tuning.spin_max, tuning.spin_max),
            vertex_radii,
        }
    }

    pub fn update(&mut self, world: &WorldConfig) {
        self.pos = world.wrap(self.pos + self.vel);
        self.rotation += self.spin;
    }
}

/// Outline vertex count for a given radius: `floor(radius / 2) + 6`
#[inline]
pub fn vertex_count(radius: f32) -> usize {
    (radius / 2.0).floor().max(0.0) as usize + 6
}

/// Complete game state for one simulation
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Balance in effect for this simulation
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current level (1-based)
    pub level: u32,
    /// Simulation tick counter (active ticks only)
    pub time_ticks: u64,
    pub craft: Craft,
    pub projectiles: Vec<Projectile>,
    pub obstacles: Vec<Obstacle>,
    /// Games started since construction, folded into the reseed on restart
    restarts: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with default balance
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game with the given balance
    ///
    /// The tuning is validated first; a rejected field is returned as
    /// [`TuningError::Invalid`].
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let craft = Craft::new(&tuning.world, &tuning.craft);
        let mut state = Self {
            seed,
            phase: GamePhase::Active,
            score: 0,
            lives: tuning.rules.starting_lives,
            level: 1,
            time_ticks: 0,
            craft,
            projectiles: Vec::new(),
            obstacles: Vec::new(),
            restarts: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        };
        state.populate_level();
        log::info!("New game (seed {seed}): {} obstacles", state.obstacles.len());
        state
    }

    /// Start over after game over
    ///
    /// Ignored while a game is still active; returns whether a new game began.
    pub fn restart(&mut self) -> bool {
        if self.phase != GamePhase::GameOver {
            log::debug!("Restart ignored: game still active");
            return false;
        }

        self.restarts += 1;
        self.rng = Pcg32::seed_from_u64(self.seed.wrapping_add(self.restarts));
        self.phase = GamePhase::Active;
        self.score = 0;
        self.lives = self.tuning.rules.starting_lives;
        self.level = 1;
        self.time_ticks = 0;
        self.craft = Craft::new(&self.tuning.world, &self.tuning.craft);
        self.projectiles.clear();
        self.populate_level();

        log::info!(
            "Game restarted (run {}): {} obstacles",
            self.restarts,
            self.obstacles.len()
        );
        true
    }

    /// Move to the next level and repopulate
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.populate_level();
        log::info!("Level {}: {} obstacles", self.level, self.obstacles.len());
    }

    /// Replace the obstacle field with the spawn policy's population for the current level
    pub fn populate_level(&mut self) {
        self.obstacles = spawn::populate(
            self.level,
            self.craft.pos,
            &self.tuning.world,
            &self.tuning.spawn,
            &self.tuning.obstacle,
            &mut self.rng,
        );
    }

    /// Obstacle balance and the simulation RNG, borrowed together for fragmentation
    pub(crate) fn obstacle_rng(&mut self) -> (&ObstacleTuning, &mut Pcg32) {
        (&self.tuning.obstacle, &mut self.rng)
    }
}
