//! Level population
//!
//! Obstacles enter along the world's edges and never start on top of the craft.

use glam::Vec2;
use rand::Rng;

use super::state::Obstacle;
use crate::tuning::{ObstacleTuning, SpawnTuning, WorldConfig};
use crate::{distance, random_range};

/// Number of obstacles for a level: `min(base + level, cap)`
#[inline]
pub fn obstacle_count(level: u32, tuning: &SpawnTuning) -> usize {
    tuning.base_count.saturating_add(level).min(tuning.cap) as usize
}

/// Pick a point on the world's border
///
/// One axis is sampled uniformly, the other is pinned to its near or far edge.
pub fn edge_position<R: Rng + ?Sized>(world: &WorldConfig, rng: &mut R) -> Vec2 {
    let far_edge = rng.random_bool(0.5);
    if rng.random_bool(0.5) {
        let y = if far_edge { world.height } else { 0.0 };
        Vec2::new(random_range(rng, 0.0, world.width), y)
    } else {
        let x = if far_edge { world.width } else { 0.0 };
        Vec2::new(x, random_range(rng, 0.0, world.height))
    }
}

/// Generate the obstacle field for `level`
///
/// Candidates closer than the exclusion radius to `craft_pos` are rerolled.
/// After `max_attempts` rejections the last candidate is kept and a warning is
/// logged, so impossible configurations degrade instead of hanging.
pub fn populate<R: Rng + ?Sized>(
    level: u32,
    craft_pos: Vec2,
    world: &WorldConfig,
    spawn: &SpawnTuning,
    obstacle: &ObstacleTuning,
    rng: &mut R,
) -> Vec<Obstacle> {
    let count = obstacle_count(level, spawn);
    let mut obstacles = Vec::with_capacity(count);

    for _ in 0..count {
        let mut attempts = 0;
        let rock = loop {
            attempts += 1;
            let pos = edge_position(world, rng);
            let radius = random_range(rng, spawn.radius_min, spawn.radius_max);
            let candidate = Obstacle::new(pos, radius, obstacle, rng);

            if distance(candidate.pos, craft_pos) >= spawn.exclusion_radius {
                break candidate;
            }
            if attempts >= spawn.max_attempts {
                log::warn!(
                    "No spawn point {} units from the craft after {} attempts; placing anyway",
                    spawn.exclusion_radius,
                    attempts
                );
                break candidate;
            }
        };
        obstacles.push(rock);
    }

    obstacles
}
