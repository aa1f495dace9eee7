//! Proximity tests and the fragmentation rule
//!
//! All shapes collide as circles. The outline jitter is cosmetic.

use rand::Rng;

use super::state::{Craft, Obstacle, Projectile};
use crate::distance;
use crate::tuning::ObstacleTuning;

/// A projectile hits an obstacle when its center is inside the obstacle's radius
///
/// The projectile's own radius is not added.
#[inline]
pub fn projectile_hits_obstacle(projectile: &Projectile, obstacle: &Obstacle) -> bool {
    distance(projectile.pos, obstacle.pos) < obstacle.radius
}

/// The craft touches an obstacle when their circles overlap
///
/// Purely geometric; the caller decides whether invulnerability applies.
#[inline]
pub fn craft_hits_obstacle(craft: &Craft, obstacle: &Obstacle) -> bool {
    distance(craft.pos, obstacle.pos) < obstacle.radius + craft.radius
}

/// Split a destroyed obstacle
///
/// Above the split threshold the parent becomes two children at its position,
/// each `split_factor` times its radius with fresh heading, speed and outline.
/// At or below the threshold nothing is left behind.
pub fn fragment<R: Rng + ?Sized>(
    parent: &Obstacle,
    tuning: &ObstacleTuning,
    rng: &mut R,
) -> Option<[Obstacle; 2]> {
    if parent.radius <= tuning.split_threshold {
        return None;
    }

    let radius = parent.radius * tuning.split_factor;
    Some([
        Obstacle::new(parent.pos, radius, tuning, rng),
        Obstacle::new(parent.pos, radius, tuning, rng),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{CraftTuning, WorldConfig};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rock(pos: Vec2, radius: f32) -> Obstacle {
        let mut rng = Pcg32::seed_from_u64(1);
        Obstacle::new(pos, radius, &ObstacleTuning::default(), &mut rng)
    }

    fn shot_at(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            vel: Vec2::ZERO,
            lifetime: 10,
            radius: 2.0,
        }
    }

    #[test]
    fn test_projectile_hit_ignores_projectile_radius() {
        let target = rock(Vec2::new(100.0, 100.0), 20.0);
        assert!(projectile_hits_obstacle(&shot_at(Vec2::new(119.0, 100.0)), &target));
        // Would overlap if the projectile radius counted
        assert!(!projectile_hits_obstacle(&shot_at(Vec2::new(121.0, 100.0)), &target));
        assert!(!projectile_hits_obstacle(&shot_at(Vec2::new(120.0, 100.0)), &target));
    }

    #[test]
    fn test_craft_collision_bound() {
        let mut craft = Craft::new(&WorldConfig::default(), &CraftTuning::default());
        craft.pos = Vec2::new(200.0, 200.0);
        let r = 30.0;
        let reach = r + craft.radius;

        let near = rock(Vec2::new(200.0 + reach - 0.5, 200.0), r);
        let touching = rock(Vec2::new(200.0 + reach, 200.0), r);
        let far = rock(Vec2::new(200.0, 200.0 + reach + 1.0), r);

        assert!(craft_hits_obstacle(&craft, &near));
        assert!(!craft_hits_obstacle(&craft, &touching));
        assert!(!craft_hits_obstacle(&craft, &far));
    }

    #[test]
    fn test_fragment_large_obstacle() {
        let mut rng = Pcg32::seed_from_u64(9);
        let parent = rock(Vec2::new(50.0, 60.0), 25.0);
        let children = fragment(&parent, &ObstacleTuning::default(), &mut rng).expect("splits");

        for child in &children {
            assert!((child.radius - 15.0).abs() < 1e-4);
            assert_eq!(child.pos, parent.pos);
            assert_eq!(child.vertex_radii.len(), 13);
        }
    }

    #[test]
    fn test_fragment_small_obstacle() {
        let mut rng = Pcg32::seed_from_u64(9);
        let parent = rock(Vec2::new(50.0, 60.0), 18.0);
        assert!(fragment(&parent, &ObstacleTuning::default(), &mut rng).is_none());
    }

    #[test]
    fn test_fragment_at_threshold_leaves_nothing() {
        let mut rng = Pcg32::seed_from_u64(9);
        let parent = rock(Vec2::ZERO, 20.0);
        assert!(fragment(&parent, &ObstacleTuning::default(), &mut rng).is_none());
    }

    #[test]
    fn test_fragments_shrink_until_gone() {
        let mut rng = Pcg32::seed_from_u64(4);
        let tuning = ObstacleTuning::default();
        let mut generation = vec![rock(Vec2::new(300.0, 300.0), 60.0)];
        let mut rounds = 0;

        while !generation.is_empty() {
            let next: Vec<Obstacle> = generation
                .iter()
                .filter_map(|o| fragment(o, &tuning, &mut rng))
                .flatten()
                .collect();
            for (child, parent) in next.iter().zip(generation.iter().flat_map(|p| [p, p])) {
                assert!(child.radius > 0.0 && child.radius < parent.radius);
            }
            generation = next;
            rounds += 1;
        }

        // 60 -> 36 -> 21.6 -> 12.96 -> gone
        assert_eq!(rounds, 4);
    }
}
