//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{craft_hits_obstacle, fragment, projectile_hits_obstacle};
use super::state::{GamePhase, GameState, Projectile};
use crate::normalize_angle;

/// Input intents for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Idle/demo mode - autopilot flies the craft
    pub idle_mode: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let input = if input.idle_mode { autopilot(state) } else { *input };

    state.time_ticks += 1;

    // Steering and fire control
    let craft_tuning = &state.tuning.craft;
    state
        .craft
        .steer(input.rotate_left, input.rotate_right, input.thrust, craft_tuning);
    if input.fire && state.craft.can_fire() {
        let shot = Projectile::fire_from(&state.craft, craft_tuning, &state.tuning.projectile);
        state.projectiles.push(shot);
        state.craft.fire_cooldown = craft_tuning.fire_cooldown_ticks;
    }
    state.craft.fire_cooldown -= 1;

    // Motion
    let world = state.tuning.world;
    state.craft.update(&state.tuning.craft, &world);
    for projectile in &mut state.projectiles {
        projectile.update(&world);
    }
    state.projectiles.retain(|p| !p.is_expired());
    for obstacle in &mut state.obstacles {
        obstacle.update(&world);
    }

    resolve_projectile_hits(state);
    resolve_craft_hit(state);

    if state.obstacles.is_empty() {
        state.advance_level();
    }
}

/// Projectiles against obstacles
///
/// Both collections are walked back to front so removals never shift an
/// unvisited element. Each obstacle takes at most one projectile, and a
/// projectile is gone as soon as it scores.
fn resolve_projectile_hits(state: &mut GameState) {
    for i in (0..state.obstacles.len()).rev() {
        let Some(j) = (0..state.projectiles.len())
            .rev()
            .find(|&j| projectile_hits_obstacle(&state.projectiles[j], &state.obstacles[i]))
        else {
            continue;
        };

        state.projectiles.remove(j);
        let parent = state.obstacles.remove(i);
        let (obstacle_tuning, rng) = state.obstacle_rng();
        if let Some(children) = fragment(&parent, obstacle_tuning, rng) {
            state.obstacles.extend(children);
        }
        state.score += state.tuning.rules.score_per_hit;

        log::debug!(
            "Hit obstacle r={:.1} at ({:.0}, {:.0}); score {}",
            parent.radius,
            parent.pos.x,
            parent.pos.y,
            state.score
        );
    }
}

/// Craft against obstacles: at most one life lost per tick
fn resolve_craft_hit(state: &mut GameState) {
    if state.craft.is_invulnerable() {
        return;
    }

    let hit = state
        .obstacles
        .iter()
        .any(|obstacle| craft_hits_obstacle(&state.craft, obstacle));
    if !hit {
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    let world = state.tuning.world;
    state
        .craft
        .recenter(&world, state.tuning.craft.invulnerability_ticks);
    log::debug!("Craft hit; {} lives left", state.lives);

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over: score {}, level {}", state.score, state.level);
    }
}

/// Demo pilot: face the nearest obstacle, close in, and shoot when lined up
fn autopilot(state: &GameState) -> TickInput {
    let world = &state.tuning.world;
    let craft = &state.craft;

    let target = state
        .obstacles
        .iter()
        .map(|o| world.wrapped_delta(craft.pos, o.pos))
        .min_by(|a, b| {
            a.length_squared()
                .partial_cmp(&b.length_squared())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(delta) = target else {
        return TickInput::default();
    };

    let bearing = normalize_angle(delta.y.atan2(delta.x) - craft.heading);
    let turn_tolerance = state.tuning.craft.turn_rate;

    TickInput {
        rotate_left: bearing < -turn_tolerance,
        rotate_right: bearing > turn_tolerance,
        thrust: bearing.abs() < 0.5 && delta.length() > 250.0,
        fire: bearing.abs() < 0.2,
        idle_mode: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::spawn::obstacle_count;
    use crate::sim::state::Obstacle;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// A motionless obstacle of the given size
    fn parked(pos: Vec2, radius: f32) -> Obstacle {
        let mut rng = Pcg32::seed_from_u64(0);
        let mut rock = Obstacle::new(pos, radius, &Default::default(), &mut rng);
        rock.vel = Vec2::ZERO;
        rock.spin = 0.0;
        rock
    }

    /// Game with a single parked obstacle tucked in a corner, away from the craft's line of fire
    fn quiet_state() -> GameState {
        let mut state = GameState::new(1234);
        state.obstacles = vec![parked(Vec2::new(60.0, 60.0), 10.0)];
        state
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_cooldown_gating() {
        let mut state = quiet_state();
        for _ in 0..FIRE_COOLDOWN_TICKS {
            tick(&mut state, &fire());
        }
        assert_eq!(state.projectiles.len(), 1);

        tick(&mut state, &fire());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_cooldown_runs_down_without_fire() {
        let mut state = quiet_state();
        tick(&mut state, &fire());
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.craft.fire_cooldown < 0);
        tick(&mut state, &fire());
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_projectiles_expire() {
        let mut state = quiet_state();
        tick(&mut state, &fire());
        for _ in 0..PROJECTILE_LIFETIME_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_projectile_destroys_and_splits() {
        let mut state = quiet_state();
        let target = Vec2::new(700.0, 100.0);
        state.obstacles.push(parked(target, 25.0));
        state.projectiles.push(Projectile {
            pos: target,
            vel: Vec2::ZERO,
            lifetime: 5,
            radius: PROJECTILE_RADIUS,
        });

        tick(&mut state, &TickInput::default());

        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, SCORE_PER_HIT);
        // Corner rock plus two fragments
        assert_eq!(state.obstacles.len(), 3);
        let fragments: Vec<_> = state.obstacles.iter().filter(|o| (o.radius - 15.0).abs() < 1e-4).collect();
        assert_eq!(fragments.len(), 2);
        for f in fragments {
            // Fragments were born at the parent's position and then left alone this tick
            assert_eq!(f.pos, target);
        }
    }

    #[test]
    fn test_one_projectile_cannot_destroy_two_obstacles() {
        let mut state = quiet_state();
        let spot = Vec2::new(700.0, 500.0);
        state.obstacles.push(parked(spot, 15.0));
        state.obstacles.push(parked(spot, 15.0));
        state.projectiles.push(Projectile {
            pos: spot,
            vel: Vec2::ZERO,
            lifetime: 5,
            radius: PROJECTILE_RADIUS,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, SCORE_PER_HIT);
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_obstacle_takes_only_one_projectile() {
        let mut state = quiet_state();
        let spot = Vec2::new(700.0, 500.0);
        state.obstacles.push(parked(spot, 15.0));
        for _ in 0..2 {
            state.projectiles.push(Projectile {
                pos: spot,
                vel: Vec2::ZERO,
                lifetime: 5,
                radius: PROJECTILE_RADIUS,
            });
        }

        tick(&mut state, &TickInput::default());

        assert_eq!(state.score, SCORE_PER_HIT);
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn test_life_loss_resets_craft() {
        let mut state = quiet_state();
        let center = state.tuning.world.center();
        state.craft.vel = Vec2::new(3.0, 1.0);
        state.craft.heading = 1.0;
        state.obstacles.push(parked(center, 30.0));

        tick(&mut state, &TickInput::default());

        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.craft.pos, center);
        assert_eq!(state.craft.vel, Vec2::ZERO);
        assert_eq!(state.craft.heading, 1.0);
        assert_eq!(state.craft.invulnerability, INVULNERABILITY_TICKS);
        assert_eq!(state.phase, GamePhase::Active);
    }

    #[test]
    fn test_invulnerable_craft_ignores_collisions() {
        let mut state = quiet_state();
        let center = state.tuning.world.center();
        state.obstacles.push(parked(center, 30.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, STARTING_LIVES - 1);

        // Still overlapping, but immune for the whole window
        for _ in 0..INVULNERABILITY_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.lives, STARTING_LIVES - 1);

        // Window over: the overlap registers again
        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, STARTING_LIVES - 2);
    }

    #[test]
    fn test_at_most_one_life_per_tick() {
        let mut state = quiet_state();
        let center = state.tuning.world.center();
        state.obstacles.push(parked(center, 30.0));
        state.obstacles.push(parked(center + Vec2::new(5.0, 0.0), 30.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_level_clear() {
        let mut state = quiet_state();
        let spot = state.obstacles[0].pos;
        state.projectiles.push(Projectile {
            pos: spot,
            vel: Vec2::ZERO,
            lifetime: 5,
            radius: PROJECTILE_RADIUS,
        });

        tick(&mut state, &TickInput::default());

        assert_eq!(state.level, 2);
        assert_eq!(state.score, SCORE_PER_HIT);
        assert_eq!(state.obstacles.len(), obstacle_count(2, &state.tuning.spawn));
        assert_eq!(state.obstacles.len(), 6);
        for rock in &state.obstacles {
            assert!(rock.pos.distance(state.craft.pos) >= SPAWN_EXCLUSION_RADIUS);
        }
    }

    #[test]
    fn test_terminal_transition_and_restart() {
        let mut state = quiet_state();
        state.lives = 1;
        state.score = 120;
        let center = state.tuning.world.center();
        state.obstacles.push(parked(center, 30.0));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Frozen: nothing moves, nothing counts
        let ticks = state.time_ticks;
        let craft_pos = state.craft.pos;
        let rock_positions: Vec<_> = state.obstacles.iter().map(|o| o.pos).collect();
        tick(
            &mut state,
            &TickInput {
                thrust: true,
                fire: true,
                ..Default::default()
            },
        );
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.craft.pos, craft_pos);
        assert!(state.projectiles.is_empty());
        assert_eq!(
            state.obstacles.iter().map(|o| o.pos).collect::<Vec<_>>(),
            rock_positions
        );

        assert!(state.restart());
        assert_eq!(state.phase, GamePhase::Active);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert_eq!(state.craft.pos, center);
        assert_eq!(state.craft.invulnerability, 0);
        assert_eq!(state.obstacles.len(), obstacle_count(1, &state.tuning.spawn));
        for rock in &state.obstacles {
            assert!(rock.pos.distance(center) >= SPAWN_EXCLUSION_RADIUS);
        }
    }

    #[test]
    fn test_counters_are_monotonic_within_a_game() {
        let mut state = GameState::new(2024);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        let (mut score, mut lives, mut level) = (state.score, state.lives, state.level);

        for _ in 0..3000 {
            tick(&mut state, &input);
            assert!(state.score >= score);
            assert!(state.lives <= lives);
            assert!(state.level >= level);
            (score, lives, level) = (state.score, state.lives, state.level);

            let world = state.tuning.world;
            let in_bounds = |p: Vec2| (0.0..=world.width).contains(&p.x) && (0.0..=world.height).contains(&p.y);
            assert!(in_bounds(state.craft.pos));
            assert!(state.projectiles.iter().all(|p| in_bounds(p.pos)));
            assert!(state.obstacles.iter().all(|o| in_bounds(o.pos) && o.radius > 0.0));

            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                rotate_left: true,
                thrust: true,
                ..Default::default()
            },
            fire(),
            TickInput {
                rotate_right: true,
                fire: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..50 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.obstacles.len(), state2.obstacles.len());
        assert_eq!(state1.craft.pos, state2.craft.pos);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut state = GameState::new(7);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..1200 {
            tick(&mut state, &input);
        }
        assert!(state.score > 0 || state.phase == GamePhase::GameOver);
    }
}
