//! Read-only view of the simulation for presentation
//!
//! Built fresh after each tick. Nothing here refers back into `GameState`,
//! so a renderer can hold or serialize it freely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CraftView {
    pub pos: Vec2,
    pub heading: f32,
    pub radius: f32,
    /// False during the "off" half of the invulnerability blink
    pub visible: bool,
    pub invulnerable: bool,
    /// Thrust was applied this tick (exhaust flame)
    pub thrusting: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub pos: Vec2,
    pub rotation: f32,
    pub radius: f32,
    pub vertex_radii: Vec<f32>,
}

/// Everything a presentation layer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    pub level: u32,
    pub time_ticks: u64,
    pub world_size: Vec2,
    pub craft: CraftView,
    pub projectiles: Vec<ProjectileView>,
    pub obstacles: Vec<ObstacleView>,
}

/// One drawable entity, tagged by kind
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Craft(&'a CraftView),
    Projectile(&'a ProjectileView),
    Obstacle(&'a ObstacleView),
}

impl EntityView<'_> {
    pub fn pos(&self) -> Vec2 {
        match self {
            EntityView::Craft(c) => c.pos,
            EntityView::Projectile(p) => p.pos,
            EntityView::Obstacle(o) => o.pos,
        }
    }
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let craft = &state.craft;
        Self {
            phase: state.phase,
            score: state.score,
            lives: state.lives,
            level: state.level,
            time_ticks: state.time_ticks,
            world_size: Vec2::new(state.tuning.world.width, state.tuning.world.height),
            craft: CraftView {
                pos: craft.pos,
                heading: craft.heading,
                radius: craft.radius,
                visible: craft.is_visible(&state.tuning.craft),
                invulnerable: craft.is_invulnerable(),
                thrusting: craft.thrusting,
            },
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    pos: p.pos,
                    radius: p.radius,
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    pos: o.pos,
                    rotation: o.rotation,
                    radius: o.radius,
                    vertex_radii: o.vertex_radii.clone(),
                })
                .collect(),
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// All entities in draw order: obstacles, projectiles, then the craft on top
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> {
        self.obstacles
            .iter()
            .map(EntityView::Obstacle)
            .chain(self.projectiles.iter().map(EntityView::Projectile))
            .chain(std::iter::once(EntityView::Craft(&self.craft)))
    }
}

impl GameState {
    /// Presentation snapshot of the current state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}
