//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{craft_hits_obstacle, fragment, projectile_hits_obstacle};
pub use snapshot::{CraftView, EntityView, ObstacleView, ProjectileView, Snapshot};
pub use spawn::{obstacle_count, populate};
pub use state::{Craft, GamePhase, GameState, Obstacle, Projectile};
pub use tick::{TickInput, tick};
