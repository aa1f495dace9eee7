//! Presentation adapters
//!
//! Renderers only read [`crate::sim::Snapshot`]s; they never touch game state.

pub mod shapes;
pub mod text;
pub mod vertex;

pub use vertex::Vertex;
