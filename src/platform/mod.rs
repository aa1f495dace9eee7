//! Platform abstraction layer
//!
//! Turns host events into simulation intents. The host owns the event loop
//! and feeds raw key transitions in; the simulation only ever sees
//! [`crate::sim::TickInput`] snapshots.

pub mod input;

pub use input::{Key, KeyLatch};
