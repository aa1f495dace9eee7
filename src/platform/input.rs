//! Keyboard latch
//!
//! Key-down/key-up events flip latched flags between ticks. Once per tick the
//! host reads them as one [`TickInput`] snapshot.

use crate::sim::{GamePhase, TickInput};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
    Enter,
}

impl Key {
    /// Map a DOM-style key code (`"ArrowLeft"`, `"Space"`, ...) to a key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "Space" => Some(Key::Space),
            "Enter" => Some(Key::Enter),
            _ => None,
        }
    }
}

/// Latched key state plus a one-shot restart request
#[derive(Debug, Clone, Default)]
pub struct KeyLatch {
    left: bool,
    right: bool,
    up: bool,
    fire: bool,
    restart_requested: bool,
    /// Autopilot toggle (demo mode)
    pub idle_mode: bool,
}

impl KeyLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press
    ///
    /// Enter only counts as a restart request while the game is over.
    pub fn key_down(&mut self, key: Key, phase: GamePhase) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Up => self.up = true,
            Key::Space => self.fire = true,
            Key::Enter => {
                if phase == GamePhase::GameOver {
                    self.restart_requested = true;
                }
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Up => self.up = false,
            Key::Space => self.fire = false,
            Key::Enter => {}
        }
    }

    /// Current intents as a single snapshot
    pub fn intents(&self) -> TickInput {
        TickInput {
            rotate_left: self.left,
            rotate_right: self.right,
            thrust: self.up,
            fire: self.fire,
            idle_mode: self.idle_mode,
        }
    }

    /// Consume a pending restart request
    pub fn take_restart(&mut self) -> bool {
        std::mem::take(&mut self.restart_requested)
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn release_all(&mut self) {
        let idle_mode = self.idle_mode;
        *self = Self {
            idle_mode,
            ..Self::default()
        };
    }
}
