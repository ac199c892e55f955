//! Keyboard handling
//!
//! Arrow keys set and clear three held intents. Pause and mute are one-shot
//! commands; everything else is ignored.

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Jump,
    Pause,
    Mute,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Jump),
            "Escape" | "p" | "P" => Some(Key::Pause),
            "m" | "M" => Some(Key::Mute),
            _ => None,
        }
    }
}

/// Currently held keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    /// Apply a key-down; returns the command key, if it was one
    pub fn key_down(&mut self, key: &str) -> Option<Key> {
        match Key::from_dom(key)? {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => self.jump = true,
            command => return Some(command),
        }
        None
    }

    pub fn key_up(&mut self, key: &str) {
        match Key::from_dom(key) {
            Some(Key::Left) => self.left = false,
            Some(Key::Right) => self.right = false,
            Some(Key::Jump) => self.jump = false,
            Some(Key::Pause | Key::Mute) | None => {}
        }
    }

    /// Release everything (focus lost, new run)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn to_tick_input(self) -> TickInput {
        TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump,
        }
    }
}
