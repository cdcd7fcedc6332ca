//! Pressed-key bookkeeping.

use std::collections::HashMap;

use bevy::input::ButtonState;
use bevy::prelude::*;

/// Last known up/down state of every key seen so far.
///
/// Written by key events as they arrive, read once per frame through
/// [`InputState::snapshot`].
#[derive(Resource, Debug, Default)]
pub struct InputState {
    keys: HashMap<KeyCode, bool>,
}

impl InputState {
    pub fn set(&mut self, key: KeyCode, state: ButtonState) {
        self.keys.insert(key, state.is_pressed());
    }

    pub fn is_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).copied().unwrap_or(false)
    }

    /// Copy out the four directional keys for this frame.
    pub fn snapshot(&self) -> DirectionKeys {
        DirectionKeys {
            left: self.is_pressed(KeyCode::ArrowLeft),
            right: self.is_pressed(KeyCode::ArrowRight),
            up: self.is_pressed(KeyCode::ArrowUp),
            down: self.is_pressed(KeyCode::ArrowDown),
        }
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.keys.clear();
    }
}

/// Directional keys held during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DirectionKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}
