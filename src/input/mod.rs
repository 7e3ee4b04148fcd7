//! # Input Module
//!
//! Keyboard polling for the per-tick movement state and the few menu keys.

use crate::game::HeldDirections;
use macroquad::prelude::*;

/// Input handler polled once per frame.
///
/// Movement is reported as four independent "held" flags rather than
/// discrete events, matching the fixed-step movement integration: a held key
/// contributes its step on every tick it stays down.
pub struct InputHandler {
    /// Whether WASD mirrors the arrow keys
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Samples the four direction keys.
    pub fn held_directions(&self) -> HeldDirections {
        let mut held = HeldDirections {
            left: is_key_down(KeyCode::Left),
            right: is_key_down(KeyCode::Right),
            up: is_key_down(KeyCode::Up),
            down: is_key_down(KeyCode::Down),
        };

        if self.wasd_enabled {
            held.left |= is_key_down(KeyCode::A);
            held.right |= is_key_down(KeyCode::D);
            held.up |= is_key_down(KeyCode::W);
            held.down |= is_key_down(KeyCode::S);
        }

        held
    }

    /// Returns a menu input if one of the menu keys was pressed this frame.
    pub fn menu_input(&self) -> Option<MenuInput> {
        if is_key_pressed(KeyCode::Escape) {
            return Some(MenuInput::Quit);
        }
        if is_key_pressed(KeyCode::N) {
            return Some(MenuInput::NewGame);
        }
        None
    }
}

/// Non-movement inputs handled by the scene loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    /// Quit the game
    Quit,
    /// Start a new session (from the game-over screen)
    NewGame,
}
