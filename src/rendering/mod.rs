//! # Rendering Module
//!
//! macroquad display layer: tile-grid drawing, entity sprites, HUD, and the
//! game-over screen. Nothing in here mutates the session.

pub mod display;

pub use display::*;
