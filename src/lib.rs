//! # Forage
//!
//! A small 2D tile-map foraging game: guide the player sprite across a map
//! exported from the Tiled editor, gather food items, avoid the spoiled ones,
//! and slip through the gate to the next area.
//!
//! ## Architecture Overview
//!
//! The crate is split along the seams of a frame-stepped simulation:
//!
//! - **Game Session**: the owned aggregate of all entities, score, and level
//!   state, advanced exactly once per frame by `advance_tick`
//! - **Map Model**: a plain tile-grid value parsed from Tiled JSON exports;
//!   the session only ever reads its dimensions and tile indices
//! - **Input**: four independent "direction held" booleans polled per frame
//! - **Rendering**: a macroquad display layer that follows the player with a
//!   viewport and draws tiles, entities, and the HUD
//!
//! The session performs no I/O of its own; the one externally-delegated
//! operation is `LevelSource::load_level`, invoked on gate transitions.

pub mod game;
pub mod input;
pub mod map;
pub mod rendering;
pub mod scenes;

pub use game::{
    Body, Bounds, EntityKind, Footprint, GameSession, Gate, GateState, HeldDirections, Hitbox,
    PatrolNpc, Phase, Position, SpriteFootprints, TickEvent,
};
pub use input::{InputHandler, MenuInput};
pub use map::{DirectoryLevels, LevelSource, TileGrid};
pub use rendering::GameDisplay;
pub use scenes::{SceneManager, SceneType};

/// Core error type for the Forage game.
#[derive(thiserror::Error, Debug)]
pub enum ForageError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// A map file parsed but its contents are unusable
    #[error("Malformed map: {0}")]
    MapFormat(String),

    /// A required asset could not be loaded
    #[error("Missing asset: {0}")]
    AssetMissing(String),
}

/// Result type used throughout the Forage codebase.
pub type ForageResult<T> = Result<T, ForageError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Pixels the player moves per tick per held direction
    pub const PLAYER_STEP: f32 = 5.0;

    /// Margin subtracted from the map extent when clamping the player
    pub const PLAYER_MARGIN: f32 = 30.0;

    /// Score required before the gate arms
    pub const GATE_SCORE_THRESHOLD: u32 = 9;

    /// Collectibles spawned at session start
    pub const COLLECTIBLE_COUNT: usize = 15;

    /// Hazards spawned at session start
    pub const HAZARD_COUNT: usize = 5;

    /// Level the session starts on
    pub const START_LEVEL: u32 = 1;

    /// First level on which patrol NPCs appear
    pub const NPC_LEVEL: u32 = 2;

    /// Render/hitbox scale factors per entity kind
    pub const PLAYER_SCALE: f32 = 0.05;
    pub const COLLECTIBLE_SCALE: f32 = 0.01;
    pub const HAZARD_SCALE: f32 = 0.01;
    pub const GATE_SCALE: f32 = 0.1;
    pub const NPC_WALKER_SCALE: f32 = 0.40;
    pub const NPC_DRIFTER_SCALE: f32 = 0.12;

    /// Distance of the gate anchor from the map's bottom-right corner
    pub const GATE_INSET: f32 = 60.0;
}
