//! # Scene Management System
//!
//! A small outer loop over the two scenes the game has: normal play and the
//! game-over screen. Keeps the per-frame wiring (input → tick → texture
//! reload → render) out of `main`.

use crate::config;
use crate::game::{GameSession, TickEvent};
use crate::input::{InputHandler, MenuInput};
use crate::map::{DirectoryLevels, LevelSource};
use crate::rendering::GameDisplay;
use crate::ForageResult;
use log::info;
use macroquad::prelude::*;
use ::rand::{rngs::StdRng, SeedableRng};

/// Represents the current scene in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Normal gameplay
    Playing,
    /// Terminal game-over screen
    GameOver,
}

/// Coordinates the session, input, display, and level source across frames.
pub struct SceneManager {
    current_scene: SceneType,
    session: GameSession,
    display: GameDisplay,
    input: InputHandler,
    levels: DirectoryLevels,
    /// Base seed; each new game reseeds from it so restarts differ
    seed: u64,
    games_started: u64,
}

impl SceneManager {
    /// Creates a scene manager around an already-initialized session.
    pub fn new(
        session: GameSession,
        mut display: GameDisplay,
        input: InputHandler,
        levels: DirectoryLevels,
        seed: u64,
    ) -> Self {
        display.add_message("Welcome to Forage!".to_string());
        display.add_message("Arrows/WASD to move, ESC to quit".to_string());

        Self {
            current_scene: SceneType::Playing,
            session,
            display,
            input,
            levels,
            seed,
            games_started: 0,
        }
    }

    /// Runs the scene loop until the player quits.
    pub async fn run(&mut self) -> ForageResult<()> {
        loop {
            let exit = match self.current_scene {
                SceneType::Playing => self.update_playing().await?,
                SceneType::GameOver => self.update_game_over().await?,
            };
            if exit {
                break;
            }
            next_frame().await;
        }
        info!("Game loop ended");
        Ok(())
    }

    /// Advances one frame of play. Returns true if exit is requested.
    async fn update_playing(&mut self) -> ForageResult<bool> {
        if self.input.menu_input() == Some(MenuInput::Quit) {
            return Ok(true);
        }

        let held = self.input.held_directions();
        let events = self.session.advance_tick(&held, &mut self.levels);

        let level_changed = events
            .iter()
            .any(|event| matches!(event, TickEvent::LevelChanged { .. }));
        self.display.note_events(&events);
        if level_changed {
            // New grid, new tileset
            self.display.load_tiles(&self.session.grid).await;
        }

        if self.session.is_over() {
            self.current_scene = SceneType::GameOver;
        }

        self.display.render(&self.session);
        Ok(false)
    }

    /// Handles the game-over screen. Returns true if exit is requested.
    async fn update_game_over(&mut self) -> ForageResult<bool> {
        match self.input.menu_input() {
            Some(MenuInput::Quit) => return Ok(true),
            Some(MenuInput::NewGame) => {
                self.start_new_game().await?;
                return Ok(false);
            }
            None => {}
        }

        self.display.render(&self.session);
        Ok(false)
    }

    /// Rebuilds the session from the starting level with a fresh reseed.
    async fn start_new_game(&mut self) -> ForageResult<()> {
        self.games_started += 1;
        let seed = self.seed.wrapping_add(self.games_started);
        info!("Starting a new game with seed {}", seed);

        let grid = self.levels.load_level(config::START_LEVEL)?;
        self.display.load_tiles(&grid).await;

        let mut rng = StdRng::seed_from_u64(seed);
        self.session = GameSession::new(grid, &self.display.footprints(), &mut rng);
        self.current_scene = SceneType::Playing;
        self.display.add_message("Fresh start. Good luck!".to_string());
        Ok(())
    }
}
