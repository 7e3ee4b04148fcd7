//! # Display Management
//!
//! Draws the current session state with macroquad: the visible slice of the
//! tile grid under a player-following viewport, the entity sprites, a score
//! HUD, a short message log, and the terminal game-over screen.

use crate::game::{Body, Footprint, GameSession, SpriteFootprints, TickEvent};
use crate::map::TileGrid;
use crate::{ForageError, ForageResult};
use log::warn;
use macroquad::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Texture handles for every sprite the game draws.
pub struct SpriteTextures {
    pub player: Texture2D,
    pub collectible: Texture2D,
    pub hazard: Texture2D,
    pub gate: Texture2D,
    pub npc_walker: Texture2D,
    pub npc_drifter: Texture2D,
}

/// Display manager owning all loaded textures and the message log.
pub struct GameDisplay {
    /// Directory the level files and their images live in
    assets_root: PathBuf,
    /// Tile id to texture, rebuilt on level changes
    tile_textures: HashMap<u32, Texture2D>,
    sprites: SpriteTextures,
    /// Message history shown at the bottom of the screen
    messages: Vec<String>,
    max_messages: usize,
}

impl GameDisplay {
    /// Loads all required sprites plus the tile textures for the starting
    /// grid. A missing sprite is fatal; missing tile images degrade to empty
    /// cells.
    pub async fn load(assets_root: impl Into<PathBuf>, grid: &TileGrid) -> ForageResult<Self> {
        let assets_root = assets_root.into();

        let sprites = SpriteTextures {
            player: load_sprite(&assets_root, "player.png").await?,
            collectible: load_sprite(&assets_root, "pickup.png").await?,
            hazard: load_sprite(&assets_root, "hazard.png").await?,
            gate: load_sprite(&assets_root, "gate.png").await?,
            npc_walker: load_sprite(&assets_root, "npc_walker.png").await?,
            npc_drifter: load_sprite(&assets_root, "npc_drifter.png").await?,
        };

        let mut display = Self {
            assets_root,
            tile_textures: HashMap::new(),
            sprites,
            messages: Vec::new(),
            max_messages: 100,
        };
        display.load_tiles(grid).await;
        Ok(display)
    }

    /// Rebuilds the tile-texture table for a grid. Call after every level
    /// change. Unloadable tile images are logged and skipped; their cells
    /// render as background.
    pub async fn load_tiles(&mut self, grid: &TileGrid) {
        self.tile_textures.clear();
        for (&gid, source) in grid.tile_sources() {
            match load_tile_texture(&self.assets_root, source).await {
                Some(texture) => {
                    self.tile_textures.insert(gid, texture);
                }
                None => warn!("Skipping tile {}: image {} failed to load", gid, source),
            }
        }
    }

    /// Nominal sprite sizes, measured from the loaded textures. The session
    /// uses these for hitbox derivation.
    pub fn footprints(&self) -> SpriteFootprints {
        SpriteFootprints {
            player: footprint_of(&self.sprites.player),
            collectible: footprint_of(&self.sprites.collectible),
            hazard: footprint_of(&self.sprites.hazard),
            gate: footprint_of(&self.sprites.gate),
            npc_walker: footprint_of(&self.sprites.npc_walker),
            npc_drifter: footprint_of(&self.sprites.npc_drifter),
        }
    }

    /// Adds a message to the history.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > self.max_messages {
            self.messages.remove(0);
        }
    }

    /// Converts tick events into log messages.
    pub fn note_events(&mut self, events: &[TickEvent]) {
        for event in events {
            match event {
                TickEvent::CollectibleTaken { score } => {
                    self.add_message(format!("Picked up food ({})", score));
                }
                TickEvent::GateArmed => {
                    self.add_message("The gate has appeared!".to_string());
                }
                TickEvent::LevelChanged { level } => {
                    self.add_message(format!("Entered area {}", level));
                }
                TickEvent::TransitionFailed { reason } => {
                    self.add_message(format!("The gate won't open: {}", reason));
                }
                TickEvent::GameOver => {
                    self.add_message("That one was bad...".to_string());
                }
            }
        }
    }

    /// Renders the complete frame for the current session state.
    pub fn render(&self, session: &GameSession) {
        if session.is_over() {
            self.render_game_over();
            return;
        }

        clear_background(BLACK);

        // Viewport follows the player
        let cam_x = session.player.position.x - screen_width() / 2.0;
        let cam_y = session.player.position.y - screen_height() / 2.0;

        self.render_tiles(&session.grid, cam_x, cam_y);

        for item in &session.collectibles {
            self.draw_body(&self.sprites.collectible, item, cam_x, cam_y);
        }
        for hazard in &session.hazards {
            self.draw_body(&self.sprites.hazard, hazard, cam_x, cam_y);
        }
        if session.gate.is_armed() {
            self.draw_body(&self.sprites.gate, &session.gate.body, cam_x, cam_y);
        }
        if session.npcs_visible {
            let npc_textures = [&self.sprites.npc_walker, &self.sprites.npc_drifter];
            for (npc, texture) in session.npcs.iter().zip(npc_textures) {
                self.draw_body(texture, &npc.body, cam_x, cam_y);
            }
        }
        self.draw_body(&self.sprites.player, &session.player, cam_x, cam_y);

        self.render_hud(session);
        self.render_messages();
    }

    /// Draws the slice of the grid visible under the current viewport.
    fn render_tiles(&self, grid: &TileGrid, cam_x: f32, cam_y: f32) {
        let tile_w = grid.tile_width() as f32;
        let tile_h = grid.tile_height() as f32;

        let first_col = (cam_x / tile_w).floor().max(0.0) as u32;
        let first_row = (cam_y / tile_h).floor().max(0.0) as u32;
        let cols_on_screen = (screen_width() / tile_w).ceil() as u32 + 1;
        let rows_on_screen = (screen_height() / tile_h).ceil() as u32 + 1;

        for row in first_row..(first_row + rows_on_screen).min(grid.height()) {
            for col in first_col..(first_col + cols_on_screen).min(grid.width()) {
                let Some(gid) = grid.tile_at(col, row) else {
                    continue;
                };
                let Some(texture) = self.tile_textures.get(&gid) else {
                    continue;
                };
                draw_texture_ex(
                    texture,
                    col as f32 * tile_w - cam_x,
                    row as f32 * tile_h - cam_y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(vec2(tile_w, tile_h)),
                        ..Default::default()
                    },
                );
            }
        }
    }

    /// Draws one entity sprite at its scaled footprint size.
    fn draw_body(&self, texture: &Texture2D, body: &Body, cam_x: f32, cam_y: f32) {
        draw_texture_ex(
            texture,
            body.position.x - cam_x,
            body.position.y - cam_y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(
                    body.footprint.width * body.scale,
                    body.footprint.height * body.scale,
                )),
                ..Default::default()
            },
        );
    }

    fn render_hud(&self, session: &GameSession) {
        draw_text(
            &format!("Food: {}", session.score),
            screen_width() - 200.0,
            30.0,
            32.0,
            RED,
        );
        draw_text(
            &format!("Area {}", session.level),
            screen_width() - 200.0,
            60.0,
            24.0,
            WHITE,
        );
    }

    fn render_messages(&self) {
        let message_count = 3;
        let line_height = 18.0;
        let area_y = screen_height() - 70.0;

        draw_rectangle(
            0.0,
            area_y - 14.0,
            screen_width(),
            70.0,
            Color::new(0.0, 0.0, 0.0, 0.8),
        );

        let start = self.messages.len().saturating_sub(message_count);
        for (i, message) in self.messages.iter().skip(start).enumerate() {
            draw_text(message, 10.0, area_y + i as f32 * line_height, 16.0, WHITE);
        }
    }

    fn render_game_over(&self) {
        clear_background(BLACK);
        draw_text(
            "GAME OVER",
            screen_width() / 2.0 - 160.0,
            screen_height() / 2.0 - 20.0,
            72.0,
            RED,
        );
        draw_text(
            "N: new game    ESC: quit",
            screen_width() / 2.0 - 120.0,
            screen_height() / 2.0 + 30.0,
            24.0,
            GRAY,
        );
    }
}

fn footprint_of(texture: &Texture2D) -> Footprint {
    Footprint::new(texture.width(), texture.height())
}

/// Loads a required sprite; failure is fatal at startup.
async fn load_sprite(root: &Path, name: &str) -> ForageResult<Texture2D> {
    let path = root.join(name);
    load_texture(&path.to_string_lossy())
        .await
        .map_err(|err| ForageError::AssetMissing(format!("{}: {}", path.display(), err)))
}

/// Loads a tile image, falling back to `tiles/<basename>` the way exported
/// maps often reference images relative to the editor's working directory.
async fn load_tile_texture(root: &Path, source: &str) -> Option<Texture2D> {
    let path = root.join(source);
    if let Ok(texture) = load_texture(&path.to_string_lossy()).await {
        return Some(texture);
    }

    let base = Path::new(source).file_name()?;
    let fallback = root.join("tiles").join(base);
    load_texture(&fallback.to_string_lossy()).await.ok()
}
