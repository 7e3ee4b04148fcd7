//! # Map Module
//!
//! The tile-grid value type the simulation runs on, plus level loading.
//!
//! A [`TileGrid`] is an opaque rectangle of tile indices with pixel
//! dimensions derived from the tile size. The simulation reads only the
//! dimensions; the display additionally reads the indices and the tile-image
//! source table. Parsing of the Tiled editor's JSON export lives in
//! [`tiled`]; the session reaches level files solely through the
//! [`LevelSource`] trait so tests can substitute in-memory grids.

pub mod tiled;

pub use tiled::parse_map;

use crate::{ForageError, ForageResult};
use log::debug;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A parsed tile map: dimensions plus the primary row-major tile-index layer.
///
/// Cell values are Tiled global tile ids; 0 marks an empty cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_width: u32,
    tile_height: u32,
    cells: Vec<u32>,
    tile_sources: HashMap<u32, String>,
}

impl TileGrid {
    /// Creates a grid, validating that the cell buffer matches the declared
    /// dimensions.
    pub fn new(
        width: u32,
        height: u32,
        tile_width: u32,
        tile_height: u32,
        cells: Vec<u32>,
        tile_sources: HashMap<u32, String>,
    ) -> ForageResult<Self> {
        if width == 0 || height == 0 || tile_width == 0 || tile_height == 0 {
            return Err(ForageError::MapFormat(format!(
                "degenerate map dimensions {}x{} (tile {}x{})",
                width, height, tile_width, tile_height
            )));
        }
        let expected = (width as usize) * (height as usize);
        if cells.len() != expected {
            return Err(ForageError::MapFormat(format!(
                "tile layer has {} cells, expected {}",
                cells.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            tile_width,
            tile_height,
            cells,
            tile_sources,
        })
    }

    /// An all-empty grid of square tiles. Handy for tests and headless runs.
    pub fn blank(width: u32, height: u32, tile_size: u32) -> Self {
        Self {
            width,
            height,
            tile_width: tile_size,
            tile_height: tile_size,
            cells: vec![0; (width as usize) * (height as usize)],
            tile_sources: HashMap::new(),
        }
    }

    /// Grid width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Tile width in pixels.
    pub fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Tile height in pixels.
    pub fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Map width in pixels.
    pub fn pixel_width(&self) -> u32 {
        self.width * self.tile_width
    }

    /// Map height in pixels.
    pub fn pixel_height(&self) -> u32 {
        self.height * self.tile_height
    }

    /// The tile id at the given cell, or `None` when the cell is out of
    /// range or empty.
    pub fn tile_at(&self, col: u32, row: u32) -> Option<u32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let gid = self.cells[(row * self.width + col) as usize];
        (gid != 0).then_some(gid)
    }

    /// Tile id to image-source table, for the display's texture loading.
    pub fn tile_sources(&self) -> &HashMap<u32, String> {
        &self.tile_sources
    }
}

/// The externally-delegated level-load operation, invoked on gate
/// transitions.
pub trait LevelSource {
    /// Loads the grid for the given 1-based level number.
    fn load_level(&mut self, level: u32) -> ForageResult<TileGrid>;
}

/// Loads `level{N}.json` Tiled exports from a directory.
pub struct DirectoryLevels {
    root: PathBuf,
}

impl DirectoryLevels {
    /// Creates a source rooted at the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory the level files (and their tile images) live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing the given level.
    pub fn level_path(&self, level: u32) -> PathBuf {
        self.root.join(format!("level{}.json", level))
    }
}

impl LevelSource for DirectoryLevels {
    fn load_level(&mut self, level: u32) -> ForageResult<TileGrid> {
        let path = self.level_path(level);
        debug!("Loading level {} from {}", level, path.display());
        let json = fs::read_to_string(&path)?;
        parse_map(&json)
    }
}
