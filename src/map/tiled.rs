//! # Tiled JSON Parsing
//!
//! Deserialization of the Tiled editor's JSON export into a [`TileGrid`].
//!
//! Only the slice of the format this game uses is modeled: map dimensions,
//! the first tile layer's data array, and image-collection tilesets (one
//! image file per tile). Everything else in the export is ignored.

use crate::map::TileGrid;
use crate::{ForageError, ForageResult};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
struct TiledMap {
    width: u32,
    height: u32,
    tilewidth: u32,
    tileheight: u32,
    #[serde(default)]
    layers: Vec<TiledLayer>,
    #[serde(default)]
    tilesets: Vec<TiledTileset>,
}

#[derive(Debug, Deserialize)]
struct TiledLayer {
    #[serde(rename = "type", default)]
    layer_type: String,
    #[serde(default)]
    data: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct TiledTileset {
    firstgid: u32,
    #[serde(default)]
    tiles: Vec<TiledTile>,
}

#[derive(Debug, Deserialize)]
struct TiledTile {
    id: u32,
    #[serde(default)]
    image: Option<String>,
}

/// Parses a Tiled JSON export.
///
/// The first tile layer becomes the primary index layer. Tileset-local tile
/// ids are offset by their tileset's `firstgid` so the source table lines up
/// with the gids stored in the layer data.
pub fn parse_map(json: &str) -> ForageResult<TileGrid> {
    let map: TiledMap = serde_json::from_str(json)?;

    let layer = map
        .layers
        .iter()
        .find(|layer| layer.layer_type == "tilelayer")
        .ok_or_else(|| ForageError::MapFormat("map has no tile layer".to_string()))?;

    let mut tile_sources = HashMap::new();
    for tileset in &map.tilesets {
        for tile in &tileset.tiles {
            if let Some(image) = &tile.image {
                tile_sources.insert(tileset.firstgid + tile.id, image.clone());
            }
        }
    }

    TileGrid::new(
        map.width,
        map.height,
        map.tilewidth,
        map.tileheight,
        layer.data.clone(),
        tile_sources,
    )
}
