//! Tile map: text parsing, coordinate lookup and path sprite resolution.

pub mod grid;
pub mod parser;
pub mod path;
pub mod tiles;

use std::{fs, path::Path};

use anyhow::{Context, Result};

pub use grid::{Direction, SceneryLayer, TerrainGrid};
pub use parser::{parse_map_data, parse_scenery_data};
pub use path::{sub_tile_grid, sub_tile_variant, PathNeighbors, SubTileGrid, SubTileVariant};
pub use tiles::{SceneryKind, SceneryTile, TerrainKind, TerrainTile};

/// Terrain plus the scenery overlay sharing its coordinates.
#[derive(Debug, Clone, Default)]
pub struct TileMap {
    pub terrain: TerrainGrid,
    pub scenery: SceneryLayer,
}

impl TileMap {
    pub fn parse(terrain: &str, scenery: &str) -> Self {
        Self {
            terrain: TerrainGrid::from_tiles(parse_map_data(terrain)),
            scenery: SceneryLayer::from_tiles(parse_scenery_data(scenery)),
        }
    }

    pub fn load(terrain: impl AsRef<Path>, scenery: impl AsRef<Path>) -> Result<Self> {
        let terrain = terrain.as_ref();
        let scenery = scenery.as_ref();
        let terrain_text = fs::read_to_string(terrain)
            .with_context(|| format!("Failed to read terrain map {}", terrain.display()))?;
        let scenery_text = fs::read_to_string(scenery)
            .with_context(|| format!("Failed to read scenery map {}", scenery.display()))?;
        Ok(Self::parse(&terrain_text, &scenery_text))
    }

    /// 3×3 variant grid for the path tile at `(x, y)`.
    pub fn path_variants(&self, x: i32, y: i32) -> Option<SubTileGrid> {
        let tile = self.terrain.get(x, y)?;
        sub_tile_grid(tile, &self.terrain)
    }
}
