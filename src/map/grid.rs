//! Coordinate-indexed lookup over parsed tiles.

use std::collections::HashMap;

use super::tiles::{SceneryKind, SceneryTile, TerrainKind, TerrainTile};

/// Offset of one of the eight tiles surrounding a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthEast,
        Direction::NorthWest,
        Direction::SouthEast,
        Direction::SouthWest,
    ];

    /// `(dx, dy)` with `y` growing downwards, matching row order in map files.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (-1, -1),
            Direction::SouthEast => (1, 1),
            Direction::SouthWest => (-1, 1),
        }
    }
}

/// Terrain layer. Missing coordinates are tolerated and read as "no tile".
#[derive(Debug, Clone, Default)]
pub struct TerrainGrid {
    width: i32,
    height: i32,
    tiles: HashMap<(i32, i32), TerrainTile>,
}

impl TerrainGrid {
    pub fn from_tiles(tiles: impl IntoIterator<Item = TerrainTile>) -> Self {
        let mut grid = TerrainGrid::default();
        for tile in tiles {
            grid.width = grid.width.max(tile.x + 1);
            grid.height = grid.height.max(tile.y + 1);
            grid.tiles.insert((tile.x, tile.y), tile);
        }
        grid
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// True when every coordinate inside the bounding box holds a tile.
    pub fn is_dense(&self) -> bool {
        self.tiles.len() == (self.width as usize) * (self.height as usize)
    }

    pub fn get(&self, x: i32, y: i32) -> Option<&TerrainTile> {
        self.tiles.get(&(x, y))
    }

    pub fn neighbor(&self, tile: &TerrainTile, direction: Direction) -> Option<&TerrainTile> {
        let (dx, dy) = direction.offset();
        self.get(tile.x + dx, tile.y + dy)
    }

    pub fn is_path(&self, x: i32, y: i32) -> bool {
        self.get(x, y)
            .is_some_and(|tile| tile.kind == TerrainKind::Path)
    }

    pub fn tiles(&self) -> impl Iterator<Item = &TerrainTile> {
        self.tiles.values()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SceneryLayer {
    tiles: HashMap<(i32, i32), SceneryTile>,
}

impl SceneryLayer {
    pub fn from_tiles(tiles: impl IntoIterator<Item = SceneryTile>) -> Self {
        Self {
            tiles: tiles.into_iter().map(|t| ((t.x, t.y), t)).collect(),
        }
    }

    pub fn kind_at(&self, x: i32, y: i32) -> SceneryKind {
        self.tiles
            .get(&(x, y))
            .map(|tile| tile.kind)
            .unwrap_or(SceneryKind::Empty)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::parser::{parse_map_data, parse_scenery_data};

    #[test]
    fn grid_dimensions_follow_the_parsed_text() {
        let grid = TerrainGrid::from_tiles(parse_map_data("ggg\ngpg"));
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.tile_count(), 6);
        assert!(grid.is_dense());
    }

    #[test]
    fn dropped_symbols_leave_holes() {
        let grid = TerrainGrid::from_tiles(parse_map_data("gxg"));
        assert!(!grid.is_dense());
        assert!(grid.get(1, 0).is_none());
    }

    #[test]
    fn lookups_outside_the_map_are_not_path() {
        let grid = TerrainGrid::from_tiles(parse_map_data("p"));
        let tile = *grid.get(0, 0).unwrap();
        assert!(grid.is_path(0, 0));
        for direction in Direction::ALL {
            assert!(grid.neighbor(&tile, direction).is_none());
        }
        assert!(!grid.is_path(-1, 0));
    }

    #[test]
    fn scenery_defaults_to_empty() {
        let layer = SceneryLayer::from_tiles(parse_scenery_data("t.\n.s"));
        assert_eq!(layer.kind_at(0, 0), SceneryKind::Tree);
        assert_eq!(layer.kind_at(1, 1), SceneryKind::Rock);
        assert_eq!(layer.kind_at(5, 5), SceneryKind::Empty);
        assert_eq!(layer.len(), 4);
    }
}
