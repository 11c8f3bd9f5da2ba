//! Sub-tile variant resolution for path tiles.
//!
//! A path tile is drawn as a 3×3 composite. Each sub-cell picks one of
//! thirteen sprite pieces depending on which of the eight surrounding
//! tiles are also path. Sub-cell coordinates are local to the tile with
//! `(0, 0)` at the top-left.

use std::fmt;

use serde::{Serialize, Serializer};

use super::grid::{Direction, TerrainGrid};
use super::tiles::TerrainTile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubTileVariant {
    TopLeft,
    TopMiddle,
    TopRight,
    MiddleLeft,
    Middle,
    MiddleRight,
    BottomLeft,
    BottomMiddle,
    BottomRight,
    GrassTopLeft,
    GrassTopRight,
    GrassBottomLeft,
    GrassBottomRight,
}

impl SubTileVariant {
    /// Sprite label used by the asset packs.
    pub fn label(self) -> &'static str {
        match self {
            SubTileVariant::TopLeft => "tl",
            SubTileVariant::TopMiddle => "tm",
            SubTileVariant::TopRight => "tr",
            SubTileVariant::MiddleLeft => "ml",
            SubTileVariant::Middle => "m",
            SubTileVariant::MiddleRight => "mr",
            SubTileVariant::BottomLeft => "bl",
            SubTileVariant::BottomMiddle => "bm",
            SubTileVariant::BottomRight => "br",
            SubTileVariant::GrassTopLeft => "gtl",
            SubTileVariant::GrassTopRight => "gtr",
            SubTileVariant::GrassBottomLeft => "gbl",
            SubTileVariant::GrassBottomRight => "gbr",
        }
    }
}

impl fmt::Display for SubTileVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for SubTileVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

pub type SubTileGrid = [[SubTileVariant; 3]; 3];

/// Which of the eight surrounding tiles are path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathNeighbors {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl PathNeighbors {
    pub fn of(tile: &TerrainTile, grid: &TerrainGrid) -> Self {
        let is_path = |direction: Direction| {
            grid.neighbor(tile, direction)
                .is_some_and(TerrainTile::is_path)
        };
        Self {
            top: is_path(Direction::North),
            bottom: is_path(Direction::South),
            left: is_path(Direction::West),
            right: is_path(Direction::East),
            top_left: is_path(Direction::NorthWest),
            top_right: is_path(Direction::NorthEast),
            bottom_left: is_path(Direction::SouthWest),
            bottom_right: is_path(Direction::SouthEast),
        }
    }

    /// Variant for sub-cell `(sx, sy)`, `None` outside the 3×3 block.
    pub fn variant(&self, sx: usize, sy: usize) -> Option<SubTileVariant> {
        use SubTileVariant::*;

        let variant = match (sx, sy) {
            (1, 1) => Middle,
            (1, 0) => edge(self.top, TopMiddle),
            (0, 1) => edge(self.left, MiddleLeft),
            (2, 1) => edge(self.right, MiddleRight),
            (1, 2) => edge(self.bottom, BottomMiddle),
            (0, 0) => self.top_left_corner(),
            (2, 0) => self.top_right_corner(),
            (0, 2) => self.bottom_left_corner(),
            (2, 2) => self.bottom_right_corner(),
            _ => return None,
        };
        Some(variant)
    }

    pub fn grid(&self) -> SubTileGrid {
        use SubTileVariant::*;

        [
            [
                self.top_left_corner(),
                edge(self.top, TopMiddle),
                self.top_right_corner(),
            ],
            [
                edge(self.left, MiddleLeft),
                Middle,
                edge(self.right, MiddleRight),
            ],
            [
                self.bottom_left_corner(),
                edge(self.bottom, BottomMiddle),
                self.bottom_right_corner(),
            ],
        ]
    }

    // Each corner is spelled out rather than derived by reflection so a
    // single corner can diverge without touching the others.

    fn top_left_corner(&self) -> SubTileVariant {
        use SubTileVariant::*;
        match (self.left, self.top, self.top_left) {
            (true, true, true) => Middle,
            (true, true, false) => GrassBottomRight,
            (true, false, _) => TopMiddle,
            (false, true, _) => MiddleLeft,
            (false, false, _) => TopLeft,
        }
    }

    fn top_right_corner(&self) -> SubTileVariant {
        use SubTileVariant::*;
        match (self.right, self.top, self.top_right) {
            (true, true, true) => Middle,
            (true, true, false) => GrassBottomLeft,
            (true, false, _) => TopMiddle,
            // Vertical-only yields `mr` whatever the diagonal holds.
            (false, true, _) => MiddleRight,
            (false, false, _) => TopRight,
        }
    }

    fn bottom_left_corner(&self) -> SubTileVariant {
        use SubTileVariant::*;
        match (self.left, self.bottom, self.bottom_left) {
            (true, true, true) => Middle,
            (true, true, false) => GrassTopRight,
            (true, false, _) => BottomMiddle,
            (false, true, _) => MiddleLeft,
            (false, false, _) => BottomLeft,
        }
    }

    fn bottom_right_corner(&self) -> SubTileVariant {
        use SubTileVariant::*;
        match (self.right, self.bottom, self.bottom_right) {
            (true, true, true) => Middle,
            (true, true, false) => GrassTopLeft,
            (true, false, _) => BottomMiddle,
            (false, true, _) => MiddleRight,
            (false, false, _) => BottomRight,
        }
    }
}

fn edge(connected: bool, open: SubTileVariant) -> SubTileVariant {
    if connected {
        SubTileVariant::Middle
    } else {
        open
    }
}

/// Variant for one sub-cell of a path tile. Returns `None` for tiles that
/// are not path or sub-cells outside the 3×3 block.
pub fn sub_tile_variant(
    tile: &TerrainTile,
    grid: &TerrainGrid,
    sx: usize,
    sy: usize,
) -> Option<SubTileVariant> {
    if !tile.is_path() {
        return None;
    }
    PathNeighbors::of(tile, grid).variant(sx, sy)
}

/// Full 3×3 variant grid, row-major (`grid[sy][sx]`).
pub fn sub_tile_grid(tile: &TerrainTile, grid: &TerrainGrid) -> Option<SubTileGrid> {
    tile.is_path()
        .then(|| PathNeighbors::of(tile, grid).grid())
}
