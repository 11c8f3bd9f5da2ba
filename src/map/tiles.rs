use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainKind {
    Grass,
    Path,
    HousingPlot,
    Water,
    Invalid,
}

impl TerrainKind {
    /// Maps a map-file symbol to its terrain. Unknown symbols map to `Invalid`.
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            'g' => TerrainKind::Grass,
            'p' => TerrainKind::Path,
            'l' => TerrainKind::HousingPlot,
            'w' => TerrainKind::Water,
            _ => TerrainKind::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != TerrainKind::Invalid
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneryKind {
    Empty,
    Tree,
    Rock,
    BerryBush,
    Invalid,
}

impl SceneryKind {
    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            '.' => SceneryKind::Empty,
            't' => SceneryKind::Tree,
            's' => SceneryKind::Rock,
            _ => SceneryKind::Invalid,
        }
    }

    pub fn is_valid(self) -> bool {
        self != SceneryKind::Invalid
    }

    /// Resource a player gathers by clicking this scenery, if any.
    pub fn gathered_resource(self) -> Option<&'static str> {
        match self {
            SceneryKind::Tree => Some("wood"),
            SceneryKind::Rock => Some("stone"),
            SceneryKind::BerryBush => Some("berries"),
            SceneryKind::Empty | SceneryKind::Invalid => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerrainTile {
    pub kind: TerrainKind,
    pub x: i32,
    pub y: i32,
    pub has_shelter: bool,
}

impl TerrainTile {
    pub fn new(kind: TerrainKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            x,
            y,
            has_shelter: false,
        }
    }

    pub fn is_path(&self) -> bool {
        self.kind == TerrainKind::Path
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneryTile {
    pub kind: SceneryKind,
    pub x: i32,
    pub y: i32,
}
