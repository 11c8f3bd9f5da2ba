pub mod actions;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod map;
pub mod materials;
pub mod runtime;
pub mod state;
pub mod systems;
pub mod tools;
pub mod web;

/// Resource key of the currency every price and salary is paid in.
pub const GOLD: &str = "gold";

pub use actions::{Outcome, Rejection};
pub use catalog::{Catalog, CatalogLoader};
pub use config::GameConfig;
pub use engine::{Engine, EngineBuilder, TickSummary};
pub use error::{GameError, GameResult};
pub use game::Game;
pub use map::TileMap;
pub use state::{GameSnapshot, GameState};
