//! One game instance: static tables, configuration, live state and the
//! tick engine, behind the query and mutation surface used by front ends.

use std::sync::Arc;

use crate::{
    actions::{self, crafting, equipment, gathering, housing, market, Outcome, Rejection},
    catalog::Catalog,
    config::{BuildingCost, GameConfig},
    engine::{Engine, TickSummary},
    error::GameResult,
    map::{SubTileGrid, TileMap},
    state::{GameSnapshot, GameState, Home, ResourceState},
    tools,
};

pub struct Game {
    catalog: Arc<Catalog>,
    config: GameConfig,
    state: GameState,
    engine: Engine,
    map: TileMap,
}

impl Game {
    pub fn new(catalog: impl Into<Arc<Catalog>>, config: GameConfig) -> GameResult<Self> {
        config.validate()?;
        let catalog = catalog.into();
        let state = GameState::new(&catalog, &config)?;
        Ok(Self {
            catalog,
            config,
            state,
            engine: Engine::standard(),
            map: TileMap::default(),
        })
    }

    /// Standard tables with default configuration.
    pub fn standard() -> GameResult<Self> {
        Self::new(Catalog::standard()?, GameConfig::default())
    }

    pub fn with_map(mut self, map: TileMap) -> Self {
        self.map = map;
        self
    }

    pub fn with_engine(mut self, engine: Engine) -> Self {
        self.engine = engine;
        self
    }

    pub fn tick(&mut self) -> GameResult<TickSummary> {
        self.engine
            .tick(&mut self.state, &self.catalog, &self.config.simulation)
    }

    pub fn run(&mut self, ticks: u64) -> GameResult<()> {
        for _ in 0..ticks {
            self.tick()?;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn current_tick(&self) -> u64 {
        self.state.tick()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    // Queries

    /// Full state of `key`; untouched resources report their initial state.
    pub fn resource(&self, key: &str) -> GameResult<ResourceState> {
        let definition = self.catalog.resource(key)?;
        Ok(self
            .state
            .resource(key)
            .cloned()
            .unwrap_or_else(|| ResourceState::for_definition(definition)))
    }

    pub fn amount(&self, key: &str) -> GameResult<f64> {
        self.catalog.resource(key)?;
        Ok(self.state.amount(key))
    }

    pub fn gold(&self) -> f64 {
        self.state.gold()
    }

    pub fn homes(&self) -> &[Home] {
        self.state.homes()
    }

    pub fn home_build_cost(&self) -> BuildingCost {
        housing::home_build_cost(&self.state, &self.config.homes)
    }

    pub fn home_upgrade_cost(&self, id: u32) -> GameResult<BuildingCost> {
        housing::home_upgrade_cost(&self.state, &self.config.homes, id)
    }

    pub fn equipped_tool(&self, category: &str) -> Option<&str> {
        self.state.equipment().equipped(category)
    }

    pub fn gather_bonus(&self, key: &str) -> GameResult<f64> {
        self.catalog.resource(key)?;
        Ok(tools::gather_bonus_percent(&self.state, self.catalog.tools(), key))
    }

    pub fn worker_bonus(&self, key: &str) -> GameResult<f64> {
        self.catalog.resource(key)?;
        Ok(tools::worker_bonus_percent(&self.state, self.catalog.tools(), key))
    }

    pub fn path_variants(&self, x: i32, y: i32) -> Option<SubTileGrid> {
        self.map.path_variants(x, y)
    }

    // Can-do predicates

    pub fn can_start_gathering(&self, key: &str) -> GameResult<bool> {
        Ok(gathering::check_start_gathering(&self.state, &self.catalog, key)?.is_applied())
    }

    pub fn can_hire_worker(&self, key: &str) -> GameResult<bool> {
        Ok(market::check_hire_worker(&self.state, &self.catalog, key)?.is_applied())
    }

    pub fn can_sell(&self, key: &str, amount: f64) -> GameResult<bool> {
        Ok(market::check_sell(&self.state, &self.catalog, key, amount)?.is_applied())
    }

    pub fn can_equip_tool(&self, tool: &str) -> GameResult<bool> {
        Ok(equipment::check_equip_tool(&self.state, &self.catalog, tool)?.is_applied())
    }

    pub fn can_build_home(&self) -> bool {
        housing::check_build_home(&self.state, &self.config.homes).is_applied()
    }

    pub fn can_upgrade_home(&self, id: u32) -> GameResult<bool> {
        Ok(housing::check_upgrade_home(&self.state, &self.config.homes, id)?.is_applied())
    }

    pub fn can_craft(&self, recipe_id: &str) -> GameResult<bool> {
        Ok(crafting::check_craft(&self.state, &self.catalog, recipe_id)?.is_applied())
    }

    // Mutations

    /// Overwrites the stock of `key`, clamped at zero.
    pub fn set_amount(&mut self, key: &str, amount: f64) -> GameResult<()> {
        self.state.set_amount(&self.catalog, key, amount)
    }

    pub fn start_gathering(&mut self, key: &str) -> GameResult<Outcome> {
        gathering::start_gathering(&mut self.state, &self.catalog, key)
    }

    /// Starts gathering whatever the scenery at `(x, y)` yields.
    pub fn gather_at(&mut self, x: i32, y: i32) -> GameResult<Outcome> {
        match self.map.scenery.kind_at(x, y).gathered_resource() {
            Some(key) if self.catalog.contains(key) => self.start_gathering(key),
            _ => actions::reject("gather", &format!("({x}, {y})"), Rejection::NotGatherable),
        }
    }

    pub fn hire_worker(&mut self, key: &str) -> GameResult<Outcome> {
        market::hire_worker(&mut self.state, &self.catalog, &self.config.simulation, key)
    }

    pub fn sell_resource(&mut self, key: &str, amount: f64) -> GameResult<Outcome> {
        market::sell_resource(&mut self.state, &self.catalog, key, amount)
    }

    pub fn sell_resource_percentage(&mut self, key: &str, percent: f64) -> GameResult<Outcome> {
        market::sell_resource_percentage(&mut self.state, &self.catalog, key, percent)
    }

    pub fn sell_all_resource(&mut self, key: &str) -> GameResult<Outcome> {
        market::sell_all_resource(&mut self.state, &self.catalog, key)
    }

    pub fn set_auto_sell_threshold(&mut self, key: &str, threshold: f64) -> GameResult<()> {
        market::set_auto_sell_threshold(&mut self.state, &self.catalog, key, threshold)
    }

    pub fn set_auto_sell_enabled(&mut self, key: &str, enabled: bool) -> GameResult<()> {
        market::set_auto_sell_enabled(&mut self.state, &self.catalog, key, enabled)
    }

    pub fn equip_tool(&mut self, tool: &str) -> GameResult<Outcome> {
        equipment::equip_tool(&mut self.state, &self.catalog, tool)
    }

    pub fn swap_tool(&mut self, tool: &str) -> GameResult<Outcome> {
        equipment::swap_tool(&mut self.state, &self.catalog, tool)
    }

    pub fn unequip_tool(&mut self, tool: &str) -> GameResult<Outcome> {
        equipment::unequip_tool(&mut self.state, &self.catalog, tool)
    }

    pub fn build_home(&mut self) -> GameResult<Outcome> {
        housing::build_home(&mut self.state, &self.catalog, &self.config.homes)
    }

    pub fn upgrade_home(&mut self, id: u32) -> GameResult<Outcome> {
        housing::upgrade_home(&mut self.state, &self.catalog, &self.config.homes, id)
    }

    pub fn craft(&mut self, recipe_id: &str) -> GameResult<Outcome> {
        crafting::craft(&mut self.state, &self.catalog, recipe_id)
    }
}
