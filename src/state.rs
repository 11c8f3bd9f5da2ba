use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{Catalog, ResourceDefinition},
    config::GameConfig,
    error::{GameError, GameResult},
    GOLD,
};

/// Mutable per-resource counters. Progress values are percentages in `[0, 100)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    pub amount: f64,
    pub per_second: f64,
    pub workers: u32,
    pub paid_workers: u32,
    pub worker_cost: f64,
    pub worker_salary: f64,
    pub is_gathering: bool,
    pub gather_progress: f64,
    pub worker_progress: f64,
    pub auto_sell_threshold: f64,
    pub auto_sell_enabled: bool,
}

impl ResourceState {
    pub fn for_definition(definition: &ResourceDefinition) -> Self {
        Self {
            amount: 0.0,
            per_second: 0.0,
            workers: 0,
            paid_workers: 0,
            worker_cost: definition.worker_cost.unwrap_or(0.0),
            worker_salary: 0.0,
            is_gathering: false,
            gather_progress: 0.0,
            worker_progress: 0.0,
            auto_sell_threshold: 0.0,
            auto_sell_enabled: false,
        }
    }
}

/// Equipped tool per tool category, at most one each.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    slots: BTreeMap<String, String>,
}

impl Equipment {
    pub fn equipped(&self, category: &str) -> Option<&str> {
        self.slots.get(category).map(String::as_str)
    }

    /// Places `tool` in `category`, returning whatever was there before.
    pub fn equip(&mut self, category: &str, tool: &str) -> Option<String> {
        self.slots.insert(category.to_string(), tool.to_string())
    }

    pub fn unequip(&mut self, category: &str) -> Option<String> {
        self.slots.remove(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots
            .iter()
            .map(|(category, tool)| (category.as_str(), tool.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Home {
    pub id: u32,
    pub level: u32,
    pub population: u32,
    pub happiness: f64,
}

/// Complete state of one game instance.
///
/// Resource entries are created lazily on first write and only for keys
/// the catalog defines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) tick: u64,
    pub(crate) resources: BTreeMap<String, ResourceState>,
    pub(crate) equipment: Equipment,
    pub(crate) homes: Vec<Home>,
}

impl GameState {
    pub fn new(catalog: &Catalog, config: &GameConfig) -> GameResult<Self> {
        let mut state = Self::default();
        for (key, amount) in &config.starting_resources {
            state.resource_mut(catalog, key)?.amount = *amount;
        }
        Ok(state)
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn resource(&self, key: &str) -> Option<&ResourceState> {
        self.resources.get(key)
    }

    pub fn resource_mut(&mut self, catalog: &Catalog, key: &str) -> GameResult<&mut ResourceState> {
        if !self.resources.contains_key(key) {
            let definition = catalog.resource(key)?;
            self.resources
                .insert(key.to_string(), ResourceState::for_definition(definition));
        }
        self.resources
            .get_mut(key)
            .ok_or_else(|| GameError::UnknownResource(key.to_string()))
    }

    pub fn resources(&self) -> impl Iterator<Item = (&str, &ResourceState)> {
        self.resources.iter().map(|(key, res)| (key.as_str(), res))
    }

    /// Owned amount; resources never touched read as zero.
    pub fn amount(&self, key: &str) -> f64 {
        self.resources.get(key).map_or(0.0, |res| res.amount)
    }

    pub fn set_amount(&mut self, catalog: &Catalog, key: &str, amount: f64) -> GameResult<()> {
        self.resource_mut(catalog, key)?.amount = amount.max(0.0);
        Ok(())
    }

    pub fn add_amount(&mut self, catalog: &Catalog, key: &str, delta: f64) -> GameResult<()> {
        let res = self.resource_mut(catalog, key)?;
        res.amount = (res.amount + delta).max(0.0);
        Ok(())
    }

    pub fn gold(&self) -> f64 {
        self.amount(GOLD)
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    pub fn homes(&self) -> &[Home] {
        &self.homes
    }

    pub fn home(&self, id: u32) -> GameResult<&Home> {
        self.homes
            .iter()
            .find(|home| home.id == id)
            .ok_or(GameError::UnknownHome(id))
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            tick: self.tick,
            gold: self.gold(),
            resources: self.resources.clone(),
            equipment: self
                .equipment
                .iter()
                .map(|(category, tool)| (category.to_string(), tool.to_string()))
                .collect(),
            homes: self.homes.clone(),
        }
    }
}

/// Serializable view published to presentation code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub gold: f64,
    pub resources: BTreeMap<String, ResourceState>,
    pub equipment: BTreeMap<String, String>,
    pub homes: Vec<Home>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_resources_are_applied() {
        let catalog = Catalog::standard().unwrap();
        let state = GameState::new(&catalog, &GameConfig::default()).unwrap();
        assert_eq!(state.gold(), 50.0);
        assert_eq!(state.amount("wood"), 0.0);
        assert!(state.resource("wood").is_none());
    }

    #[test]
    fn lazy_entries_take_worker_cost_from_the_definition() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        let wood = state.resource_mut(&catalog, "wood").unwrap();
        assert_eq!(wood.worker_cost, 10.0);
        assert_eq!(wood.amount, 0.0);
    }

    #[test]
    fn unknown_keys_are_refused() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        assert_eq!(
            state.resource_mut(&catalog, "wod").unwrap_err(),
            GameError::UnknownResource("wod".into())
        );
        let mut config = GameConfig::default();
        config.starting_resources.insert("diamonds".into(), 3.0);
        assert!(GameState::new(&catalog, &config).is_err());
    }

    #[test]
    fn amounts_never_go_negative() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        state.add_amount(&catalog, "stone", -5.0).unwrap();
        assert_eq!(state.amount("stone"), 0.0);
    }
}
