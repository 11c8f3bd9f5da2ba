use tracing::info;

use crate::{
    catalog::Catalog,
    config::{BuildingCost, HomeConfig},
    error::{GameError, GameResult},
    state::{GameState, Home},
    GOLD,
};

use super::{reject, Outcome, Rejection};

/// Cost of the next home: base cost grown once per home already built.
pub fn home_build_cost(state: &GameState, config: &HomeConfig) -> BuildingCost {
    config
        .build_cost
        .scaled(config.build_cost_growth, state.homes().len() as u32)
}

/// Cost of raising home `id` one level: base cost grown once per level.
pub fn home_upgrade_cost(state: &GameState, config: &HomeConfig, id: u32) -> GameResult<BuildingCost> {
    let home = state.home(id)?;
    Ok(config
        .upgrade_cost
        .scaled(config.upgrade_cost_growth, home.level))
}

fn affordable(state: &GameState, cost: &BuildingCost) -> bool {
    state.amount("wood") >= cost.wood
        && state.amount("stone") >= cost.stone
        && state.amount(GOLD) >= cost.gold
}

fn pay(state: &mut GameState, catalog: &Catalog, cost: &BuildingCost) -> GameResult<()> {
    state.add_amount(catalog, "wood", -cost.wood)?;
    state.add_amount(catalog, "stone", -cost.stone)?;
    state.add_amount(catalog, GOLD, -cost.gold)
}

pub fn check_build_home(state: &GameState, config: &HomeConfig) -> Outcome {
    if affordable(state, &home_build_cost(state, config)) {
        Outcome::Applied
    } else {
        Outcome::Rejected(Rejection::InsufficientBuildMaterials)
    }
}

pub fn build_home(state: &mut GameState, catalog: &Catalog, config: &HomeConfig) -> GameResult<Outcome> {
    let cost = home_build_cost(state, config);
    if !affordable(state, &cost) {
        return reject("build_home", "home", Rejection::InsufficientBuildMaterials);
    }
    pay(state, catalog, &cost)?;
    let id = state.homes.iter().map(|home| home.id).max().unwrap_or(0) + 1;
    state.homes.push(Home {
        id,
        level: 1,
        population: config.starting_population,
        happiness: config.starting_happiness.clamp(0.0, 100.0),
    });
    info!(id, ?cost, "home built");
    Ok(Outcome::Applied)
}

pub fn check_upgrade_home(state: &GameState, config: &HomeConfig, id: u32) -> GameResult<Outcome> {
    let cost = home_upgrade_cost(state, config, id)?;
    if affordable(state, &cost) {
        Ok(Outcome::Applied)
    } else {
        Ok(Outcome::Rejected(Rejection::InsufficientBuildMaterials))
    }
}

pub fn upgrade_home(
    state: &mut GameState,
    catalog: &Catalog,
    config: &HomeConfig,
    id: u32,
) -> GameResult<Outcome> {
    let cost = home_upgrade_cost(state, config, id)?;
    if !affordable(state, &cost) {
        return reject("upgrade_home", &id.to_string(), Rejection::InsufficientBuildMaterials);
    }
    pay(state, catalog, &cost)?;
    let home = state
        .homes
        .iter_mut()
        .find(|home| home.id == id)
        .ok_or(GameError::UnknownHome(id))?;
    home.level += 1;
    home.population += config.population_per_level;
    home.happiness = (home.happiness + config.happiness_per_level).min(100.0);
    info!(id, level = home.level, ?cost, "home upgraded");
    Ok(Outcome::Applied)
}
