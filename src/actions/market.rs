use tracing::info;

use crate::{
    catalog::Catalog,
    config::SimulationConfig,
    error::GameResult,
    state::GameState,
    GOLD,
};

use super::{reject, Outcome, Rejection};

pub fn check_hire_worker(state: &GameState, catalog: &Catalog, key: &str) -> GameResult<Outcome> {
    let definition = catalog.resource(key)?;
    let Some(base_cost) = definition.worker_cost else {
        return reject("hire", key, Rejection::NotHireable);
    };
    let cost = state.resource(key).map_or(base_cost, |res| res.worker_cost);
    if state.gold() < cost {
        return reject("hire", key, Rejection::InsufficientGold);
    }
    Ok(Outcome::Applied)
}

/// Hires one worker. The worker stays idle until the next payday pays its
/// salary; each hire makes the next one `worker_cost_growth` times dearer.
pub fn hire_worker(
    state: &mut GameState,
    catalog: &Catalog,
    config: &SimulationConfig,
    key: &str,
) -> GameResult<Outcome> {
    let outcome = check_hire_worker(state, catalog, key)?;
    if !outcome.is_applied() {
        return Ok(outcome);
    }
    let salary = catalog.resource(key)?.worker_salary.unwrap_or(0.0);
    let res = state.resource_mut(catalog, key)?;
    let cost = res.worker_cost;
    res.workers += 1;
    res.per_second += 1.0;
    res.worker_cost *= config.worker_cost_growth;
    res.worker_salary = salary;
    let workers = res.workers;
    state.add_amount(catalog, GOLD, -cost)?;
    info!(resource = key, workers, cost, "worker hired");
    Ok(outcome)
}

pub fn check_sell(state: &GameState, catalog: &Catalog, key: &str, amount: f64) -> GameResult<Outcome> {
    catalog.resource(key)?;
    if catalog.sell_price(key).is_none() {
        return reject("sell", key, Rejection::NotSellable);
    }
    if amount.is_nan() || amount <= 0.0 {
        return reject("sell", key, Rejection::NothingToSell);
    }
    if amount > state.amount(key) {
        return reject("sell", key, Rejection::InsufficientAmount);
    }
    Ok(Outcome::Applied)
}

/// Sells exactly `amount` units or nothing at all.
pub fn sell_resource(state: &mut GameState, catalog: &Catalog, key: &str, amount: f64) -> GameResult<Outcome> {
    let outcome = check_sell(state, catalog, key, amount)?;
    if !outcome.is_applied() {
        return Ok(outcome);
    }
    let price = catalog.sell_price(key).unwrap_or(0.0);
    state.add_amount(catalog, key, -amount)?;
    state.add_amount(catalog, GOLD, amount * price)?;
    Ok(outcome)
}

/// Sells `floor(amount × percent / 100)` units.
pub fn sell_resource_percentage(
    state: &mut GameState,
    catalog: &Catalog,
    key: &str,
    percent: f64,
) -> GameResult<Outcome> {
    let percent = percent.clamp(0.0, 100.0);
    let quantity = (state.amount(key) * percent / 100.0).floor();
    sell_resource(state, catalog, key, quantity)
}

pub fn sell_all_resource(state: &mut GameState, catalog: &Catalog, key: &str) -> GameResult<Outcome> {
    let quantity = state.amount(key);
    sell_resource(state, catalog, key, quantity)
}

/// Negative or NaN thresholds are stored as zero, which disables selling.
pub fn set_auto_sell_threshold(
    state: &mut GameState,
    catalog: &Catalog,
    key: &str,
    threshold: f64,
) -> GameResult<()> {
    state.resource_mut(catalog, key)?.auto_sell_threshold = threshold.max(0.0);
    Ok(())
}

pub fn set_auto_sell_enabled(
    state: &mut GameState,
    catalog: &Catalog,
    key: &str,
    enabled: bool,
) -> GameResult<()> {
    state.resource_mut(catalog, key)?.auto_sell_enabled = enabled;
    Ok(())
}
