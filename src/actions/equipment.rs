use tracing::{debug, warn};

use crate::{catalog::Catalog, error::GameResult, state::GameState};

use super::{reject, Outcome, Rejection};

pub fn check_equip_tool(state: &GameState, catalog: &Catalog, tool: &str) -> GameResult<Outcome> {
    catalog.resource(tool)?;
    catalog.tools().category(tool)?;
    if state.amount(tool) <= 0.0 {
        return reject("equip", tool, Rejection::NotOwned);
    }
    Ok(Outcome::Applied)
}

/// Takes one unit of `tool` out of inventory and equips it.
///
/// A tool already occupying the category is overwritten and its unit is
/// not returned to inventory. Use [`swap_tool`] to keep it.
pub fn equip_tool(state: &mut GameState, catalog: &Catalog, tool: &str) -> GameResult<Outcome> {
    let outcome = check_equip_tool(state, catalog, tool)?;
    if !outcome.is_applied() {
        return Ok(outcome);
    }
    let category = catalog.tools().category(tool)?;
    state.add_amount(catalog, tool, -1.0)?;
    if let Some(previous) = state.equipment.equip(category, tool) {
        warn!(category, %previous, replacement = tool, "equipped tool overwritten");
    }
    Ok(outcome)
}

/// Like [`equip_tool`], but a displaced tool goes back to inventory.
pub fn swap_tool(state: &mut GameState, catalog: &Catalog, tool: &str) -> GameResult<Outcome> {
    let outcome = check_equip_tool(state, catalog, tool)?;
    if !outcome.is_applied() {
        return Ok(outcome);
    }
    let category = catalog.tools().category(tool)?;
    state.add_amount(catalog, tool, -1.0)?;
    if let Some(previous) = state.equipment.equip(category, tool) {
        state.add_amount(catalog, &previous, 1.0)?;
        debug!(category, %previous, "displaced tool returned");
    }
    Ok(outcome)
}

pub fn unequip_tool(state: &mut GameState, catalog: &Catalog, tool: &str) -> GameResult<Outcome> {
    let category = catalog.tools().category(tool)?;
    if state.equipment.equipped(category) != Some(tool) {
        return reject("unequip", tool, Rejection::NotEquipped);
    }
    state.equipment.unequip(category);
    state.add_amount(catalog, tool, 1.0)?;
    Ok(Outcome::Applied)
}
