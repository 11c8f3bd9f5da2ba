use tracing::debug;

use crate::{catalog::Catalog, error::GameResult, materials, state::GameState};

use super::{reject, Outcome, Rejection};

pub fn check_craft(state: &GameState, catalog: &Catalog, recipe_id: &str) -> GameResult<Outcome> {
    let recipe = catalog.recipe(recipe_id)?;
    if !materials::available(state, &recipe.ingredients) {
        return reject("craft", recipe_id, Rejection::MissingMaterials);
    }
    Ok(Outcome::Applied)
}

/// Consumes every ingredient and grants the result in one step.
pub fn craft(state: &mut GameState, catalog: &Catalog, recipe_id: &str) -> GameResult<Outcome> {
    let recipe = catalog.recipe(recipe_id)?;
    let Some(consumption) = materials::consume(state, &recipe.ingredients) else {
        return reject("craft", recipe_id, Rejection::MissingMaterials);
    };
    materials::commit(state, catalog, consumption)?;
    state.add_amount(catalog, &recipe.result.resource, recipe.result.quantity)?;
    debug!(recipe = recipe_id, result = %recipe.result.resource, "crafted");
    Ok(Outcome::Applied)
}
