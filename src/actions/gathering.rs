use crate::{
    catalog::Catalog,
    error::GameResult,
    materials,
    state::GameState,
};

use super::{reject, Outcome, Rejection};

pub fn check_start_gathering(state: &GameState, catalog: &Catalog, key: &str) -> GameResult<Outcome> {
    let definition = catalog.resource(key)?;
    if !definition.gatherable {
        return reject("gather", key, Rejection::NotGatherable);
    }
    if state.resource(key).is_some_and(|res| res.is_gathering) {
        return reject("gather", key, Rejection::AlreadyGathering);
    }
    if !materials::available(state, &definition.materials) {
        return reject("gather", key, Rejection::MissingMaterials);
    }
    Ok(Outcome::Applied)
}

/// Begins a gathering cycle. Materials are only checked here; they are
/// consumed when the cycle completes.
pub fn start_gathering(state: &mut GameState, catalog: &Catalog, key: &str) -> GameResult<Outcome> {
    let outcome = check_start_gathering(state, catalog, key)?;
    if outcome.is_applied() {
        let res = state.resource_mut(catalog, key)?;
        res.is_gathering = true;
        res.gather_progress = 0.0;
    }
    Ok(outcome)
}
