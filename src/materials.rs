//! All-or-nothing material consumption.
//!
//! [`consume`] never touches the state it reads. It returns the amounts
//! every input would hold afterwards, or `None` when any input falls
//! short, and the caller commits the result with [`commit`].

use std::collections::BTreeMap;

use crate::{catalog::Catalog, catalog::MaterialCost, error::GameResult, state::GameState};

/// Post-consumption amounts keyed by resource.
pub type Consumption = BTreeMap<String, f64>;

/// Total required per resource. Duplicate entries add up.
fn requirements(materials: &[MaterialCost]) -> BTreeMap<&str, f64> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for material in materials {
        *totals.entry(material.resource.as_str()).or_insert(0.0) += material.quantity;
    }
    totals
}

pub fn available(state: &GameState, materials: &[MaterialCost]) -> bool {
    consume(state, materials).is_some()
}

pub fn consume(state: &GameState, materials: &[MaterialCost]) -> Option<Consumption> {
    requirements(materials)
        .into_iter()
        .map(|(key, needed)| {
            let remaining = state.amount(key) - needed;
            (remaining >= 0.0).then(|| (key.to_string(), remaining))
        })
        .collect()
}

pub fn commit(state: &mut GameState, catalog: &Catalog, consumption: Consumption) -> GameResult<()> {
    for (key, remaining) in consumption {
        state.set_amount(catalog, &key, remaining)?;
    }
    Ok(())
}

/// Consumes one batch per unit, up to `units`, stopping at the first
/// shortfall. Returns how many units were paid for.
pub fn consume_per_unit(
    state: &mut GameState,
    catalog: &Catalog,
    materials: &[MaterialCost],
    units: u32,
) -> GameResult<u32> {
    if materials.is_empty() {
        return Ok(units);
    }
    let mut paid = 0;
    while paid < units {
        match consume(state, materials) {
            Some(consumption) => {
                commit(state, catalog, consumption)?;
                paid += 1;
            }
            None => break,
        }
    }
    Ok(paid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stocked(catalog: &Catalog, wood: f64, stone: f64) -> GameState {
        let mut state = GameState::default();
        state.set_amount(catalog, "wood", wood).unwrap();
        state.set_amount(catalog, "stone", stone).unwrap();
        state
    }

    fn hatchet_materials() -> Vec<MaterialCost> {
        vec![MaterialCost::new("wood", 5.0), MaterialCost::new("stone", 2.0)]
    }

    #[test]
    fn partial_availability_consumes_nothing() {
        let catalog = Catalog::standard().unwrap();
        let state = stocked(&catalog, 10.0, 1.0);
        assert!(consume(&state, &hatchet_materials()).is_none());
        assert_eq!(state.amount("wood"), 10.0);
    }

    #[test]
    fn consumption_reports_remaining_amounts() {
        let catalog = Catalog::standard().unwrap();
        let state = stocked(&catalog, 10.0, 3.0);
        let consumption = consume(&state, &hatchet_materials()).unwrap();
        assert_eq!(consumption.get("wood"), Some(&5.0));
        assert_eq!(consumption.get("stone"), Some(&1.0));
    }

    #[test]
    fn duplicate_entries_are_summed() {
        let catalog = Catalog::standard().unwrap();
        let state = stocked(&catalog, 3.0, 0.0);
        let materials = vec![MaterialCost::new("wood", 2.0), MaterialCost::new("wood", 2.0)];
        assert!(consume(&state, &materials).is_none());
    }

    #[test]
    fn per_unit_consumption_stops_at_the_first_shortfall() {
        let catalog = Catalog::standard().unwrap();
        let mut state = stocked(&catalog, 12.0, 10.0);
        let paid = consume_per_unit(&mut state, &catalog, &hatchet_materials(), 4).unwrap();
        assert_eq!(paid, 2);
        assert_eq!(state.amount("wood"), 2.0);
        assert_eq!(state.amount("stone"), 6.0);
    }

    #[test]
    fn nothing_required_always_succeeds() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        assert_eq!(consume_per_unit(&mut state, &catalog, &[], 3).unwrap(), 3);
        assert!(available(&state, &[]));
    }
}
