//! Tool bonuses derived from equipment and inventory.

use crate::{catalog::ToolTables, state::GameState};

/// Bonus from the tools the character has equipped. When tools in several
/// categories help the same resource the largest bonus wins.
pub fn gather_bonus_percent(state: &GameState, tools: &ToolTables, resource: &str) -> f64 {
    state
        .equipment()
        .iter()
        .filter(|(_, tool)| tools.is_effective(tool, resource))
        .map(|(_, tool)| tools.bonus_percent(tool))
        .fold(0.0, f64::max)
}

/// Bonus available to workers. Workers draw from the shared inventory, so
/// any unit of an effective tool held there counts; an equipped tool does
/// not.
pub fn worker_bonus_percent(state: &GameState, tools: &ToolTables, resource: &str) -> f64 {
    tools
        .tools_for(resource)
        .filter(|tool| state.amount(tool) > 0.0)
        .map(|tool| tools.bonus_percent(tool))
        .fold(0.0, f64::max)
}

/// `base × (1 + bonus / 100)`.
pub fn boosted(base: f64, bonus_percent: f64) -> f64 {
    base * (1.0 + bonus_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn equipped_tool_boosts_only_its_targets() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        state.equipment.equip("cutting", "hatchet");
        assert_eq!(gather_bonus_percent(&state, catalog.tools(), "wood"), 50.0);
        assert_eq!(gather_bonus_percent(&state, catalog.tools(), "stone"), 0.0);
    }

    #[test]
    fn workers_need_ownership_not_equipment() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        assert_eq!(worker_bonus_percent(&state, catalog.tools(), "stone"), 0.0);
        state.set_amount(&catalog, "pickaxe", 1.0).unwrap();
        assert_eq!(worker_bonus_percent(&state, catalog.tools(), "stone"), 50.0);
        assert_eq!(gather_bonus_percent(&state, catalog.tools(), "stone"), 0.0);
    }

    #[test]
    fn equipped_only_unit_gives_workers_nothing() {
        let catalog = Catalog::standard().unwrap();
        let mut state = GameState::default();
        state.equipment.equip("cutting", "hatchet");
        assert_eq!(worker_bonus_percent(&state, catalog.tools(), "wood"), 0.0);
        state.set_amount(&catalog, "hatchet", 1.0).unwrap();
        assert_eq!(worker_bonus_percent(&state, catalog.tools(), "wood"), 50.0);
    }

    #[test]
    fn boost_scales_the_base_rate() {
        assert_eq!(boosted(2.0, 0.0), 2.0);
        assert_eq!(boosted(2.0, 50.0), 3.0);
    }
}
