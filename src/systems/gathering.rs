use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    error::GameResult,
    materials,
    state::GameState,
    tools,
};

/// Advances player-started gathering and grants one unit on completion.
///
/// A finished cycle always ends the gathering attempt. When the inputs a
/// resource needs are gone by then, the cycle yields nothing.
pub struct GatheringSystem;

impl GatheringSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GatheringSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for GatheringSystem {
    fn name(&self) -> &str {
        "gathering"
    }

    fn run(
        &mut self,
        ctx: &SystemContext<'_>,
        before: &GameState,
        after: &mut GameState,
    ) -> GameResult<()> {
        for (key, res) in before.resources().filter(|(_, res)| res.is_gathering) {
            let bonus = tools::gather_bonus_percent(before, ctx.catalog.tools(), key);
            let progress = res.gather_progress + tools::boosted(ctx.config.gather_rate_per_tick, bonus);
            if progress < 100.0 {
                after.resource_mut(ctx.catalog, key)?.gather_progress = progress;
                continue;
            }

            let definition = ctx.catalog.resource(key)?;
            let produced = materials::consume_per_unit(after, ctx.catalog, &definition.materials, 1)?;
            if produced == 0 {
                debug!(resource = key, "gathering finished without materials");
            }
            let entry = after.resource_mut(ctx.catalog, key)?;
            entry.amount += f64::from(produced);
            entry.is_gathering = false;
            entry.gather_progress = 0.0;
        }
        Ok(())
    }
}
