use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    error::GameResult,
    materials,
    state::GameState,
    tools,
};

/// Passive production by paid workers. Paid counts come from the state the
/// tick started with, so a payday takes effect from the following tick.
pub struct WorkforceSystem;

impl WorkforceSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WorkforceSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for WorkforceSystem {
    fn name(&self) -> &str {
        "workforce"
    }

    fn run(
        &mut self,
        ctx: &SystemContext<'_>,
        before: &GameState,
        after: &mut GameState,
    ) -> GameResult<()> {
        for (key, res) in before.resources().filter(|(_, res)| res.paid_workers > 0) {
            let paid = res.paid_workers;
            let bonus = tools::worker_bonus_percent(before, ctx.catalog.tools(), key);
            let per_worker = tools::boosted(ctx.config.worker_rate_per_tick, bonus);
            let progress = res.worker_progress + f64::from(paid) * per_worker;
            if progress < 100.0 {
                after.resource_mut(ctx.catalog, key)?.worker_progress = progress;
                continue;
            }

            let definition = ctx.catalog.resource(key)?;
            let produced = materials::consume_per_unit(
                after,
                ctx.catalog,
                &definition.materials,
                paid,
            )?;
            if produced < paid {
                debug!(resource = key, produced, workers = paid, "workers short of materials");
            }
            let entry = after.resource_mut(ctx.catalog, key)?;
            entry.amount += f64::from(produced);
            entry.worker_progress = 0.0;
        }
        Ok(())
    }
}
