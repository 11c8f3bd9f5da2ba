use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    error::GameResult,
    state::GameState,
    GOLD,
};

/// Pays worker salaries once every `salary_interval_ticks`.
///
/// Workers that cannot be paid stay idle until the next payday.
pub struct PayrollSystem;

impl PayrollSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PayrollSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl System for PayrollSystem {
    fn name(&self) -> &str {
        "payroll"
    }

    fn run(
        &mut self,
        ctx: &SystemContext<'_>,
        before: &GameState,
        after: &mut GameState,
    ) -> GameResult<()> {
        if ctx.tick % ctx.config.salary_interval_ticks != 0 {
            return Ok(());
        }
        for (key, res) in before.resources().filter(|(_, res)| res.workers > 0) {
            let salary = res.worker_salary;
            let mut gold = after.amount(GOLD);
            let paid = if salary <= 0.0 {
                res.workers
            } else if gold >= f64::from(res.workers) * salary {
                gold -= f64::from(res.workers) * salary;
                res.workers
            } else {
                let affordable = ((gold / salary).floor() as u32).min(res.workers);
                gold -= f64::from(affordable) * salary;
                debug!(resource = key, affordable, workers = res.workers, "payroll short");
                affordable
            };
            after.set_amount(ctx.catalog, GOLD, gold)?;
            after.resource_mut(ctx.catalog, key)?.paid_workers = paid;
        }
        Ok(())
    }
}
