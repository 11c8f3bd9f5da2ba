use std::{collections::BTreeMap, time::Instant};

use tracing::trace;

use crate::{
    catalog::Catalog,
    config::SimulationConfig,
    error::GameResult,
    state::GameState,
    systems::{AutoSellSystem, GatheringSystem, PayrollSystem, WorkforceSystem},
    GOLD,
};

pub struct EngineBuilder {
    systems: Vec<Box<dyn System>>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
        }
    }

    pub fn with_system(mut self, system: impl System + 'static) -> Self {
        self.systems.push(Box::new(system));
        self
    }

    pub fn build(self) -> Engine {
        Engine {
            systems: self.systems,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the per-tick systems in registration order.
///
/// Systems read the state as it was when the tick began and write into a
/// working copy that replaces the live state only once every system has
/// finished. A failing system leaves the live state untouched.
pub struct Engine {
    systems: Vec<Box<dyn System>>,
}

impl Engine {
    /// Payroll, manual gathering, worker production, then auto-sell.
    pub fn standard() -> Self {
        EngineBuilder::new()
            .with_system(PayrollSystem::new())
            .with_system(GatheringSystem::new())
            .with_system(WorkforceSystem::new())
            .with_system(AutoSellSystem::new())
            .build()
    }

    pub fn tick(
        &mut self,
        state: &mut GameState,
        catalog: &Catalog,
        config: &SimulationConfig,
    ) -> GameResult<TickSummary> {
        let before: &GameState = state;
        let mut after = before.clone();
        after.tick += 1;
        let ctx = SystemContext {
            tick: after.tick,
            catalog,
            config,
        };

        let mut system_reports = Vec::with_capacity(self.systems.len());
        for system in &mut self.systems {
            let start = Instant::now();
            system.run(&ctx, before, &mut after)?;
            system_reports.push(SystemRunReport {
                name: system.name().to_string(),
                duration_ms: start.elapsed().as_secs_f64() * 1_000.0,
            });
        }

        let summary = TickSummary::between(before, &after, system_reports);
        trace!(tick = summary.tick, changes = summary.amount_changes.len(), "tick complete");
        *state = after;
        Ok(summary)
    }
}

pub struct SystemContext<'a> {
    pub tick: u64,
    pub catalog: &'a Catalog,
    pub config: &'a SimulationConfig,
}

pub trait System: Send {
    fn name(&self) -> &str;
    /// Reads `before`, writes `after`. Gold and material stocks are read
    /// from `after` so that spending within a tick is never counted twice.
    fn run(
        &mut self,
        ctx: &SystemContext<'_>,
        before: &GameState,
        after: &mut GameState,
    ) -> GameResult<()>;
}

#[derive(Clone, Debug)]
pub struct SystemRunReport {
    pub name: String,
    pub duration_ms: f64,
}

#[derive(Clone, Debug)]
pub struct TickSummary {
    pub tick: u64,
    pub gold_delta: f64,
    /// Net amount change for every resource that moved this tick.
    pub amount_changes: BTreeMap<String, f64>,
    pub system_reports: Vec<SystemRunReport>,
}

impl TickSummary {
    fn between(before: &GameState, after: &GameState, system_reports: Vec<SystemRunReport>) -> Self {
        let amount_changes = after
            .resources()
            .filter_map(|(key, res)| {
                let delta = res.amount - before.amount(key);
                (delta != 0.0).then(|| (key.to_string(), delta))
            })
            .collect();
        Self {
            tick: after.tick(),
            gold_delta: after.amount(GOLD) - before.amount(GOLD),
            amount_changes,
            system_reports,
        }
    }
}
