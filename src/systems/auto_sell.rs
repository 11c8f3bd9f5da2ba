use tracing::debug;

use crate::{
    engine::{System, SystemContext},
    error::GameResult,
    state::GameState,
    GOLD,
};

/// Sells stock above a resource's threshold once it clears a buffer.
///
/// The buffer is `max(1, floor(threshold × auto_sell_buffer_fraction))`;
/// without it a resource produced every tick would sell one unit per tick.
pub struct AutoSellSystem;

impl AutoSellSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AutoSellSystem {
    fn default() -> Self {
        Self::new()
    }
}

pub fn hysteresis_buffer(threshold: f64, fraction: f64) -> f64 {
    (threshold * fraction).floor().max(1.0)
}

impl System for AutoSellSystem {
    fn name(&self) -> &str {
        "auto_sell"
    }

    fn run(
        &mut self,
        ctx: &SystemContext<'_>,
        before: &GameState,
        after: &mut GameState,
    ) -> GameResult<()> {
        let policies = before
            .resources()
            .filter(|(_, res)| res.auto_sell_enabled && res.auto_sell_threshold > 0.0);
        for (key, res) in policies {
            let Some(price) = ctx.catalog.sell_price(key) else {
                continue;
            };
            let threshold = res.auto_sell_threshold;
            let amount = after.amount(key);
            let buffer = hysteresis_buffer(threshold, ctx.config.auto_sell_buffer_fraction);
            if amount <= threshold + buffer {
                continue;
            }
            let excess = amount - threshold;
            after.set_amount(ctx.catalog, key, threshold)?;
            after.add_amount(ctx.catalog, GOLD, excess * price)?;
            debug!(resource = key, sold = excess, price, "auto-sold excess");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_is_at_least_one_unit() {
        assert_eq!(hysteresis_buffer(100.0, 0.1), 10.0);
        assert_eq!(hysteresis_buffer(5.0, 0.1), 1.0);
        assert_eq!(hysteresis_buffer(19.0, 0.1), 1.0);
    }
}
