//! Player-facing mutations.
//!
//! Every action checks all of its preconditions before touching state. An
//! unmet precondition is reported as [`Outcome::Rejected`] and leaves the
//! state exactly as it was; errors are reserved for unknown keys and ids.

pub mod crafting;
pub mod equipment;
pub mod gathering;
pub mod housing;
pub mod market;

use serde::Serialize;
use tracing::debug;

use crate::error::GameResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    InsufficientGold,
    InsufficientAmount,
    MissingMaterials,
    AlreadyGathering,
    NotGatherable,
    NotHireable,
    NotSellable,
    NothingToSell,
    NotOwned,
    NotEquipped,
    InsufficientBuildMaterials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Rejected(Rejection),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}

pub(crate) fn reject(action: &str, subject: &str, reason: Rejection) -> GameResult<Outcome> {
    debug!(action, subject, ?reason, "action rejected");
    Ok(Outcome::Rejected(reason))
}
