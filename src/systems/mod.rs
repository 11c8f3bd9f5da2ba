mod auto_sell;
mod gathering;
mod payroll;
mod workforce;

pub use auto_sell::AutoSellSystem;
pub use gathering::GatheringSystem;
pub use payroll::PayrollSystem;
pub use workforce::WorkforceSystem;
