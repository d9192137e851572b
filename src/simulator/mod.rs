//! Balance simulator: many headless runs of the real engine with a bot
//! player, aggregated into a report.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{RunOutcome, RunStats, SimReport};
pub use runner::{bot_should_jump, run_simulation, simulate_single_run};
