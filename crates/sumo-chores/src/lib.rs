//! Entry-point wiring for the sumo-chores binary: tracing bootstrap, task
//! orchestration, run summaries and GitHub Actions output emission.

mod bootstrap_helpers;
mod chores_runtime;
mod run_summary;

pub use bootstrap_helpers::{init_tracing, log_invocation_environment};
pub use chores_runtime::{run_chores, run_monitor_tags, run_role_check, TaskOutcome};
