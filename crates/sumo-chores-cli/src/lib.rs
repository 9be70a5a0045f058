//! CLI argument models and run-configuration validation for sumo-chores.
//!
//! Exposes the clap-backed `Cli`, task selection parsing, and the checks that
//! turn raw flags plus the ambient GitHub Actions environment into a typed
//! `RunConfig` before any network call is made.

pub mod cli_args;
pub mod cli_types;
pub mod task_selection;
pub mod validation;

pub use cli_args::Cli;
pub use cli_types::*;
pub use task_selection::*;
pub use validation::*;
