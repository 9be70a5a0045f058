//! Core compliance model for Sumo Logic chores.
//!
//! Holds the run-scoped data model, the tag allowlist evaluator, monitor
//! reconciliation, and the GitHub Actions report emitter. Nothing in this crate
//! performs network I/O; fetchers and issue filers plug in from sibling crates.

pub mod allowlist;
pub mod models;
pub mod reconcile;
pub mod report;
pub mod service_url;

pub use allowlist::{evaluate, Allowlist, TagPartition};
pub use models::{
    ComplianceResult, IssueStatus, Monitor, RoleMembership, RoleRef, TrackingIssueRecord,
};
pub use reconcile::{find_violations, reconcile, IssueFiler, ReconcileOutcome};
pub use report::{
    emit_report, monitor_report_outputs, render_github_output, role_report_outputs, OutputTarget,
    ReportOutputs,
};
pub use service_url::{monitor_edit_url, service_host_for_endpoint, PLATFORM_DOMAIN};
