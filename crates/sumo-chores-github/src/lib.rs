//! GitHub issue tracking for non-compliant monitors.
//!
//! Provides the retrying GitHub REST client, repository reference resolution,
//! issue title/body rendering, and the deduplicating issue filer used by the
//! monitor reconciliation.

pub mod github_api_client;
pub mod github_transport_helpers;
pub mod issue_deduplicator;
pub mod issue_filter;
pub mod issue_render;
pub mod repo_ref;

pub use github_api_client::{GithubApiClient, GithubIssue, DEFAULT_GITHUB_API_BASE};
pub use issue_deduplicator::{GithubIssueFiler, GithubIssueFilerConfig};
pub use issue_filter::COMPLIANCE_ISSUE_LABELS;
pub use repo_ref::RepoRef;
