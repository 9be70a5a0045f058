//! Monitor tag reconciliation against an allowlist, with optional issue filing.

use async_trait::async_trait;

use crate::allowlist::{evaluate, Allowlist};
use crate::models::{ComplianceResult, Monitor, TrackingIssueRecord};
use crate::service_url::{monitor_edit_url, service_host_for_endpoint};

#[async_trait]
/// Files or finds one tracking issue per violation.
///
/// Implementations contain their own failures: a violation whose tracker call
/// fails is logged and omitted from the returned records.
pub trait IssueFiler: Send + Sync {
    async fn file_or_find(&self, violations: &[ComplianceResult]) -> Vec<TrackingIssueRecord>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub violations: Vec<ComplianceResult>,
    pub issues: Vec<TrackingIssueRecord>,
}

/// Collect non-compliant monitors in inventory order.
pub fn find_violations(
    monitors: &[Monitor],
    allowlist: &Allowlist,
    service_host: &str,
) -> Vec<ComplianceResult> {
    let mut violations = Vec::new();
    for monitor in monitors {
        if monitor.tags.is_empty() {
            tracing::debug!(monitor = %monitor.name, "monitor has no tags");
            continue;
        }
        let partition = evaluate(&monitor.tags, allowlist);
        if partition.is_compliant() {
            continue;
        }
        tracing::warn!(
            monitor = %monitor.name,
            monitor_id = %monitor.id,
            non_compliant_tags = %join_tags(partition.non_compliant.iter()),
            "monitor has non-compliant tags"
        );
        violations.push(ComplianceResult {
            id: monitor.id.clone(),
            name: monitor.name.clone(),
            non_compliant_tags: partition.non_compliant,
            compliant_tags: partition.compliant,
            url: monitor_edit_url(service_host, &monitor.id),
        });
    }
    violations
}

pub async fn reconcile(
    monitors: &[Monitor],
    allowlist: &Allowlist,
    api_endpoint: &str,
    issue_filer: Option<&dyn IssueFiler>,
) -> ReconcileOutcome {
    let service_host = service_host_for_endpoint(api_endpoint);
    let violations = find_violations(monitors, allowlist, &service_host);

    let issues = match issue_filer {
        Some(filer) if !violations.is_empty() => {
            tracing::info!(
                violations = violations.len(),
                "filing tracking issues for non-compliant monitors"
            );
            filer.file_or_find(&violations).await
        }
        _ => Vec::new(),
    };

    ReconcileOutcome { violations, issues }
}

pub(crate) fn join_tags<'a>(tags: impl Iterator<Item = &'a String>) -> String {
    tags.map(String::as_str).collect::<Vec<_>>().join(", ")
}
