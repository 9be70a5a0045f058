use std::collections::BTreeSet;

use sumo_chores_core::{ReconcileOutcome, RoleMembership};

fn join_tags(tags: &BTreeSet<String>) -> String {
    tags.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

pub(crate) fn log_role_summary(role_id: &str, memberships: &[RoleMembership]) {
    if memberships.is_empty() {
        tracing::info!(role_id, "no users found with role");
        return;
    }
    tracing::info!(role_id, users = memberships.len(), "found users with role");
    for membership in memberships {
        let full_name = format!("{} {}", membership.first_name, membership.last_name);
        tracing::info!(
            email = %membership.email,
            name = %full_name.trim(),
            role = %membership.role.name,
            "user holds role"
        );
    }
}

pub(crate) fn log_monitor_summary(outcome: &ReconcileOutcome) {
    if outcome.violations.is_empty() {
        tracing::info!("all monitors have compliant tags");
        return;
    }
    tracing::warn!(
        monitors = outcome.violations.len(),
        "found monitors with non-compliant tags"
    );
    for violation in &outcome.violations {
        tracing::warn!(
            monitor = %violation.name,
            id = %violation.id,
            non_compliant = %join_tags(&violation.non_compliant_tags),
            url = %violation.url,
            "non-compliant monitor"
        );
    }
    for issue in &outcome.issues {
        tracing::info!(
            monitor = %issue.monitor_name,
            issue = issue.number,
            status = issue.status.as_str(),
            url = %issue.url,
            "tracking issue"
        );
    }
}
