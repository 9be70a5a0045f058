use crate::github_api_client::GithubIssue;

/// Labels applied to every compliance issue and required when looking them up.
pub const COMPLIANCE_ISSUE_LABELS: [&str; 3] = ["sumo-logic", "monitor-tags", "automated"];

/// Comma-joined label filter for the issues listing endpoint.
pub fn labels_query_value(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .collect::<Vec<_>>()
        .join(",")
}

/// An open issue tracks a monitor when its title contains the monitor name verbatim.
pub fn issue_tracks_monitor(issue_title: &str, monitor_name: &str) -> bool {
    issue_title.contains(monitor_name)
}

/// First issue, in tracker order, that already tracks the monitor.
pub fn find_tracking_issue<'a>(
    issues: &'a [GithubIssue],
    monitor_name: &str,
) -> Option<&'a GithubIssue> {
    issues
        .iter()
        .find(|issue| issue_tracks_monitor(&issue.title, monitor_name))
}
