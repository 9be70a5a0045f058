//! Deduplicating issue filer: reuse an open tracking issue or file a new one.

use anyhow::Result;
use async_trait::async_trait;
use sumo_chores_core::{ComplianceResult, IssueFiler, IssueStatus, TrackingIssueRecord};

use crate::github_api_client::{GithubApiClient, GithubIssue};
use crate::issue_filter::{find_tracking_issue, COMPLIANCE_ISSUE_LABELS};
use crate::issue_render::{render_compliance_issue_body, render_compliance_issue_title};
use crate::repo_ref::RepoRef;

#[derive(Debug, Clone)]
pub struct GithubIssueFilerConfig {
    pub api_base: String,
    pub token: String,
    /// Already resolved against the ambient environment by the caller.
    pub repo: Option<RepoRef>,
    pub request_timeout_ms: u64,
    pub retry_max_attempts: usize,
    pub retry_base_delay_ms: u64,
}

#[derive(Clone)]
pub struct GithubIssueFiler {
    client: Option<GithubApiClient>,
}

impl GithubIssueFiler {
    pub fn new(config: GithubIssueFilerConfig) -> Result<Self> {
        let client = match config.repo {
            Some(repo) => Some(GithubApiClient::new(
                config.api_base,
                config.token,
                repo,
                config.request_timeout_ms,
                config.retry_max_attempts,
                config.retry_base_delay_ms,
            )?),
            None => None,
        };
        Ok(Self { client })
    }

    async fn file_or_find_one(
        client: &GithubApiClient,
        violation: &ComplianceResult,
    ) -> Result<TrackingIssueRecord> {
        let open_issues = client
            .list_open_issues_with_labels(&COMPLIANCE_ISSUE_LABELS)
            .await?;
        if let Some(existing) = find_tracking_issue(&open_issues, &violation.name) {
            tracing::info!(
                monitor = %violation.name,
                issue = existing.number,
                "issue already exists for monitor"
            );
            return Ok(tracking_record(existing, violation, IssueStatus::Existing));
        }

        let created = client
            .create_issue(
                &render_compliance_issue_title(&violation.name),
                &render_compliance_issue_body(violation),
                &COMPLIANCE_ISSUE_LABELS,
            )
            .await?;
        tracing::info!(
            monitor = %violation.name,
            issue = created.number,
            "created issue for monitor"
        );
        Ok(tracking_record(&created, violation, IssueStatus::Created))
    }
}

fn tracking_record(
    issue: &GithubIssue,
    violation: &ComplianceResult,
    status: IssueStatus,
) -> TrackingIssueRecord {
    TrackingIssueRecord {
        url: issue.html_url.clone(),
        number: issue.number,
        title: issue.title.clone(),
        monitor_id: violation.id.clone(),
        monitor_name: violation.name.clone(),
        status,
    }
}

#[async_trait]
impl IssueFiler for GithubIssueFiler {
    async fn file_or_find(&self, violations: &[ComplianceResult]) -> Vec<TrackingIssueRecord> {
        let Some(client) = self.client.as_ref() else {
            tracing::error!("repository information not available, skipping issue filing");
            return Vec::new();
        };

        if let Err(error) = client.get_repository().await {
            tracing::error!(
                repo = %client.repo().as_slug(),
                error = %format!("{error:#}"),
                "failed to access repository"
            );
            return Vec::new();
        }

        let mut records = Vec::with_capacity(violations.len());
        for violation in violations {
            match Self::file_or_find_one(client, violation).await {
                Ok(record) => records.push(record),
                Err(error) => tracing::error!(
                    monitor = %violation.name,
                    error = %format!("{error:#}"),
                    "failed to create issue for monitor"
                ),
            }
        }
        records
    }
}
