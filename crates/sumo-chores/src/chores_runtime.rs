use std::io::Write;

use anyhow::{Context, Result};
use sumo_chores_cli::{ChoreTask, MonitorTagsConfig, RoleCheckConfig, RunConfig};
use sumo_chores_core::{
    emit_report, monitor_report_outputs, reconcile, role_report_outputs, IssueFiler,
    ReportOutputs,
};
use sumo_chores_github::GithubIssueFiler;
use sumo_chores_platform::{fetch_all_monitors, find_users_with_role, SumoClient};

use crate::run_summary::{log_monitor_summary, log_role_summary};

#[derive(Debug)]
pub struct TaskOutcome {
    pub task: ChoreTask,
    pub result: Result<ReportOutputs>,
}

pub async fn run_role_check(client: &SumoClient, config: &RoleCheckConfig) -> Result<ReportOutputs> {
    tracing::info!(
        role_id = %config.role_id,
        resolution = config.lookup.resolution.as_str(),
        "running role check task"
    );
    let memberships = find_users_with_role(client, &config.role_id, &config.lookup)
        .await
        .with_context(|| format!("failed to list users with role {}", config.role_id))?;
    log_role_summary(&config.role_id, &memberships);
    role_report_outputs(&memberships).context("failed to serialize role check outputs")
}

pub async fn run_monitor_tags(
    client: &SumoClient,
    config: &MonitorTagsConfig,
) -> Result<ReportOutputs> {
    tracing::info!(
        allowed_tags = config.allowlist.len(),
        issue_filing = config.issue_filing.is_some(),
        "running monitor tag validation task"
    );
    let monitors = fetch_all_monitors(client)
        .await
        .context("failed to fetch monitors")?;
    tracing::info!(monitors = monitors.len(), "fetched monitor inventory");

    let issue_filer = config
        .issue_filing
        .clone()
        .map(GithubIssueFiler::new)
        .transpose()
        .context("failed to configure github issue filing")?;
    let outcome = reconcile(
        &monitors,
        &config.allowlist,
        client.api_endpoint(),
        issue_filer.as_ref().map(|filer| filer as &dyn IssueFiler),
    )
    .await;
    log_monitor_summary(&outcome);
    monitor_report_outputs(&outcome).context("failed to serialize monitor tag outputs")
}

async fn run_selected_tasks(config: &RunConfig) -> Result<Vec<TaskOutcome>> {
    let client = SumoClient::new(config.sumo.clone()).context("failed to create sumo client")?;

    let role_check = async {
        match config.role_check.as_ref() {
            Some(role_config) => Some(TaskOutcome {
                task: ChoreTask::RoleCheck,
                result: run_role_check(&client, role_config).await,
            }),
            None => None,
        }
    };
    let monitor_tags = async {
        match config.monitor_tags.as_ref() {
            Some(tags_config) => Some(TaskOutcome {
                task: ChoreTask::MonitorTags,
                result: run_monitor_tags(&client, tags_config).await,
            }),
            None => None,
        }
    };
    let (role_check, monitor_tags) = tokio::join!(role_check, monitor_tags);
    Ok([role_check, monitor_tags].into_iter().flatten().collect())
}

/// Merge successful outputs in task order; return the first failure alongside.
fn merge_task_outcomes(outcomes: Vec<TaskOutcome>) -> (ReportOutputs, Option<anyhow::Error>) {
    let mut outputs = ReportOutputs::new();
    let mut first_failure = None;
    for outcome in outcomes {
        match outcome.result {
            Ok(task_outputs) => outputs.extend(task_outputs),
            Err(error) => {
                tracing::error!(
                    task = %outcome.task,
                    error = %format!("{error:#}"),
                    "task failed"
                );
                if first_failure.is_none() {
                    first_failure = Some(error.context(format!("{} task failed", outcome.task)));
                }
            }
        }
    }
    (outputs, first_failure)
}

pub async fn run_chores(config: &RunConfig, stdout: &mut dyn Write) -> Result<()> {
    let outcomes = run_selected_tasks(config).await?;
    let (outputs, first_failure) = merge_task_outcomes(outcomes);

    emit_report(&outputs, &config.output_target, stdout)
        .context("failed to write github actions outputs")?;

    if let Some(error) = first_failure {
        return Err(error);
    }
    tracing::info!("tasks completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{merge_task_outcomes, TaskOutcome};
    use anyhow::anyhow;
    use sumo_chores_cli::ChoreTask;
    use sumo_chores_core::ReportOutputs;

    fn outputs(pairs: &[(&str, &str)]) -> ReportOutputs {
        let mut outputs = ReportOutputs::new();
        for (key, value) in pairs {
            outputs.insert(*key, *value);
        }
        outputs
    }

    #[test]
    fn unit_merge_task_outcomes_keeps_role_then_monitor_order() {
        let (merged, failure) = merge_task_outcomes(vec![
            TaskOutcome {
                task: ChoreTask::RoleCheck,
                result: Ok(outputs(&[("users_with_role", "[]"), ("users_count", "0")])),
            },
            TaskOutcome {
                task: ChoreTask::MonitorTags,
                result: Ok(outputs(&[
                    ("non_compliant_monitors", "[]"),
                    ("non_compliant_count", "0"),
                ])),
            },
        ]);
        assert!(failure.is_none());
        let keys = merged.iter().map(|(key, _)| key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            vec![
                "users_with_role",
                "users_count",
                "non_compliant_monitors",
                "non_compliant_count"
            ]
        );
    }

    #[test]
    fn regression_merge_task_outcomes_keeps_successful_outputs_on_failure() {
        let (merged, failure) = merge_task_outcomes(vec![
            TaskOutcome {
                task: ChoreTask::RoleCheck,
                result: Err(anyhow!("status 401")),
            },
            TaskOutcome {
                task: ChoreTask::MonitorTags,
                result: Ok(outputs(&[("non_compliant_count", "0")])),
            },
        ]);
        assert_eq!(merged.get("non_compliant_count"), Some("0"));
        assert!(merged.get("users_count").is_none());
        let failure = failure.expect("failure");
        assert_eq!(failure.to_string(), "role-check task failed");
        assert!(format!("{failure:#}").contains("status 401"));
    }
}
