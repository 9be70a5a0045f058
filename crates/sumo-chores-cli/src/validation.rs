use sumo_chores_core::{Allowlist, OutputTarget};
use sumo_chores_github::{GithubIssueFilerConfig, RepoRef};
use sumo_chores_platform::{RoleLookupOptions, SumoClientConfig};
use thiserror::Error;

use crate::{Cli, TaskSelection};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown task '{name}' (expected role-check, monitor-tags or all)")]
    UnknownTask { name: String },
    #[error("no tasks selected")]
    NoTasks,
    #[error("sumo access id and access key are required")]
    MissingCredentials,
    #[error("role_id is required for the role-check task")]
    MissingRoleId,
    #[error("tag_allowlist is required for the monitor-tags task")]
    MissingTagAllowlist,
}

/// Process environment read once at entry so validation stays deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmbientEnvironment {
    pub github_actions: Option<String>,
    pub github_output: Option<String>,
    pub github_repository: Option<String>,
}

impl AmbientEnvironment {
    pub fn from_process_env() -> Self {
        Self {
            github_actions: std::env::var("GITHUB_ACTIONS").ok(),
            github_output: std::env::var("GITHUB_OUTPUT").ok(),
            github_repository: std::env::var("GITHUB_REPOSITORY").ok(),
        }
    }

    pub fn is_github_actions(&self) -> bool {
        self.github_actions.as_deref() == Some("true")
    }
}

#[derive(Debug, Clone)]
pub struct RoleCheckConfig {
    pub role_id: String,
    pub lookup: RoleLookupOptions,
}

#[derive(Debug, Clone)]
pub struct MonitorTagsConfig {
    pub allowlist: Allowlist,
    /// `None` when no GitHub token was supplied.
    pub issue_filing: Option<GithubIssueFilerConfig>,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub tasks: TaskSelection,
    pub sumo: SumoClientConfig,
    pub role_check: Option<RoleCheckConfig>,
    pub monitor_tags: Option<MonitorTagsConfig>,
    pub output_target: OutputTarget,
}

// GitHub Actions passes unset inputs as empty strings.
fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|raw| raw.trim()).filter(|raw| !raw.is_empty())
}

/// A repository that cannot be parsed disables issue filing only.
fn resolve_issue_repository(cli: &Cli, ambient: &AmbientEnvironment) -> Option<RepoRef> {
    let explicit = non_blank(cli.github_repo.as_ref());
    match RepoRef::resolve(explicit, ambient.github_repository.as_deref()) {
        Ok(repo) => repo,
        Err(error) => {
            tracing::error!(
                repo = explicit.unwrap_or_default(),
                error = %error,
                "invalid github repository, issue filing disabled"
            );
            None
        }
    }
}

pub fn build_run_config(cli: &Cli, ambient: &AmbientEnvironment) -> Result<RunConfig, ConfigError> {
    let tasks = TaskSelection::parse(&cli.tasks)?;

    let access_id = cli.sumo_access_id.trim();
    let access_key = cli.sumo_access_key.trim();
    if access_id.is_empty() || access_key.is_empty() {
        return Err(ConfigError::MissingCredentials);
    }
    let sumo = SumoClientConfig {
        api_endpoint: cli.sumo_api_endpoint.trim().to_string(),
        access_id: access_id.to_string(),
        access_key: access_key.to_string(),
        request_timeout_ms: cli.request_timeout_ms,
    };

    let role_check = if tasks.role_check {
        let role_id = non_blank(cli.role_id.as_ref()).ok_or(ConfigError::MissingRoleId)?;
        Some(RoleCheckConfig {
            role_id: role_id.to_string(),
            lookup: RoleLookupOptions {
                resolution: cli.role_resolution.into(),
                concurrency: cli.role_lookup_concurrency,
            },
        })
    } else {
        None
    };

    let monitor_tags = if tasks.monitor_tags {
        let raw_allowlist =
            non_blank(cli.tag_allowlist.as_ref()).ok_or(ConfigError::MissingTagAllowlist)?;
        let allowlist = Allowlist::parse(raw_allowlist);
        if allowlist.is_empty() {
            return Err(ConfigError::MissingTagAllowlist);
        }
        let issue_filing =
            non_blank(cli.github_token.as_ref()).map(|token| GithubIssueFilerConfig {
                api_base: cli.github_api_base.trim().to_string(),
                token: token.to_string(),
                repo: resolve_issue_repository(cli, ambient),
                request_timeout_ms: cli.request_timeout_ms,
                retry_max_attempts: cli.github_retry_max_attempts,
                retry_base_delay_ms: cli.github_retry_base_delay_ms,
            });
        Some(MonitorTagsConfig {
            allowlist,
            issue_filing,
        })
    } else {
        None
    };

    Ok(RunConfig {
        tasks,
        sumo,
        role_check,
        monitor_tags,
        output_target: OutputTarget::resolve(
            ambient.github_actions.as_deref(),
            ambient.github_output.as_deref(),
        ),
    })
}
