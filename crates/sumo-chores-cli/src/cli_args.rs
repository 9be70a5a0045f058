use clap::Parser;

use crate::CliRoleResolution;

fn parse_positive_usize(value: &str) -> Result<usize, String> {
    let parsed = value
        .parse::<usize>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

fn parse_positive_u64(value: &str) -> Result<u64, String> {
    let parsed = value
        .parse::<u64>()
        .map_err(|error| format!("failed to parse integer: {error}"))?;
    if parsed == 0 {
        return Err("value must be greater than 0".to_string());
    }
    Ok(parsed)
}

#[derive(Debug, Parser)]
#[command(
    name = "sumo-chores",
    about = "Sumo Logic administration chores: role membership and monitor tag compliance",
    version
)]
pub struct Cli {
    #[arg(
        long,
        env = "INPUT_TASKS",
        default_value = "all",
        help = "Comma-separated list of tasks to run (role-check, monitor-tags, all)"
    )]
    pub tasks: String,

    #[arg(
        long = "sumo-access-id",
        env = "INPUT_SUMO_ACCESS_ID",
        hide_env_values = true,
        help = "Sumo Logic access id"
    )]
    pub sumo_access_id: String,

    #[arg(
        long = "sumo-access-key",
        env = "INPUT_SUMO_ACCESS_KEY",
        hide_env_values = true,
        help = "Sumo Logic access key"
    )]
    pub sumo_access_key: String,

    #[arg(
        long = "role-id",
        env = "INPUT_ROLE_ID",
        help = "Role id to check for (required when role-check is selected)"
    )]
    pub role_id: Option<String>,

    #[arg(
        long = "tag-allowlist",
        env = "INPUT_TAG_ALLOWLIST",
        help = "Comma-separated allowed monitor tags (required when monitor-tags is selected)"
    )]
    pub tag_allowlist: Option<String>,

    #[arg(
        long = "sumo-api-endpoint",
        env = "INPUT_SUMO_API_ENDPOINT",
        default_value = sumo_chores_platform::DEFAULT_SUMO_API_ENDPOINT,
        help = "Sumo Logic API endpoint"
    )]
    pub sumo_api_endpoint: String,

    #[arg(
        long = "github-token",
        env = "INPUT_GITHUB_TOKEN",
        hide_env_values = true,
        help = "GitHub token; enables filing issues for non-compliant monitors"
    )]
    pub github_token: Option<String>,

    #[arg(
        long = "github-repo",
        env = "INPUT_GITHUB_REPO",
        help = "Repository for compliance issues in owner/repo form (defaults to GITHUB_REPOSITORY)"
    )]
    pub github_repo: Option<String>,

    #[arg(
        long = "github-api-base",
        env = "INPUT_GITHUB_API_BASE",
        default_value = sumo_chores_github::DEFAULT_GITHUB_API_BASE,
        help = "GitHub REST API base URL"
    )]
    pub github_api_base: String,

    #[arg(
        long = "role-resolution",
        env = "INPUT_ROLE_RESOLUTION",
        value_enum,
        default_value_t = CliRoleResolution::Auto,
        help = "How user roles are resolved: inline roleIds, a per-user roles call, or auto"
    )]
    pub role_resolution: CliRoleResolution,

    #[arg(
        long = "request-timeout-ms",
        env = "INPUT_REQUEST_TIMEOUT_MS",
        default_value_t = 30_000,
        value_parser = parse_positive_u64,
        help = "Timeout applied to every outbound HTTP request"
    )]
    pub request_timeout_ms: u64,

    #[arg(
        long = "role-lookup-concurrency",
        env = "INPUT_ROLE_LOOKUP_CONCURRENCY",
        default_value_t = 8,
        value_parser = parse_positive_usize,
        help = "Maximum in-flight per-user role lookups"
    )]
    pub role_lookup_concurrency: usize,

    #[arg(
        long = "github-retry-max-attempts",
        env = "INPUT_GITHUB_RETRY_MAX_ATTEMPTS",
        default_value_t = 3,
        value_parser = parse_positive_usize,
        help = "Attempts for retryable GitHub reads (issue creation is never retried)"
    )]
    pub github_retry_max_attempts: usize,

    #[arg(
        long = "github-retry-base-delay-ms",
        env = "INPUT_GITHUB_RETRY_BASE_DELAY_MS",
        default_value_t = 500,
        value_parser = parse_positive_u64,
        help = "Base backoff delay between GitHub retries"
    )]
    pub github_retry_base_delay_ms: u64,
}
