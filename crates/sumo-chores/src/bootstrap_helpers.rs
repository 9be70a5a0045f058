use sumo_chores_cli::AmbientEnvironment;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries legacy `::set-output` commands.
pub fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

pub fn log_invocation_environment(ambient: &AmbientEnvironment) {
    if ambient.is_github_actions() {
        tracing::info!("running in GitHub Actions environment");
    } else {
        tracing::info!("running in local environment");
    }
}
