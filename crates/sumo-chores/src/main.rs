use anyhow::Result;
use clap::Parser;
use sumo_chores::{init_tracing, log_invocation_environment, run_chores};
use sumo_chores_cli::{build_run_config, AmbientEnvironment, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let ambient = AmbientEnvironment::from_process_env();
    log_invocation_environment(&ambient);
    let config = build_run_config(&cli, &ambient)?;
    let mut stdout = std::io::stdout();
    run_chores(&config, &mut stdout).await
}
