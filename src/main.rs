use clap::Parser as _;
use conveyor::cli::{Cli, Commands, RunCmd, SetupCmd};
use conveyor::core::config::Config;
use conveyor::server::setup_server;
use conveyor::setup::setup;
use conveyor::utils::logging::init_logging;
use conveyor::worker::initialize_worker;
use conveyor::{ConveyorError, ConveyorResult};
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting conveyor");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            if let Err(e) = run_conveyor(run_command).await {
                error!(error = %e, error_chain = ?e, "Failed to run pipeline service");
                std::process::exit(1);
            }
            info!("Pipeline service shut down cleanly");
        }
        Commands::Setup { setup_command } => {
            if let Err(e) = setup_conveyor(setup_command).await {
                error!(error = %e, error_chain = ?e, "Failed to setup pipeline resources");
                std::process::exit(1);
            }
            info!("Pipeline setup completed successfully");
        }
    }
}

async fn run_conveyor(run_cmd: &RunCmd) -> ConveyorResult<()> {
    let config = Arc::new(Config::from_run_cmd(run_cmd).await?);
    debug!("Configuration initialized");

    // Run the server in a separate tokio spawn task
    let (address, server_handle) = setup_server(config.clone()).await?;
    info!(%address, "Gateway listening");

    // Initialize workers and keep the controller for shutdown
    let worker_controller = initialize_worker(config.clone()).await?;

    tokio::signal::ctrl_c().await.map_err(ConveyorError::IoError)?;
    info!("Shutdown signal received");

    // Graceful shutdown: workers finish their in-flight deliveries first
    worker_controller.shutdown().await?;
    server_handle.shutdown().await.map_err(|e| ConveyorError::ServerError(e.to_string()))?;

    Ok(())
}

async fn setup_conveyor(setup_cmd: &SetupCmd) -> ConveyorResult<()> {
    setup(setup_cmd).await
}
