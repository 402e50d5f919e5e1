use clap::{Parser, Subcommand};

pub mod database;
pub mod queue;
pub mod server;
pub mod service;

#[derive(Parser, Debug)]
#[command(
    name = "conveyor",
    about = "Conveyor - queue-mediated job ingestion and processing pipeline",
    long_about = "Conveyor accepts job submissions over HTTP, persists them in a relational store, \
    and processes them through a pool of broker-driven worker slots.\n\n\
    Quick Start:\n  \
    conveyor setup\n  \
    conveyor run"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the gateway and the worker pool
    #[command(long_about = "Start the pipeline service.\n\n\
        The store must be reachable and schema-initialized, and the broker reachable, \
        before this command will serve traffic. Run `conveyor setup` first.")]
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Setup the store schema and broker queues
    #[command(long_about = "Initialize infrastructure for the pipeline.\n\n\
        Ensures the jobs schema exists and creates the processing and dead-letter queues. \
        Idempotent; safe to run repeatedly.")]
    Setup {
        #[command(flatten)]
        setup_command: Box<SetupCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct RunCmd {
    #[clap(flatten)]
    pub database_args: database::DatabaseCliArgs,

    #[clap(flatten)]
    pub queue_args: queue::QueueCliArgs,

    #[clap(flatten)]
    pub server_args: server::ServerCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,
}

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct SetupCmd {
    #[clap(flatten)]
    pub database_args: database::DatabaseCliArgs,

    #[clap(flatten)]
    pub queue_args: queue::QueueCliArgs,
}
