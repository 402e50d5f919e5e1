use clap::Args;

/// Parameters used to configure the store connection.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct DatabaseCliArgs {
    /// Postgres connection URI.
    #[arg(env = "CONVEYOR_DATABASE_URL", long, default_value = "postgres://localhost:5432/conveyor")]
    pub database_url: String,

    /// Maximum number of pooled store connections.
    #[arg(env = "CONVEYOR_DATABASE_POOL_SIZE", long, default_value = "10")]
    pub database_pool_size: u32,
}
