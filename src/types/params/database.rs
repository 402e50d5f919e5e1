use crate::cli::database::DatabaseCliArgs;

/// Connection parameters for the store.
#[derive(Debug, Clone)]
pub struct DatabaseArgs {
    /// Postgres connection URI
    pub connection_uri: String,
    /// Maximum number of pooled connections
    pub pool_size: u32,
}

impl From<DatabaseCliArgs> for DatabaseArgs {
    fn from(args: DatabaseCliArgs) -> Self {
        Self { connection_uri: args.database_url, pool_size: args.database_pool_size }
    }
}
