use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use eatmore_restaurant_service::store::{MemoryStore, PgStore};
use eatmore_restaurant_service::{run_migrations, RestaurantStore};

use crate::error::StartupError;

#[derive(Parser, Debug)]
#[command(version, about = "GraphQL gateway for the EatMore restaurant catalogue")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub config: Config,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Print the GraphQL schema in SDL form
    Schema,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Args, Debug, Clone)]
pub struct Config {
    #[arg(long, env = "LISTEN_ADDR", default_value = "0.0.0.0:8100")]
    pub listen_addr: SocketAddr,

    #[arg(long = "store", env = "STORE_BACKEND", value_enum, default_value_t = StoreBackend::Postgres)]
    pub store_backend: StoreBackend,

    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    #[arg(long, env = "DATABASE_POOL_SIZE", default_value_t = 8)]
    pub pool_size: usize,

    /// Do not insert the sample restaurants on startup
    #[arg(long, env = "SKIP_SEED")]
    pub skip_seed: bool,
}

impl Config {
    /// Opens the configured store. For postgres, pending migrations run first.
    pub async fn open_store(&self) -> Result<Arc<dyn RestaurantStore>, StartupError> {
        match self.store_backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Postgres => {
                let database_url = self
                    .database_url
                    .as_deref()
                    .ok_or(StartupError::MissingDatabaseUrl)?;
                run_migrations(database_url).await?;
                Ok(Arc::new(PgStore::connect(database_url, self.pool_size)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_backend() {
        let cli = Cli::try_parse_from([
            "eatmore-api-gateway",
            "--store",
            "memory",
            "--listen-addr",
            "127.0.0.1:9000",
            "--skip-seed",
            "schema",
        ])
        .unwrap();

        assert_eq!(cli.command, Some(Commands::Schema));
        assert_eq!(cli.config.store_backend, StoreBackend::Memory);
        assert_eq!(cli.config.listen_addr, "127.0.0.1:9000".parse::<SocketAddr>().unwrap());
        assert!(cli.config.skip_seed);
    }

    #[test]
    fn test_rejects_unknown_backend() {
        let result = Cli::try_parse_from(["eatmore-api-gateway", "--store", "sqlite"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_postgres_requires_database_url() {
        let config = Config {
            listen_addr: "127.0.0.1:0".parse().unwrap(),
            store_backend: StoreBackend::Postgres,
            database_url: None,
            pool_size: 1,
            skip_seed: true,
        };

        let result = config.open_store().await;
        assert!(matches!(result, Err(StartupError::MissingDatabaseUrl)));
    }
}
