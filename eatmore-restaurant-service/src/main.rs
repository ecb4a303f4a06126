use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use eatmore_restaurant_service::store::PgStore;
use eatmore_restaurant_service::{run_migrations, seed, RestaurantStore};

#[derive(Parser)]
#[command(version, about = "Database administration for the restaurant store")]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Migrate,
    /// Apply pending migrations, then insert the sample restaurants
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();
    run_migrations(&cli.database_url).await?;

    if let Commands::Seed = cli.command {
        let store = PgStore::connect(&cli.database_url, 1)?;
        let report = store.seed(&seed::sample()).await?;
        info!(?report, "Seeding complete");
    }

    Ok(())
}
