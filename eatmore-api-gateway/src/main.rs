use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use eatmore_restaurant_service::seed;
use eatmore_restaurant_service::store::MemoryStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod graphql;
mod handlers;

use config::{Cli, Commands, Config};
use handlers::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(cli.config).await,
        Commands::Schema => {
            let schema = graphql::build_schema(Arc::new(MemoryStore::new()));
            println!("{}", schema.sdl());
            Ok(())
        }
    }
}

async fn serve(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let store = config.open_store().await?;

    if config.skip_seed {
        info!("Skipping sample data");
    } else {
        let report = store.seed(&seed::sample()).await?;
        if report.is_empty() {
            info!("Sample data already present");
        } else {
            info!(
                restaurants = report.restaurants,
                menus = report.menus,
                menu_items = report.menu_items,
                "Inserted sample data"
            );
        }
    }

    let app = handlers::router(AppState {
        schema: graphql::build_schema(store),
    });

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!(
        backend = ?config.store_backend,
        "EatMore GraphQL gateway listening on {}",
        listener.local_addr()?
    );

    axum::serve(listener, app).await?;

    Ok(())
}
