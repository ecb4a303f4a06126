use diesel::Connection;
use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_async::AsyncPgConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod models;
pub mod schema;
pub mod seed;
pub mod store;

pub use store::{Include, RestaurantStore, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Applies pending migrations and returns how many ran.
///
/// The migration harness is synchronous, so it runs on the blocking pool.
pub async fn run_migrations(database_url: &str) -> Result<usize, StoreError> {
    let database_url = database_url.to_string();

    let applied = tokio::task::spawn_blocking(move || {
        let mut conn = AsyncConnectionWrapper::<AsyncPgConnection>::establish(&database_url)?;
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.len())
            .map_err(|e| StoreError::Migration(e.to_string()))
    })
    .await??;

    info!(applied, "Database migrations complete");
    Ok(applied)
}
