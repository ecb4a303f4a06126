use async_trait::async_trait;
use diesel::insert_into;
use diesel::prelude::*;
use diesel_async::pooled_connection::deadpool::Pool;
use diesel_async::pooled_connection::AsyncDieselConnectionManager;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::{stitch, Include, RestaurantGraph, RestaurantStore, StoreError};
use crate::models::{Menu, MenuItem, Restaurant};
use crate::schema::{menu_items, menus, restaurants};
use crate::seed::{Seed, SeedReport};

pub type PgPool = Pool<AsyncPgConnection>;

/// PostgreSQL-backed store. Every call checks a connection out of the pool
/// and hands it back when the call returns.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn connect(database_url: &str, max_size: usize) -> Result<Self, StoreError> {
        let manager = AsyncDieselConnectionManager::<AsyncPgConnection>::new(database_url);
        let pool = Pool::builder(manager).max_size(max_size).build()?;
        Ok(Self::new(pool))
    }
}

async fn load_relations(
    conn: &mut AsyncPgConnection,
    restaurants: Vec<Restaurant>,
    include: Include,
) -> Result<Vec<RestaurantGraph>, StoreError> {
    if !include.menus() {
        return Ok(stitch(restaurants, None, None));
    }

    let menus = Menu::belonging_to(&restaurants)
        .select(Menu::as_select())
        .load(conn)
        .await?;

    let menu_items = if include.menu_items() {
        Some(
            MenuItem::belonging_to(&menus)
                .select(MenuItem::as_select())
                .load(conn)
                .await?,
        )
    } else {
        None
    };

    debug!(
        restaurants = restaurants.len(),
        menus = menus.len(),
        menu_items = menu_items.as_ref().map(Vec::len),
        "Loaded restaurant relations"
    );

    Ok(stitch(restaurants, Some(menus), menu_items))
}

#[async_trait]
impl RestaurantStore for PgStore {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: Option<Uuid>,
        include: Include,
    ) -> Result<Option<RestaurantGraph>, StoreError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let mut conn = self.pool.get().await?;
        let conn = &mut *conn;

        let restaurant = restaurants::table
            .find(id)
            .select(Restaurant::as_select())
            .first(conn)
            .await
            .optional()?;

        match restaurant {
            Some(restaurant) => Ok(load_relations(conn, vec![restaurant], include)
                .await?
                .pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_all(&self, include: Include) -> Result<Vec<RestaurantGraph>, StoreError> {
        let mut conn = self.pool.get().await?;
        let conn = &mut *conn;

        let results = restaurants::table
            .select(Restaurant::as_select())
            .load(conn)
            .await?;

        load_relations(conn, results, include).await
    }

    #[instrument(skip_all)]
    async fn seed(&self, seed: &Seed) -> Result<SeedReport, StoreError> {
        let mut conn = self.pool.get().await?;

        let report = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                async move {
                    let restaurants = insert_into(restaurants::table)
                        .values(&seed.restaurants)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    let menus = insert_into(menus::table)
                        .values(&seed.menus)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;
                    let menu_items = insert_into(menu_items::table)
                        .values(&seed.menu_items)
                        .on_conflict_do_nothing()
                        .execute(conn)
                        .await?;

                    Ok(SeedReport {
                        restaurants,
                        menus,
                        menu_items,
                    })
                }
                .scope_boxed()
            })
            .await?;

        Ok(report)
    }
}
