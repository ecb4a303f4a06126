use std::collections::HashSet;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use super::{stitch, Include, RestaurantGraph, RestaurantStore, StoreError};
use crate::models::{Menu, MenuItem, Restaurant};
use crate::seed::{Seed, SeedReport};

#[derive(Default)]
struct Tables {
    restaurants: Vec<Restaurant>,
    menus: Vec<Menu>,
    menu_items: Vec<MenuItem>,
}

impl Tables {
    fn graphs(&self, restaurants: Vec<Restaurant>, include: Include) -> Vec<RestaurantGraph> {
        if !include.menus() {
            return stitch(restaurants, None, None);
        }

        let restaurant_ids: HashSet<Uuid> = restaurants.iter().map(|r| r.id).collect();
        let menus: Vec<Menu> = self
            .menus
            .iter()
            .filter(|m| restaurant_ids.contains(&m.restaurant_id))
            .cloned()
            .collect();

        let menu_items = include.menu_items().then(|| {
            let menu_ids: HashSet<Uuid> = menus.iter().map(|m| m.id).collect();
            self.menu_items
                .iter()
                .filter(|i| menu_ids.contains(&i.menu_id))
                .cloned()
                .collect()
        });

        stitch(restaurants, Some(menus), menu_items)
    }
}

/// Process-local store, rows kept in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert_missing<T: Clone>(
    table: &mut Vec<T>,
    rows: &[T],
    id: impl Fn(&T) -> Uuid,
) -> usize {
    let mut existing: HashSet<Uuid> = table.iter().map(&id).collect();
    let before = table.len();
    for row in rows {
        if existing.insert(id(row)) {
            table.push(row.clone());
        }
    }
    table.len() - before
}

/// Fails on the first row whose parent is neither stored nor part of `incoming`.
fn check_parents<P, C>(
    table: &'static str,
    stored: &[P],
    incoming: &[P],
    children: &[C],
    parent_id: impl Fn(&P) -> Uuid,
    child_ids: impl Fn(&C) -> (Uuid, Uuid),
) -> Result<(), StoreError> {
    let parents: HashSet<Uuid> = stored.iter().chain(incoming).map(parent_id).collect();
    match children
        .iter()
        .map(child_ids)
        .find(|(_, parent)| !parents.contains(parent))
    {
        Some((id, parent)) => Err(StoreError::MissingParent { table, id, parent }),
        None => Ok(()),
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    #[instrument(skip(self))]
    async fn find_by_id(
        &self,
        id: Option<Uuid>,
        include: Include,
    ) -> Result<Option<RestaurantGraph>, StoreError> {
        let Some(id) = id else {
            return Ok(None);
        };

        let tables = self.tables.read().await;
        let restaurant = tables.restaurants.iter().find(|r| r.id == id).cloned();

        Ok(restaurant.and_then(|r| tables.graphs(vec![r], include).pop()))
    }

    #[instrument(skip(self))]
    async fn find_all(&self, include: Include) -> Result<Vec<RestaurantGraph>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.graphs(tables.restaurants.clone(), include))
    }

    #[instrument(skip_all)]
    async fn seed(&self, seed: &Seed) -> Result<SeedReport, StoreError> {
        let mut tables = self.tables.write().await;

        // Nothing is written unless every reference resolves.
        check_parents(
            "menus",
            &tables.restaurants,
            &seed.restaurants,
            &seed.menus,
            |r| r.id,
            |m| (m.id, m.restaurant_id),
        )?;
        check_parents(
            "menu_items",
            &tables.menus,
            &seed.menus,
            &seed.menu_items,
            |m| m.id,
            |i| (i.id, i.menu_id),
        )?;

        Ok(SeedReport {
            restaurants: insert_missing(&mut tables.restaurants, &seed.restaurants, |r| r.id),
            menus: insert_missing(&mut tables.menus, &seed.menus, |m| m.id),
            menu_items: insert_missing(&mut tables.menu_items, &seed.menu_items, |i| i.id),
        })
    }
}
