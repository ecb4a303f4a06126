use async_trait::async_trait;
use diesel::associations::BelongsTo;
use diesel::prelude::*;
use diesel_async::pooled_connection::deadpool::{BuildError, PoolError};
use uuid::Uuid;

use crate::models::{Menu, MenuItem, Restaurant};
use crate::schema::menus;
use crate::seed::{Seed, SeedReport};

pub mod memory;
pub mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to build connection pool: {0}")]
    PoolBuild(#[from] BuildError),
    #[error("Failed to acquire database connection: {0}")]
    Pool(#[from] PoolError),
    #[error("Failed to connect to database: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("Database query failed: {0}")]
    Query(#[from] diesel::result::Error),
    #[error("Failed to run migrations: {0}")]
    Migration(String),
    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("{table} row {id} references missing parent {parent}")]
    MissingParent {
        table: &'static str,
        id: Uuid,
        parent: Uuid,
    },
}

/// Relations to load alongside each restaurant.
///
/// Levels are cumulative: `MenuItems` loads menus and their items.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Include {
    #[default]
    Nothing,
    Menus,
    MenuItems,
}

impl Include {
    pub fn menus(self) -> bool {
        self >= Include::Menus
    }

    pub fn menu_items(self) -> bool {
        self >= Include::MenuItems
    }
}

/// A restaurant with its eagerly loaded relations. `None` means not loaded.
#[derive(Clone, Debug, PartialEq)]
pub struct RestaurantGraph {
    pub restaurant: Restaurant,
    pub menus: Option<Vec<MenuGraph>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MenuGraph {
    pub menu: Menu,
    pub menu_items: Option<Vec<MenuItem>>,
}

impl BelongsTo<Restaurant> for MenuGraph {
    type ForeignKey = Uuid;
    type ForeignKeyColumn = menus::restaurant_id;

    fn foreign_key(&self) -> Option<&Uuid> {
        Some(&self.menu.restaurant_id)
    }

    fn foreign_key_column() -> Self::ForeignKeyColumn {
        menus::restaurant_id
    }
}

#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Looks up a single restaurant. A missing id or an unknown id yields `Ok(None)`.
    async fn find_by_id(
        &self,
        id: Option<Uuid>,
        include: Include,
    ) -> Result<Option<RestaurantGraph>, StoreError>;

    async fn find_all(&self, include: Include) -> Result<Vec<RestaurantGraph>, StoreError>;

    /// Inserts the rows of `seed` that are not present yet, keyed by id.
    async fn seed(&self, seed: &Seed) -> Result<SeedReport, StoreError>;
}

/// Assembles loaded rows into graphs, keeping the parent order.
///
/// `menus` and `menu_items` are `None` when that level was not loaded.
pub(crate) fn stitch(
    restaurants: Vec<Restaurant>,
    menus: Option<Vec<Menu>>,
    menu_items: Option<Vec<MenuItem>>,
) -> Vec<RestaurantGraph> {
    let Some(menus) = menus else {
        return restaurants
            .into_iter()
            .map(|restaurant| RestaurantGraph {
                restaurant,
                menus: None,
            })
            .collect();
    };

    let menu_graphs: Vec<MenuGraph> = match menu_items {
        Some(menu_items) => {
            let grouped = menu_items.grouped_by(&menus);
            menus
                .into_iter()
                .zip(grouped)
                .map(|(menu, menu_items)| MenuGraph {
                    menu,
                    menu_items: Some(menu_items),
                })
                .collect()
        }
        None => menus
            .into_iter()
            .map(|menu| MenuGraph {
                menu,
                menu_items: None,
            })
            .collect(),
    };

    let grouped = menu_graphs.grouped_by(&restaurants);
    restaurants
        .into_iter()
        .zip(grouped)
        .map(|(restaurant, menus)| RestaurantGraph {
            restaurant,
            menus: Some(menus),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use pretty_assertions::assert_eq;

    fn restaurant(name: &str) -> Restaurant {
        Restaurant {
            id: Uuid::new_v4(),
            name: name.to_string(),
        }
    }

    fn menu(restaurant: &Restaurant, name: &str) -> Menu {
        Menu {
            id: Uuid::new_v4(),
            restaurant_id: restaurant.id,
            name: name.to_string(),
        }
    }

    fn menu_item(menu: &Menu, name: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            menu_id: menu.id,
            name: name.to_string(),
            price: BigDecimal::new(cents.into(), 2),
            description: None,
        }
    }

    #[test]
    fn test_include_levels() {
        assert!(!Include::Nothing.menus());
        assert!(Include::Menus.menus());
        assert!(!Include::Menus.menu_items());
        assert!(Include::MenuItems.menus());
        assert!(Include::MenuItems.menu_items());
    }

    #[test]
    fn test_stitch_groups_children_under_their_parents() {
        let r1 = restaurant("Restaurant 1");
        let r2 = restaurant("Restaurant 2");
        let lunch = menu(&r1, "Lunch");
        let dinner = menu(&r2, "Dinner");
        let soup = menu_item(&lunch, "Soup", 450);
        let steak = menu_item(&dinner, "Steak", 2400);
        let salad = menu_item(&lunch, "Salad", 600);

        let graphs = stitch(
            vec![r1.clone(), r2.clone()],
            Some(vec![dinner.clone(), lunch.clone()]),
            Some(vec![soup.clone(), steak.clone(), salad.clone()]),
        );

        assert_eq!(
            graphs,
            vec![
                RestaurantGraph {
                    restaurant: r1,
                    menus: Some(vec![MenuGraph {
                        menu: lunch,
                        menu_items: Some(vec![soup, salad]),
                    }]),
                },
                RestaurantGraph {
                    restaurant: r2,
                    menus: Some(vec![MenuGraph {
                        menu: dinner,
                        menu_items: Some(vec![steak]),
                    }]),
                },
            ]
        );
    }

    #[test]
    fn test_stitch_keeps_childless_parents() {
        let r1 = restaurant("Empty");
        let graphs = stitch(vec![r1.clone()], Some(vec![]), Some(vec![]));

        assert_eq!(graphs.len(), 1);
        assert_eq!(graphs[0].menus, Some(vec![]));
    }

    #[test]
    fn test_stitch_leaves_unloaded_levels_empty() {
        let r1 = restaurant("Restaurant 1");
        let lunch = menu(&r1, "Lunch");

        let graphs = stitch(vec![r1.clone()], None, None);
        assert_eq!(graphs[0].menus, None);

        let graphs = stitch(vec![r1], Some(vec![lunch]), None);
        let menus = graphs[0].menus.as_ref().unwrap();
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].menu_items, None);
    }
}
