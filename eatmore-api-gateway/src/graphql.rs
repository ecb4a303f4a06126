//! GraphQL query surface.
//!
//! Read-only: two root fields, no mutations or subscriptions. Both resolvers
//! pass straight through to the [`RestaurantStore`] handed to [`build_schema`].

use std::sync::Arc;

use async_graphql::extensions::Tracing;
use async_graphql::{EmptyMutation, EmptySubscription, Object, Result, Schema, SimpleObject};
use bigdecimal::BigDecimal;
use eatmore_restaurant_service::models;
use eatmore_restaurant_service::store::{Include, MenuGraph, RestaurantGraph, RestaurantStore};
use uuid::Uuid;

pub type EatMoreSchema = Schema<QueryRoot, EmptyMutation, EmptySubscription>;

/// Relations every restaurant query loads.
const RESTAURANT_INCLUDE: Include = Include::MenuItems;

#[derive(SimpleObject, Clone, Debug)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
    pub menus: Option<Vec<Menu>>,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct Menu {
    pub id: Uuid,
    pub name: String,
    /// Owning restaurant
    pub restaurant_id: Uuid,
    pub menu_items: Option<Vec<MenuItem>>,
}

#[derive(SimpleObject, Clone, Debug)]
pub struct MenuItem {
    pub id: Uuid,
    pub name: String,
    /// Decimal price, serialized as a string to keep its scale
    pub price: BigDecimal,
    pub description: Option<String>,
    /// Owning menu
    pub menu_id: Uuid,
}

impl From<RestaurantGraph> for Restaurant {
    fn from(graph: RestaurantGraph) -> Self {
        Self {
            id: graph.restaurant.id,
            name: graph.restaurant.name,
            menus: graph
                .menus
                .map(|menus| menus.into_iter().map(Menu::from).collect()),
        }
    }
}

impl From<MenuGraph> for Menu {
    fn from(graph: MenuGraph) -> Self {
        Self {
            id: graph.menu.id,
            name: graph.menu.name,
            restaurant_id: graph.menu.restaurant_id,
            menu_items: graph
                .menu_items
                .map(|items| items.into_iter().map(MenuItem::from).collect()),
        }
    }
}

impl From<models::MenuItem> for MenuItem {
    fn from(item: models::MenuItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            price: item.price,
            description: item.description,
            menu_id: item.menu_id,
        }
    }
}

pub struct QueryRoot {
    store: Arc<dyn RestaurantStore>,
}

impl QueryRoot {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }
}

#[Object]
impl QueryRoot {
    /// A single restaurant with its menus and menu items, or null if none matches.
    async fn restaurant(
        &self,
        #[graphql(desc = "The ID of the restaurant.")] id: Option<Uuid>,
    ) -> Result<Option<Restaurant>> {
        let restaurant = self.store.find_by_id(id, RESTAURANT_INCLUDE).await?;
        Ok(restaurant.map(Restaurant::from))
    }

    /// All restaurants with their menus and menu items.
    async fn restaurants(&self) -> Result<Vec<Restaurant>> {
        let restaurants = self.store.find_all(RESTAURANT_INCLUDE).await?;
        Ok(restaurants.into_iter().map(Restaurant::from).collect())
    }
}

pub fn build_schema(store: Arc<dyn RestaurantStore>) -> EatMoreSchema {
    Schema::build(QueryRoot::new(store), EmptyMutation, EmptySubscription)
        .extension(Tracing)
        .finish()
}
