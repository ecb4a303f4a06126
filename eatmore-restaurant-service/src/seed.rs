//! Sample data inserted at startup.
//!
//! Ids are fixed so re-seeding an existing database inserts nothing.

use bigdecimal::BigDecimal;
use uuid::{uuid, Uuid};

use crate::models::{Menu, MenuItem, Restaurant};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Seed {
    pub restaurants: Vec<Restaurant>,
    pub menus: Vec<Menu>,
    pub menu_items: Vec<MenuItem>,
}

/// Number of rows actually inserted per table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub restaurants: usize,
    pub menus: usize,
    pub menu_items: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.restaurants == 0 && self.menus == 0 && self.menu_items == 0
    }
}

impl Seed {
    fn restaurant(&mut self, id: Uuid, name: &str) -> Uuid {
        self.restaurants.push(Restaurant {
            id,
            name: name.to_string(),
        });
        id
    }

    fn menu(&mut self, id: Uuid, restaurant_id: Uuid, name: &str) -> Uuid {
        self.menus.push(Menu {
            id,
            restaurant_id,
            name: name.to_string(),
        });
        id
    }

    fn menu_item(&mut self, id: Uuid, menu_id: Uuid, name: &str, cents: i64, description: &str) {
        self.menu_items.push(MenuItem {
            id,
            menu_id,
            name: name.to_string(),
            price: BigDecimal::new(cents.into(), 2),
            description: Some(description.to_string()),
        });
    }
}

pub fn sample() -> Seed {
    let mut seed = Seed::default();

    let trattoria = seed.restaurant(uuid!("6f1c2a9e-3b4d-4c8e-9a51-0d2e7b6f8a01"), "Trattoria Roma");
    let lunch = seed.menu(uuid!("a3d5e7f9-1b2c-4d6e-8f01-2a3b4c5d6e01"), trattoria, "Lunch");
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e501"),
        lunch,
        "Margherita",
        1150,
        "Tomato, mozzarella and basil",
    );
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e502"),
        lunch,
        "Minestrone",
        750,
        "Vegetable soup with pasta",
    );
    let dinner = seed.menu(uuid!("a3d5e7f9-1b2c-4d6e-8f01-2a3b4c5d6e02"), trattoria, "Dinner");
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e503"),
        dinner,
        "Osso Buco",
        2450,
        "Braised veal shank with gremolata",
    );
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e504"),
        dinner,
        "Tiramisu",
        850,
        "Espresso-soaked ladyfingers with mascarpone",
    );

    let sakura = seed.restaurant(uuid!("6f1c2a9e-3b4d-4c8e-9a51-0d2e7b6f8a02"), "Sakura House");
    let sushi = seed.menu(uuid!("a3d5e7f9-1b2c-4d6e-8f01-2a3b4c5d6e03"), sakura, "Sushi");
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e505"),
        sushi,
        "Salmon Nigiri",
        600,
        "Two pieces of fresh salmon over rice",
    );
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e506"),
        sushi,
        "Dragon Roll",
        1400,
        "Eel and cucumber topped with avocado",
    );
    let drinks = seed.menu(uuid!("a3d5e7f9-1b2c-4d6e-8f01-2a3b4c5d6e04"), sakura, "Drinks");
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e507"),
        drinks,
        "Green Tea",
        300,
        "Hot sencha",
    );

    let burger = seed.restaurant(uuid!("6f1c2a9e-3b4d-4c8e-9a51-0d2e7b6f8a03"), "Burger Barn");
    let mains = seed.menu(uuid!("a3d5e7f9-1b2c-4d6e-8f01-2a3b4c5d6e05"), burger, "Mains");
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e508"),
        mains,
        "Classic Burger",
        1299,
        "Beef patty, cheddar, pickles",
    );
    seed.menu_item(
        uuid!("c1e2f3a4-b5c6-4d7e-8f90-a1b2c3d4e509"),
        mains,
        "Fries",
        399,
        "Hand-cut, sea salt",
    );

    seed
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_sample_ids_are_unique() {
        let seed = sample();
        let ids: HashSet<Uuid> = seed
            .restaurants
            .iter()
            .map(|r| r.id)
            .chain(seed.menus.iter().map(|m| m.id))
            .chain(seed.menu_items.iter().map(|i| i.id))
            .collect();

        assert_eq!(
            ids.len(),
            seed.restaurants.len() + seed.menus.len() + seed.menu_items.len()
        );
    }

    #[test]
    fn test_sample_references_are_valid() {
        let seed = sample();
        let restaurant_ids: HashSet<Uuid> = seed.restaurants.iter().map(|r| r.id).collect();
        let menu_ids: HashSet<Uuid> = seed.menus.iter().map(|m| m.id).collect();

        assert!(seed
            .menus
            .iter()
            .all(|m| restaurant_ids.contains(&m.restaurant_id)));
        assert!(seed.menu_items.iter().all(|i| menu_ids.contains(&i.menu_id)));
    }

    #[test]
    fn test_sample_prices_keep_two_decimals() {
        let seed = sample();
        let margherita = seed
            .menu_items
            .iter()
            .find(|i| i.name == "Margherita")
            .unwrap();

        assert_eq!(margherita.price.to_string(), "11.50");
    }
}
