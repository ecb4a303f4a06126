use bigdecimal::BigDecimal;
use diesel::prelude::*;
use uuid::Uuid;

use crate::schema::{menu_items, menus, restaurants};

#[derive(Queryable, Selectable, Identifiable, Insertable, Clone, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: Uuid,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Clone, Debug, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(table_name = menus)]
pub struct Menu {
    pub id: Uuid,
    pub restaurant_id: Uuid,
    pub name: String,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Insertable, Clone, Debug, PartialEq)]
#[diesel(belongs_to(Menu))]
#[diesel(table_name = menu_items)]
pub struct MenuItem {
    pub id: Uuid,
    pub menu_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub description: Option<String>,
}
