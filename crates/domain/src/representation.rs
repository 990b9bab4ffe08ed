//! Externally visible representations of persisted aggregates.
//!
//! Pure, side-effect-free mapping: the internal parent linkage is
//! flattened to a plain identifier and nothing storage-specific leaks
//! through.

use common::{MenuItemId, OwnerId, RestaurantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use store::{MenuItemRecord, RestaurantRecord};

/// Externally visible shape of a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemResponse {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
    pub restaurant_id: RestaurantId,
}

/// Externally visible shape of a restaurant, with its menu items
/// resolved and mapped. `menu_items` is always a list, never absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantResponse {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub owner_id: OwnerId,
    pub menu_items: Vec<MenuItemResponse>,
}

impl From<MenuItemRecord> for MenuItemResponse {
    fn from(record: MenuItemRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            available: record.available,
            restaurant_id: record.restaurant_id,
        }
    }
}

/// Maps a restaurant record and its already-fetched menu items into
/// the external shape.
pub fn restaurant_response(
    record: RestaurantRecord,
    menu_items: Vec<MenuItemRecord>,
) -> RestaurantResponse {
    RestaurantResponse {
        id: record.id,
        name: record.name,
        address: record.address,
        phone_number: record.phone_number,
        email: record.email,
        owner_id: record.owner_id,
        menu_items: menu_items.into_iter().map(MenuItemResponse::from).collect(),
    }
}
