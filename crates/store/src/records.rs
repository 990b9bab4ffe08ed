//! Persisted record shapes for both aggregates.

use common::{MenuItemId, OwnerId, RestaurantId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A persisted restaurant aggregate.
///
/// `owner_id` is bound at creation and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantRecord {
    pub id: RestaurantId,
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub owner_id: OwnerId,
}

/// A persisted menu item, always linked to exactly one restaurant.
///
/// `restaurant_id` is non-nullable and immutable; an item only exists
/// in the context of its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemRecord {
    pub id: MenuItemId,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
    pub restaurant_id: RestaurantId,
}

/// The mutable fields of a restaurant, overwritten atomically on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantChanges {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

/// The mutable fields of a menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemChanges {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
}

impl RestaurantRecord {
    /// Applies an overwrite of all mutable fields, leaving identity and
    /// ownership untouched.
    pub fn apply(&mut self, changes: RestaurantChanges) {
        self.name = changes.name;
        self.address = changes.address;
        self.phone_number = changes.phone_number;
        self.email = changes.email;
    }
}

impl MenuItemRecord {
    /// Applies an overwrite of all mutable fields, leaving identity and
    /// the parent link untouched.
    pub fn apply(&mut self, changes: MenuItemChanges) {
        self.name = changes.name;
        self.description = changes.description;
        self.price = changes.price;
        self.available = changes.available;
    }
}
