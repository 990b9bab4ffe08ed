//! Validated command shapes handed in by the boundary layer.
//!
//! The boundary is responsible for field validation; by the time one
//! of these reaches a service it is assumed well-formed. The caller's
//! identity is never part of the body; it travels separately.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Creation/update payload for a restaurant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRequest {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

/// Creation/update payload for a menu item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub available: bool,
}
