//! Wire shape of the inbound order-placed notification.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line item of a placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDetails {
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub quantity: u32,
    pub price: Decimal,
}

/// Notification published by the order service when an order is
/// placed. Field names follow the producer's camelCase JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedEvent {
    pub order_id: String,
    pub user_email: String,
    pub restaurant_id: String,
    pub restaurant_name: String,
    pub total_amount: Decimal,
    pub delivery_address: String,
    pub order_date: NaiveDateTime,
    pub order_items: Vec<OrderItemDetails>,
}
