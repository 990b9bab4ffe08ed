//! HTTP route handlers.

pub mod events;
pub mod health;
pub mod menu_items;
pub mod metrics;
pub mod restaurants;
