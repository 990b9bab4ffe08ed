//! Shared types for the restaurant service.

pub mod types;

pub use types::{MenuItemId, OwnerId, RestaurantId};
