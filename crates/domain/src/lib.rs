//! Domain layer for the restaurant service.
//!
//! This crate provides the ownership-scoped aggregate services:
//! - RestaurantService for restaurant lifecycle and authorization
//! - MenuItemService for menu items nested under a restaurant
//! - Representation types mapping records to externally-safe shapes
//!
//! Services are stateless; every operation re-reads the persistence
//! gateway so ownership decisions are never made on stale state.

pub mod error;
pub mod menu_item;
pub mod representation;
pub mod request;
pub mod restaurant;

pub use common::{MenuItemId, OwnerId, RestaurantId};
pub use error::DomainError;
pub use menu_item::MenuItemService;
pub use representation::{MenuItemResponse, RestaurantResponse};
pub use request::{MenuItemRequest, RestaurantRequest};
pub use restaurant::RestaurantService;
