//! Persistence gateway for the restaurant service.
//!
//! This crate owns all durable state. The [`RestaurantStore`] trait is
//! the only way the service layer touches records, and every mutating
//! operation is atomic within a single implementation call, so
//! check-then-act sequences cannot interleave across concurrent
//! requests.

pub mod error;
pub mod gateway;
pub mod memory;
pub mod postgres;
pub mod records;

pub use common::{MenuItemId, OwnerId, RestaurantId};
pub use error::{Result, StoreError};
pub use gateway::{OwnedWrite, RestaurantStore};
pub use memory::InMemoryRestaurantStore;
pub use postgres::PostgresRestaurantStore;
pub use records::{MenuItemChanges, MenuItemRecord, RestaurantChanges, RestaurantRecord};
