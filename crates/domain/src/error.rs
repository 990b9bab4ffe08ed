//! Domain error types.

use common::{MenuItemId, RestaurantId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The restaurant does not exist. Raised only on public read
    /// paths, where revealing existence is safe.
    #[error("Restaurant not found with ID: {0}")]
    RestaurantNotFound(RestaurantId),

    /// Deliberately conflated signal for mutation paths: the
    /// restaurant is absent OR present but not owned by the caller.
    /// Never split into two distinguishable outcomes.
    #[error("Restaurant not found or not owned by you with ID: {0}")]
    RestaurantNotFoundOrNotOwned(RestaurantId),

    /// The menu item does not exist under the given restaurant.
    #[error("Menu item not found with ID: {item_id} for restaurant ID: {restaurant_id}")]
    MenuItemNotFound {
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    },

    /// An error occurred in the persistence gateway.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
