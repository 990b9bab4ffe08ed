use async_trait::async_trait;
use common::{MenuItemId, OwnerId, RestaurantId};

use crate::records::{MenuItemChanges, MenuItemRecord, RestaurantChanges, RestaurantRecord};
use crate::Result;

/// Outcome of a menu item mutation gated by parent ownership.
///
/// The two failure variants are produced in a fixed order: the parent
/// restaurant is resolved through the fused id+owner predicate before
/// the item's existence is even considered, so a caller who does not
/// own the restaurant never learns whether the item exists under it.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedWrite<T> {
    /// The parent predicate held and the write was applied.
    Applied(T),
    /// No restaurant with this id belongs to the caller. Absent and
    /// not-owned are deliberately indistinguishable.
    RestaurantMissing,
    /// The caller owns the restaurant but no such item exists under it.
    ItemMissing,
}

/// Core trait for the persistence gateway.
///
/// All implementations must be thread-safe (`Send + Sync`) and must
/// make each mutating method atomic: the embedded check-then-act
/// sequence runs inside a single transaction (or lock scope), so two
/// concurrent mutations of the same aggregate cannot interleave.
///
/// Methods taking both an id and an owner implement the fused
/// existence+ownership predicate: a single query parameterized by
/// both values, never two distinguishable checks.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Persists a new restaurant record.
    async fn insert_restaurant(&self, record: RestaurantRecord) -> Result<()>;

    /// Looks up a restaurant by id alone (public read path).
    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>>;

    /// Looks up a restaurant by the fused id+owner predicate.
    async fn find_restaurant_owned(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
    ) -> Result<Option<RestaurantRecord>>;

    /// Checks whether a restaurant exists, regardless of owner.
    async fn restaurant_exists(&self, id: RestaurantId) -> Result<bool>;

    /// Returns all restaurants.
    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>>;

    /// Returns the restaurants belonging to one owner.
    async fn list_restaurants_by_owner(&self, owner_id: OwnerId)
        -> Result<Vec<RestaurantRecord>>;

    /// Overwrites all mutable fields of a restaurant, gated by the
    /// fused predicate. Returns the updated record, or `None` when no
    /// restaurant matches both id and owner.
    async fn update_restaurant(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
        changes: RestaurantChanges,
    ) -> Result<Option<RestaurantRecord>>;

    /// Deletes a restaurant and, by cascade, all of its menu items,
    /// gated by the fused predicate. Returns `false` when no
    /// restaurant matches both id and owner.
    async fn delete_restaurant(&self, id: RestaurantId, owner_id: OwnerId) -> Result<bool>;

    /// Persists a new menu item after resolving its parent through the
    /// fused predicate. Returns `None` (and persists nothing) when the
    /// parent predicate fails.
    async fn insert_menu_item(
        &self,
        record: MenuItemRecord,
        owner_id: OwnerId,
    ) -> Result<Option<MenuItemRecord>>;

    /// Looks up a menu item scoped to its parent restaurant.
    async fn find_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    ) -> Result<Option<MenuItemRecord>>;

    /// Returns all menu items under one restaurant.
    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItemRecord>>;

    /// Overwrites all mutable fields of a menu item. Parent ownership
    /// is checked before item existence; see [`OwnedWrite`].
    async fn update_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
        changes: MenuItemChanges,
    ) -> Result<OwnedWrite<MenuItemRecord>>;

    /// Deletes a single menu item. Uses existence predicates rather
    /// than full fetches; same check ordering as
    /// [`update_menu_item`](Self::update_menu_item).
    async fn delete_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
    ) -> Result<OwnedWrite<()>>;
}
