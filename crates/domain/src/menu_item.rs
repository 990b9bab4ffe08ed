//! Menu item aggregate service.
//!
//! Menu items exist only within the scope of a parent restaurant, and
//! every mutation validates ownership of the parent before the item's
//! existence is considered: a non-owner never learns whether a given
//! item ID exists under someone else's restaurant.

use common::{MenuItemId, OwnerId, RestaurantId};
use store::{MenuItemChanges, MenuItemRecord, OwnedWrite, RestaurantStore};

use crate::error::DomainError;
use crate::representation::MenuItemResponse;
use crate::request::MenuItemRequest;

/// Service for managing menu items under a restaurant.
pub struct MenuItemService<S: RestaurantStore> {
    store: S,
}

impl<S: RestaurantStore> MenuItemService<S> {
    /// Creates a new menu item service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a menu item under a restaurant the caller owns.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        restaurant_id: RestaurantId,
        request: MenuItemRequest,
        owner_id: OwnerId,
    ) -> Result<MenuItemResponse, DomainError> {
        tracing::info!(%restaurant_id, %owner_id, "creating menu item");

        let record = MenuItemRecord {
            id: MenuItemId::new(),
            name: request.name,
            description: request.description,
            price: request.price,
            available: request.available,
            restaurant_id,
        };
        let record = self
            .store
            .insert_menu_item(record, owner_id)
            .await?
            .ok_or(DomainError::RestaurantNotFoundOrNotOwned(restaurant_id))?;
        metrics::counter!("menu_items_created").increment(1);

        tracing::info!(menu_item_id = %record.id, %restaurant_id, "menu item created");
        Ok(record.into())
    }

    /// Loads a menu item scoped to its parent restaurant. No ownership
    /// check: reads are public to authenticated callers.
    #[tracing::instrument(skip(self))]
    pub async fn get(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    ) -> Result<MenuItemResponse, DomainError> {
        let record = self
            .store
            .find_menu_item(restaurant_id, item_id)
            .await?
            .ok_or(DomainError::MenuItemNotFound {
                restaurant_id,
                item_id,
            })?;

        Ok(record.into())
    }

    /// Returns all menu items under a restaurant; the restaurant itself
    /// must exist (plain existence check, reads are public).
    #[tracing::instrument(skip(self))]
    pub async fn list_by_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<MenuItemResponse>, DomainError> {
        if !self.store.restaurant_exists(restaurant_id).await? {
            return Err(DomainError::RestaurantNotFound(restaurant_id));
        }

        let records = self.store.list_menu_items(restaurant_id).await?;
        Ok(records.into_iter().map(MenuItemResponse::from).collect())
    }

    /// Overwrites all mutable fields of a menu item under a restaurant
    /// the caller owns.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        request: MenuItemRequest,
        owner_id: OwnerId,
    ) -> Result<MenuItemResponse, DomainError> {
        tracing::info!(%restaurant_id, %item_id, %owner_id, "updating menu item");

        let changes = MenuItemChanges {
            name: request.name,
            description: request.description,
            price: request.price,
            available: request.available,
        };
        let outcome = self
            .store
            .update_menu_item(restaurant_id, item_id, owner_id, changes)
            .await?;

        match outcome {
            OwnedWrite::Applied(record) => {
                metrics::counter!("menu_items_updated").increment(1);
                tracing::info!(%item_id, "menu item updated");
                Ok(record.into())
            }
            OwnedWrite::RestaurantMissing => {
                Err(DomainError::RestaurantNotFoundOrNotOwned(restaurant_id))
            }
            OwnedWrite::ItemMissing => Err(DomainError::MenuItemNotFound {
                restaurant_id,
                item_id,
            }),
        }
    }

    /// Deletes a menu item under a restaurant the caller owns.
    #[tracing::instrument(skip(self))]
    pub async fn delete(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
    ) -> Result<(), DomainError> {
        tracing::info!(%restaurant_id, %item_id, %owner_id, "deleting menu item");

        let outcome = self
            .store
            .delete_menu_item(restaurant_id, item_id, owner_id)
            .await?;

        match outcome {
            OwnedWrite::Applied(()) => {
                metrics::counter!("menu_items_deleted").increment(1);
                tracing::info!(%item_id, "menu item deleted");
                Ok(())
            }
            OwnedWrite::RestaurantMissing => {
                Err(DomainError::RestaurantNotFoundOrNotOwned(restaurant_id))
            }
            OwnedWrite::ItemMissing => Err(DomainError::MenuItemNotFound {
                restaurant_id,
                item_id,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use store::InMemoryRestaurantStore;

    use crate::request::RestaurantRequest;
    use crate::restaurant::RestaurantService;

    use super::*;

    fn item_request() -> MenuItemRequest {
        MenuItemRequest {
            name: "Margherita".to_string(),
            description: Some("Tomato and mozzarella".to_string()),
            price: Decimal::new(1250, 2),
            available: true,
        }
    }

    async fn seed_restaurant(store: &InMemoryRestaurantStore, owner: OwnerId) -> RestaurantId {
        let restaurants = RestaurantService::new(store.clone());
        restaurants
            .create(
                RestaurantRequest {
                    name: "Test Restaurant".to_string(),
                    address: "123 Test St".to_string(),
                    phone_number: "+1234567890".to_string(),
                    email: "test@restaurant.com".to_string(),
                },
                owner,
            )
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields_exactly() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);

        let created = service
            .create(restaurant_id, item_request(), owner)
            .await
            .unwrap();
        let fetched = service.get(restaurant_id, created.id).await.unwrap();

        assert_eq!(fetched, created);
        // Exact decimal equality, not floating approximation.
        assert_eq!(fetched.price, Decimal::new(1250, 2));
    }

    #[tokio::test]
    async fn create_for_foreign_restaurant_fails_without_side_effect() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);

        let err = service
            .create(restaurant_id, item_request(), OwnerId::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RestaurantNotFoundOrNotOwned(_)
        ));

        // No item was persisted.
        let items = service.list_by_restaurant(restaurant_id).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn list_for_unknown_restaurant_is_not_found() {
        let service = MenuItemService::new(InMemoryRestaurantStore::new());

        let err = service
            .list_by_restaurant(RestaurantId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RestaurantNotFound(_)));
    }

    #[tokio::test]
    async fn list_returns_empty_for_restaurant_without_items() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);

        let items = service.list_by_restaurant(restaurant_id).await.unwrap();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn update_checks_parent_ownership_before_item_existence() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);

        // Non-owner gets the conflated error even for a nonexistent
        // item: item existence is never evaluated for them.
        let err = service
            .update(
                restaurant_id,
                MenuItemId::new(),
                item_request(),
                OwnerId::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RestaurantNotFoundOrNotOwned(_)
        ));

        // The owner gets the distinct item error.
        let err = service
            .update(restaurant_id, MenuItemId::new(), item_request(), owner)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MenuItemNotFound { .. }));
    }

    #[tokio::test]
    async fn update_by_owner_overwrites_all_mutable_fields() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);
        let created = service
            .create(restaurant_id, item_request(), owner)
            .await
            .unwrap();

        let updated = service
            .update(
                restaurant_id,
                created.id,
                MenuItemRequest {
                    name: "Quattro Formaggi".to_string(),
                    description: None,
                    price: Decimal::new(1450, 2),
                    available: false,
                },
                owner,
            )
            .await
            .unwrap();

        assert_eq!(updated.name, "Quattro Formaggi");
        assert_eq!(updated.description, None);
        assert_eq!(updated.price, Decimal::new(1450, 2));
        assert!(!updated.available);
        assert_eq!(updated.restaurant_id, restaurant_id);
    }

    #[tokio::test]
    async fn delete_follows_the_same_two_stage_check() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let restaurant_id = seed_restaurant(&store, owner).await;
        let service = MenuItemService::new(store);
        let created = service
            .create(restaurant_id, item_request(), owner)
            .await
            .unwrap();

        let err = service
            .delete(restaurant_id, created.id, OwnerId::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RestaurantNotFoundOrNotOwned(_)
        ));

        service
            .delete(restaurant_id, created.id, owner)
            .await
            .unwrap();

        let err = service.get(restaurant_id, created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::MenuItemNotFound { .. }));
    }
}
