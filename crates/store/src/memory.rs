use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{MenuItemId, OwnerId, RestaurantId};
use tokio::sync::RwLock;

use crate::gateway::{OwnedWrite, RestaurantStore};
use crate::records::{MenuItemChanges, MenuItemRecord, RestaurantChanges, RestaurantRecord};
use crate::Result;

/// In-memory store implementation for testing and local runs.
///
/// Provides the same interface and atomicity guarantees as the
/// PostgreSQL implementation: compound mutations hold both table locks
/// for their full duration, in a fixed order (restaurants before menu
/// items), so check-then-act sequences cannot interleave.
#[derive(Clone, Default)]
pub struct InMemoryRestaurantStore {
    restaurants: Arc<RwLock<HashMap<RestaurantId, RestaurantRecord>>>,
    menu_items: Arc<RwLock<HashMap<MenuItemId, MenuItemRecord>>>,
}

impl InMemoryRestaurantStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of restaurants stored.
    pub async fn restaurant_count(&self) -> usize {
        self.restaurants.read().await.len()
    }

    /// Returns the total number of menu items stored.
    pub async fn menu_item_count(&self) -> usize {
        self.menu_items.read().await.len()
    }

    /// Clears all records.
    pub async fn clear(&self) {
        self.restaurants.write().await.clear();
        self.menu_items.write().await.clear();
    }
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantStore {
    async fn insert_restaurant(&self, record: RestaurantRecord) -> Result<()> {
        self.restaurants.write().await.insert(record.id, record);
        Ok(())
    }

    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        Ok(self.restaurants.read().await.get(&id).cloned())
    }

    async fn find_restaurant_owned(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
    ) -> Result<Option<RestaurantRecord>> {
        Ok(self
            .restaurants
            .read()
            .await
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .cloned())
    }

    async fn restaurant_exists(&self, id: RestaurantId) -> Result<bool> {
        Ok(self.restaurants.read().await.contains_key(&id))
    }

    async fn list_restaurants(&self) -> Result<Vec<RestaurantRecord>> {
        let store = self.restaurants.read().await;
        let mut records: Vec<_> = store.values().cloned().collect();
        records.sort_by_key(|r| r.id.as_uuid());
        Ok(records)
    }

    async fn list_restaurants_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> Result<Vec<RestaurantRecord>> {
        let store = self.restaurants.read().await;
        let mut records: Vec<_> = store
            .values()
            .filter(|r| r.owner_id == owner_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.id.as_uuid());
        Ok(records)
    }

    async fn update_restaurant(
        &self,
        id: RestaurantId,
        owner_id: OwnerId,
        changes: RestaurantChanges,
    ) -> Result<Option<RestaurantRecord>> {
        let mut store = self.restaurants.write().await;
        match store.get_mut(&id).filter(|r| r.owner_id == owner_id) {
            Some(record) => {
                record.apply(changes);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_restaurant(&self, id: RestaurantId, owner_id: OwnerId) -> Result<bool> {
        let mut restaurants = self.restaurants.write().await;
        let mut menu_items = self.menu_items.write().await;

        if restaurants
            .get(&id)
            .filter(|r| r.owner_id == owner_id)
            .is_none()
        {
            return Ok(false);
        }

        restaurants.remove(&id);
        menu_items.retain(|_, item| item.restaurant_id != id);
        Ok(true)
    }

    async fn insert_menu_item(
        &self,
        record: MenuItemRecord,
        owner_id: OwnerId,
    ) -> Result<Option<MenuItemRecord>> {
        let restaurants = self.restaurants.write().await;
        let mut menu_items = self.menu_items.write().await;

        if restaurants
            .get(&record.restaurant_id)
            .filter(|r| r.owner_id == owner_id)
            .is_none()
        {
            return Ok(None);
        }

        menu_items.insert(record.id, record.clone());
        Ok(Some(record))
    }

    async fn find_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
    ) -> Result<Option<MenuItemRecord>> {
        Ok(self
            .menu_items
            .read()
            .await
            .get(&item_id)
            .filter(|item| item.restaurant_id == restaurant_id)
            .cloned())
    }

    async fn list_menu_items(&self, restaurant_id: RestaurantId) -> Result<Vec<MenuItemRecord>> {
        let store = self.menu_items.read().await;
        let mut records: Vec<_> = store
            .values()
            .filter(|item| item.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        records.sort_by_key(|item| item.id.as_uuid());
        Ok(records)
    }

    async fn update_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
        changes: MenuItemChanges,
    ) -> Result<OwnedWrite<MenuItemRecord>> {
        let restaurants = self.restaurants.write().await;
        let mut menu_items = self.menu_items.write().await;

        // Parent ownership strictly before item existence.
        if restaurants
            .get(&restaurant_id)
            .filter(|r| r.owner_id == owner_id)
            .is_none()
        {
            return Ok(OwnedWrite::RestaurantMissing);
        }

        match menu_items
            .get_mut(&item_id)
            .filter(|item| item.restaurant_id == restaurant_id)
        {
            Some(item) => {
                item.apply(changes);
                Ok(OwnedWrite::Applied(item.clone()))
            }
            None => Ok(OwnedWrite::ItemMissing),
        }
    }

    async fn delete_menu_item(
        &self,
        restaurant_id: RestaurantId,
        item_id: MenuItemId,
        owner_id: OwnerId,
    ) -> Result<OwnedWrite<()>> {
        let restaurants = self.restaurants.write().await;
        let mut menu_items = self.menu_items.write().await;

        if restaurants
            .get(&restaurant_id)
            .filter(|r| r.owner_id == owner_id)
            .is_none()
        {
            return Ok(OwnedWrite::RestaurantMissing);
        }

        if menu_items
            .get(&item_id)
            .filter(|item| item.restaurant_id == restaurant_id)
            .is_none()
        {
            return Ok(OwnedWrite::ItemMissing);
        }

        menu_items.remove(&item_id);
        Ok(OwnedWrite::Applied(()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn restaurant(owner_id: OwnerId) -> RestaurantRecord {
        RestaurantRecord {
            id: RestaurantId::new(),
            name: "Test Restaurant".to_string(),
            address: "123 Test St".to_string(),
            phone_number: "+1234567890".to_string(),
            email: "test@restaurant.com".to_string(),
            owner_id,
        }
    }

    fn menu_item(restaurant_id: RestaurantId) -> MenuItemRecord {
        MenuItemRecord {
            id: MenuItemId::new(),
            name: "Margherita".to_string(),
            description: Some("Tomato and mozzarella".to_string()),
            price: Decimal::new(1250, 2),
            available: true,
            restaurant_id,
        }
    }

    #[tokio::test]
    async fn insert_and_find_restaurant() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;

        store.insert_restaurant(record.clone()).await.unwrap();

        let found = store.find_restaurant(id).await.unwrap();
        assert_eq!(found, Some(record));
    }

    #[tokio::test]
    async fn fused_predicate_hides_other_owners_restaurants() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();

        let as_owner = store.find_restaurant_owned(id, owner).await.unwrap();
        assert!(as_owner.is_some());

        let as_stranger = store
            .find_restaurant_owned(id, OwnerId::new())
            .await
            .unwrap();
        assert!(as_stranger.is_none());
    }

    #[tokio::test]
    async fn update_restaurant_requires_matching_owner() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();

        let changes = RestaurantChanges {
            name: "Renamed".to_string(),
            address: "123 Test St".to_string(),
            phone_number: "+1234567890".to_string(),
            email: "test@restaurant.com".to_string(),
        };

        let denied = store
            .update_restaurant(id, OwnerId::new(), changes.clone())
            .await
            .unwrap();
        assert!(denied.is_none());

        let updated = store.update_restaurant(id, owner, changes).await.unwrap();
        assert_eq!(updated.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn delete_restaurant_cascades_to_menu_items() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();
        store
            .insert_menu_item(menu_item(id), owner)
            .await
            .unwrap()
            .unwrap();

        let deleted = store.delete_restaurant(id, owner).await.unwrap();
        assert!(deleted);
        assert_eq!(store.menu_item_count().await, 0);
    }

    #[tokio::test]
    async fn insert_menu_item_rejected_for_foreign_restaurant() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();

        let rejected = store
            .insert_menu_item(menu_item(id), OwnerId::new())
            .await
            .unwrap();
        assert!(rejected.is_none());
        assert_eq!(store.menu_item_count().await, 0);
    }

    #[tokio::test]
    async fn update_menu_item_checks_parent_before_item() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();

        let changes = MenuItemChanges {
            name: "Quattro Formaggi".to_string(),
            description: None,
            price: Decimal::new(1450, 2),
            available: false,
        };

        // Wrong owner: parent predicate fails even though the item is
        // also missing.
        let outcome = store
            .update_menu_item(id, MenuItemId::new(), OwnerId::new(), changes.clone())
            .await
            .unwrap();
        assert_eq!(outcome, OwnedWrite::RestaurantMissing);

        // Right owner, missing item.
        let outcome = store
            .update_menu_item(id, MenuItemId::new(), owner, changes.clone())
            .await
            .unwrap();
        assert_eq!(outcome, OwnedWrite::ItemMissing);

        // Right owner, existing item.
        let item = store
            .insert_menu_item(menu_item(id), owner)
            .await
            .unwrap()
            .unwrap();
        let outcome = store
            .update_menu_item(id, item.id, owner, changes)
            .await
            .unwrap();
        match outcome {
            OwnedWrite::Applied(updated) => {
                assert_eq!(updated.name, "Quattro Formaggi");
                assert_eq!(updated.price, Decimal::new(1450, 2));
                assert!(!updated.available);
            }
            other => panic!("expected Applied, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_menu_item_two_stage_check() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        let record = restaurant(owner);
        let id = record.id;
        store.insert_restaurant(record).await.unwrap();
        let item = store
            .insert_menu_item(menu_item(id), owner)
            .await
            .unwrap()
            .unwrap();

        let outcome = store
            .delete_menu_item(id, item.id, OwnerId::new())
            .await
            .unwrap();
        assert_eq!(outcome, OwnedWrite::RestaurantMissing);

        let outcome = store.delete_menu_item(id, item.id, owner).await.unwrap();
        assert_eq!(outcome, OwnedWrite::Applied(()));

        let outcome = store.delete_menu_item(id, item.id, owner).await.unwrap();
        assert_eq!(outcome, OwnedWrite::ItemMissing);
    }

    #[tokio::test]
    async fn list_restaurants_by_owner_filters() {
        let store = InMemoryRestaurantStore::new();
        let owner_a = OwnerId::new();
        let owner_b = OwnerId::new();
        store.insert_restaurant(restaurant(owner_a)).await.unwrap();
        store.insert_restaurant(restaurant(owner_a)).await.unwrap();
        store.insert_restaurant(restaurant(owner_b)).await.unwrap();

        assert_eq!(
            store.list_restaurants_by_owner(owner_a).await.unwrap().len(),
            2
        );
        assert_eq!(
            store.list_restaurants_by_owner(owner_b).await.unwrap().len(),
            1
        );
        assert_eq!(store.list_restaurants().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn repeated_reads_return_identical_results() {
        let store = InMemoryRestaurantStore::new();
        let owner = OwnerId::new();
        for _ in 0..5 {
            store.insert_restaurant(restaurant(owner)).await.unwrap();
        }

        let first = store.list_restaurants().await.unwrap();
        let second = store.list_restaurants().await.unwrap();
        assert_eq!(first, second);
    }
}
