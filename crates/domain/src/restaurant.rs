//! Restaurant aggregate service: lifecycle and authorization rules.

use common::{OwnerId, RestaurantId};
use store::{RestaurantChanges, RestaurantRecord, RestaurantStore};

use crate::error::DomainError;
use crate::representation::{restaurant_response, RestaurantResponse};
use crate::request::RestaurantRequest;

/// Service for managing restaurants.
///
/// Stateless: holds only the injected store handle. Any authenticated
/// caller may read; only the owner bound at creation may mutate.
pub struct RestaurantService<S: RestaurantStore> {
    store: S,
}

impl<S: RestaurantStore> RestaurantService<S> {
    /// Creates a new restaurant service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a restaurant owned by the caller.
    ///
    /// The owner is bound from the authenticated identity, never from
    /// the request body.
    #[tracing::instrument(skip(self, request))]
    pub async fn create(
        &self,
        request: RestaurantRequest,
        owner_id: OwnerId,
    ) -> Result<RestaurantResponse, DomainError> {
        tracing::info!(%owner_id, "creating restaurant");

        let record = RestaurantRecord {
            id: RestaurantId::new(),
            name: request.name,
            address: request.address,
            phone_number: request.phone_number,
            email: request.email,
            owner_id,
        };
        self.store.insert_restaurant(record.clone()).await?;
        metrics::counter!("restaurants_created").increment(1);

        tracing::info!(restaurant_id = %record.id, "restaurant created");
        Ok(restaurant_response(record, vec![]))
    }

    /// Loads a restaurant by ID. No ownership check: reads are public
    /// to authenticated callers.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: RestaurantId) -> Result<RestaurantResponse, DomainError> {
        let record = self
            .store
            .find_restaurant(id)
            .await?
            .ok_or(DomainError::RestaurantNotFound(id))?;

        self.with_menu_items(record).await
    }

    /// Returns all restaurants; empty when none exist.
    #[tracing::instrument(skip(self))]
    pub async fn list_all(&self) -> Result<Vec<RestaurantResponse>, DomainError> {
        let records = self.store.list_restaurants().await?;

        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            responses.push(self.with_menu_items(record).await?);
        }
        Ok(responses)
    }

    /// Returns the restaurants belonging to one owner.
    #[tracing::instrument(skip(self))]
    pub async fn list_by_owner(
        &self,
        owner_id: OwnerId,
    ) -> Result<Vec<RestaurantResponse>, DomainError> {
        let records = self.store.list_restaurants_by_owner(owner_id).await?;

        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            responses.push(self.with_menu_items(record).await?);
        }
        Ok(responses)
    }

    /// Overwrites all mutable fields of a restaurant the caller owns.
    ///
    /// The store applies the fused id+owner predicate, so "not found"
    /// and "found but not owned" are indistinguishable to the caller.
    #[tracing::instrument(skip(self, request))]
    pub async fn update(
        &self,
        id: RestaurantId,
        request: RestaurantRequest,
        owner_id: OwnerId,
    ) -> Result<RestaurantResponse, DomainError> {
        tracing::info!(%id, %owner_id, "updating restaurant");

        let changes = RestaurantChanges {
            name: request.name,
            address: request.address,
            phone_number: request.phone_number,
            email: request.email,
        };
        let record = self
            .store
            .update_restaurant(id, owner_id, changes)
            .await?
            .ok_or(DomainError::RestaurantNotFoundOrNotOwned(id))?;
        metrics::counter!("restaurants_updated").increment(1);

        tracing::info!(%id, "restaurant updated");
        self.with_menu_items(record).await
    }

    /// Deletes a restaurant the caller owns, cascading to all of its
    /// menu items.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: RestaurantId, owner_id: OwnerId) -> Result<(), DomainError> {
        tracing::info!(%id, %owner_id, "deleting restaurant");

        if !self.store.delete_restaurant(id, owner_id).await? {
            return Err(DomainError::RestaurantNotFoundOrNotOwned(id));
        }
        metrics::counter!("restaurants_deleted").increment(1);

        tracing::info!(%id, "restaurant deleted");
        Ok(())
    }

    async fn with_menu_items(
        &self,
        record: RestaurantRecord,
    ) -> Result<RestaurantResponse, DomainError> {
        let menu_items = self.store.list_menu_items(record.id).await?;
        Ok(restaurant_response(record, menu_items))
    }
}

#[cfg(test)]
mod tests {
    use store::InMemoryRestaurantStore;

    use super::*;

    fn request() -> RestaurantRequest {
        RestaurantRequest {
            name: "Test Restaurant".to_string(),
            address: "123 Test St".to_string(),
            phone_number: "+1234567890".to_string(),
            email: "test@restaurant.com".to_string(),
        }
    }

    #[tokio::test]
    async fn create_binds_owner_from_identity() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();

        let response = service.create(request(), owner).await.unwrap();

        assert_eq!(response.name, "Test Restaurant");
        assert_eq!(response.owner_id, owner);
        assert!(response.menu_items.is_empty());
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();

        let created = service.create(request(), owner).await.unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_missing_restaurant_is_not_found() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());

        let err = service.get(RestaurantId::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::RestaurantNotFound(_)));
    }

    #[tokio::test]
    async fn update_by_non_owner_is_conflated_not_found() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();
        let created = service.create(request(), owner).await.unwrap();

        let err = service
            .update(created.id, request(), OwnerId::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RestaurantNotFoundOrNotOwned(_)
        ));

        // Unchanged.
        assert_eq!(service.get(created.id).await.unwrap().name, "Test Restaurant");
    }

    #[tokio::test]
    async fn update_by_owner_overwrites_all_mutable_fields() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();
        let created = service.create(request(), owner).await.unwrap();

        let mut renamed = request();
        renamed.name = "Renamed".to_string();
        let updated = service.update(created.id, renamed, owner).await.unwrap();

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.owner_id, owner);
        assert_eq!(service.get(created.id).await.unwrap().name, "Renamed");
    }

    #[tokio::test]
    async fn delete_by_non_owner_is_conflated_not_found() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();
        let created = service.create(request(), owner).await.unwrap();

        let err = service
            .delete(created.id, OwnerId::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::RestaurantNotFoundOrNotOwned(_)
        ));
        assert!(service.get(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn delete_by_owner_removes_restaurant() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner = OwnerId::new();
        let created = service.create(request(), owner).await.unwrap();

        service.delete(created.id, owner).await.unwrap();

        let err = service.get(created.id).await.unwrap_err();
        assert!(matches!(err, DomainError::RestaurantNotFound(_)));
    }

    #[tokio::test]
    async fn list_by_owner_only_returns_own_restaurants() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        let owner_a = OwnerId::new();
        let owner_b = OwnerId::new();
        service.create(request(), owner_a).await.unwrap();
        service.create(request(), owner_a).await.unwrap();
        service.create(request(), owner_b).await.unwrap();

        let for_a = service.list_by_owner(owner_a).await.unwrap();
        assert_eq!(for_a.len(), 2);
        assert!(for_a.iter().all(|r| r.owner_id == owner_a));

        assert_eq!(service.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn list_all_is_empty_when_nothing_exists() {
        let service = RestaurantService::new(InMemoryRestaurantStore::new());
        assert!(service.list_all().await.unwrap().is_empty());
    }
}
