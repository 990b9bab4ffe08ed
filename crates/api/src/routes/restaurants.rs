//! Restaurant CRUD endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::RestaurantId;
use domain::{MenuItemService, RestaurantRequest, RestaurantResponse, RestaurantService};
use listener::OrderPlacedEvent;
use store::RestaurantStore;
use tokio::sync::mpsc;

use crate::error::ApiError;
use crate::extract::CallerIdentity;
use crate::validate;

/// Shared application state accessible from all handlers.
pub struct AppState<S: RestaurantStore> {
    pub restaurants: RestaurantService<S>,
    pub menu_items: MenuItemService<S>,
    pub order_events: mpsc::Sender<OrderPlacedEvent>,
}

/// POST /api/restaurants — create a restaurant owned by the caller.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Json(req): Json<RestaurantRequest>,
) -> Result<(StatusCode, Json<RestaurantResponse>), ApiError> {
    validate::restaurant_request(&req)?;

    let response = state.restaurants.create(req, owner_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/restaurants — list all restaurants.
#[tracing::instrument(skip(state))]
pub async fn list<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    _caller: CallerIdentity,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let responses = state.restaurants.list_all().await?;
    Ok(Json(responses))
}

/// GET /api/restaurants/owner — list the caller's own restaurants.
#[tracing::instrument(skip(state))]
pub async fn list_owned<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
) -> Result<Json<Vec<RestaurantResponse>>, ApiError> {
    let responses = state.restaurants.list_by_owner(owner_id).await?;
    Ok(Json(responses))
}

/// GET /api/restaurants/:id — load one restaurant with its menu items.
#[tracing::instrument(skip(state))]
pub async fn get<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    _caller: CallerIdentity,
    Path(id): Path<String>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant_id = parse_restaurant_id(&id)?;
    let response = state.restaurants.get(restaurant_id).await?;
    Ok(Json(response))
}

/// PUT /api/restaurants/:id — overwrite a restaurant the caller owns.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Path(id): Path<String>,
    Json(req): Json<RestaurantRequest>,
) -> Result<Json<RestaurantResponse>, ApiError> {
    let restaurant_id = parse_restaurant_id(&id)?;
    validate::restaurant_request(&req)?;

    let response = state.restaurants.update(restaurant_id, req, owner_id).await?;
    Ok(Json(response))
}

/// DELETE /api/restaurants/:id — delete a restaurant the caller owns,
/// cascading to its menu items.
#[tracing::instrument(skip(state))]
pub async fn delete<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = parse_restaurant_id(&id)?;
    state.restaurants.delete(restaurant_id, owner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn parse_restaurant_id(id: &str) -> Result<RestaurantId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid restaurant ID format: {e}")))?;
    Ok(RestaurantId::from_uuid(uuid))
}
