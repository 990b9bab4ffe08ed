//! Menu item endpoints, nested under a parent restaurant.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::MenuItemId;
use domain::{MenuItemRequest, MenuItemResponse};
use store::RestaurantStore;

use crate::error::ApiError;
use crate::extract::CallerIdentity;
use crate::routes::restaurants::{AppState, parse_restaurant_id};
use crate::validate;

/// POST /api/restaurants/:restaurantId/menu-items — add an item to a
/// restaurant the caller owns.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Path(restaurant_id): Path<String>,
    Json(req): Json<MenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItemResponse>), ApiError> {
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    validate::menu_item_request(&req)?;

    let response = state
        .menu_items
        .create(restaurant_id, req, owner_id)
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/restaurants/:restaurantId/menu-items — list a restaurant's
/// menu items.
#[tracing::instrument(skip(state))]
pub async fn list<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    _caller: CallerIdentity,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<MenuItemResponse>>, ApiError> {
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let responses = state.menu_items.list_by_restaurant(restaurant_id).await?;
    Ok(Json(responses))
}

/// GET /api/restaurants/:restaurantId/menu-items/:itemId — load one
/// menu item scoped to its restaurant.
#[tracing::instrument(skip(state))]
pub async fn get<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    _caller: CallerIdentity,
    Path((restaurant_id, item_id)): Path<(String, String)>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let item_id = parse_item_id(&item_id)?;

    let response = state.menu_items.get(restaurant_id, item_id).await?;
    Ok(Json(response))
}

/// PUT /api/restaurants/:restaurantId/menu-items/:itemId — overwrite a
/// menu item under a restaurant the caller owns.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Path((restaurant_id, item_id)): Path<(String, String)>,
    Json(req): Json<MenuItemRequest>,
) -> Result<Json<MenuItemResponse>, ApiError> {
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let item_id = parse_item_id(&item_id)?;
    validate::menu_item_request(&req)?;

    let response = state
        .menu_items
        .update(restaurant_id, item_id, req, owner_id)
        .await?;
    Ok(Json(response))
}

/// DELETE /api/restaurants/:restaurantId/menu-items/:itemId — remove a
/// menu item under a restaurant the caller owns.
#[tracing::instrument(skip(state))]
pub async fn delete<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    CallerIdentity(owner_id): CallerIdentity,
    Path((restaurant_id, item_id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let restaurant_id = parse_restaurant_id(&restaurant_id)?;
    let item_id = parse_item_id(&item_id)?;

    state
        .menu_items
        .delete(restaurant_id, item_id, owner_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_item_id(id: &str) -> Result<MenuItemId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid menu item ID format: {e}")))?;
    Ok(MenuItemId::from_uuid(uuid))
}
