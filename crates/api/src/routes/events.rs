//! Inbound order event delivery endpoint.
//!
//! Local delivery point for order-placed notifications. The payload is
//! accepted and queued for the sink task; processing happens off the
//! request path, so the response is 202 rather than 200.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use listener::OrderPlacedEvent;
use store::RestaurantStore;

use crate::error::ApiError;
use crate::routes::restaurants::AppState;

/// POST /internal/order-events — enqueue an order-placed event.
#[tracing::instrument(skip(state, event), fields(order_id = %event.order_id))]
pub async fn submit<S: RestaurantStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(event): Json<OrderPlacedEvent>,
) -> Result<StatusCode, ApiError> {
    state
        .order_events
        .send(event)
        .await
        .map_err(|_| ApiError::Internal("order event sink is not running".to_string()))?;

    Ok(StatusCode::ACCEPTED)
}
