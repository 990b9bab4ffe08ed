//! HTTP API server with observability for the restaurant service.
//!
//! Provides REST endpoints for restaurant and menu item management,
//! with structured logging (tracing) and Prometheus metrics. Caller
//! identity arrives in the `x-user-id` header, already verified by the
//! upstream gateway.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use domain::{MenuItemService, RestaurantService};
use listener::{OrderPlacedEvent, OrderPlacedSink};
use metrics_exporter_prometheus::PrometheusHandle;
use store::RestaurantStore;
use tokio::sync::mpsc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::restaurants::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: RestaurantStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/api/restaurants", post(routes::restaurants::create::<S>))
        .route("/api/restaurants", get(routes::restaurants::list::<S>))
        .route(
            "/api/restaurants/owner",
            get(routes::restaurants::list_owned::<S>),
        )
        .route("/api/restaurants/{id}", get(routes::restaurants::get::<S>))
        .route(
            "/api/restaurants/{id}",
            put(routes::restaurants::update::<S>),
        )
        .route(
            "/api/restaurants/{id}",
            delete(routes::restaurants::delete::<S>),
        )
        .route(
            "/api/restaurants/{id}/menu-items",
            post(routes::menu_items::create::<S>),
        )
        .route(
            "/api/restaurants/{id}/menu-items",
            get(routes::menu_items::list::<S>),
        )
        .route(
            "/api/restaurants/{id}/menu-items/{item_id}",
            get(routes::menu_items::get::<S>),
        )
        .route(
            "/api/restaurants/{id}/menu-items/{item_id}",
            put(routes::menu_items::update::<S>),
        )
        .route(
            "/api/restaurants/{id}/menu-items/{item_id}",
            delete(routes::menu_items::delete::<S>),
        )
        .route("/internal/order-events", post(routes::events::submit::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state plus the order event sink and the
/// receiving end of its channel. The caller spawns the sink's run loop.
pub fn create_default_state<S: RestaurantStore + Clone + 'static>(
    store: S,
) -> (
    Arc<AppState<S>>,
    Arc<OrderPlacedSink>,
    mpsc::Receiver<OrderPlacedEvent>,
) {
    let (order_events, rx) = mpsc::channel(64);

    let state = Arc::new(AppState {
        restaurants: RestaurantService::new(store.clone()),
        menu_items: MenuItemService::new(store),
        order_events,
    });

    (state, Arc::new(OrderPlacedSink::new()), rx)
}
