use crate::{
    controller::{health_check_controller, webhook_controller},
    middleware::signature::require_signature,
    AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(webhook_routes(app_state))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

// Signature validation is a route layer so it wraps the handler and runs before
// the body is deserialized.
fn webhook_routes(app_state: AppState) -> Router {
    let max_body_bytes = app_state.config.max_body_bytes;

    Router::new()
        .route("/webhooks/tickets", post(webhook_controller::ticket_webhook))
        .route_layer(from_fn_with_state(app_state.clone(), require_signature))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(app_state)
}
