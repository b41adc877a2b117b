use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use log::*;
use webhook_auth::webhook::WebhookValidator;

use crate::{controller::webhook_controller::WebhookResponse, AppState};

/// Authenticates a webhook by its HMAC signature before any handler runs.
///
/// The body is buffered exactly as received, checked against the signature
/// header, and handed on unchanged. Rejected requests never reach payload parsing.
/// Intended to be given to `axum::middleware::from_fn_with_state` in the router.
pub(crate) async fn require_signature(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(validator) = app_state.signature_validator.clone() else {
        return next.run(request).await;
    };

    let source = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string());

    let (parts, body) = request.into_parts();
    // The body limit layer is the only way a read fails for a client still
    // waiting on a response.
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("Failed to read ticket webhook body from {source}: {err}");
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(WebhookResponse::error("payload too large")),
            )
                .into_response();
        }
    };

    let presented = parts
        .headers
        .get(validator.signature_header())
        .map(|value| String::from_utf8_lossy(value.as_bytes()));

    match validator.validate(&bytes, presented.as_deref()) {
        Ok(_) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(reason) => {
            warn!(
                "Rejected ticket webhook from {}: reason={} body_len={}",
                source,
                reason.code(),
                bytes.len()
            );
            (
                StatusCode::UNAUTHORIZED,
                Json(WebhookResponse::unauthorized(reason.to_string())),
            )
                .into_response()
        }
    }
}
