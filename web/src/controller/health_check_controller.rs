use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET /health
///
/// Liveness probe. Not authenticated.
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
