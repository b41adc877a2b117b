//! Controller for handling webhooks from the ticketing system.
//!
//! Requests only reach these handlers after `middleware::signature` has
//! authenticated the raw body, so parsing here never sees unauthenticated input.

use crate::{AppState, Error};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use log::*;
use serde::Serialize;
use service::jobs::EnhancementJob;
use service::ticket::TicketEvent;
use uuid::Uuid;

/// Response for webhook acknowledgment
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct WebhookResponse {
    pub status: String,
    /// Human-readable reason, present on failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Enhancement job created for the ticket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_id: Option<Uuid>,
}

impl WebhookResponse {
    pub fn accepted(job_id: Uuid) -> Self {
        Self {
            status: "accepted".to_string(),
            reason: None,
            job_id: Some(job_id),
        }
    }

    pub fn ignored() -> Self {
        Self {
            status: "ignored".to_string(),
            reason: None,
            job_id: None,
        }
    }

    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self {
            status: "unauthorized".to_string(),
            reason: Some(reason.into()),
            job_id: None,
        }
    }

    pub fn error(reason: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            reason: Some(reason.into()),
            job_id: None,
        }
    }
}

/// POST /webhooks/tickets
///
/// Turns an authenticated ticket event into an enhancement job.
pub async fn ticket_webhook(
    State(app_state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let event = TicketEvent::from_slice(&body)?;
    debug!(
        "Received ticket webhook: {} for ticket {}",
        event.event, event.ticket_id
    );

    if !event.is_enhanceable() {
        debug!("Ignoring unhandled ticket event: {}", event.event);
        return Ok((StatusCode::OK, Json(WebhookResponse::ignored())));
    }

    let job = EnhancementJob::from_event(event);
    let job_id = job.job_id;
    let ticket_id = job.ticket_id.clone();

    app_state.job_queue_ref().enqueue(job).await?;

    info!("Queued enhancement job {} for ticket {}", job_id, ticket_id);

    Ok((StatusCode::ACCEPTED, Json(WebhookResponse::accepted(job_id))))
}
