//! Ticket webhook payloads.
//!
//! Only ever called with a body that has already passed signature validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{payload_error, Error, PayloadErrorKind};

/// Events that start an enhancement job. Anything else is acknowledged and dropped.
const ENHANCEABLE_EVENTS: [&str; 2] = ["ticket_created", "ticket_updated"];

/// Ticket webhook event payload
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TicketEvent {
    /// The type of event, e.g. `ticket_created`
    pub event: String,
    pub ticket_id: String,
    pub tenant_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TicketEvent {
    /// Parses the raw webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, Error> {
        let event: TicketEvent = serde_json::from_slice(body)?;

        if event.ticket_id.trim().is_empty() {
            return Err(payload_error(
                PayloadErrorKind::Invalid,
                "ticket_id must not be empty",
            ));
        }
        if event.tenant_id.trim().is_empty() {
            return Err(payload_error(
                PayloadErrorKind::Invalid,
                "tenant_id must not be empty",
            ));
        }

        Ok(event)
    }

    pub fn is_enhanceable(&self) -> bool {
        ENHANCEABLE_EVENTS.contains(&self.event.as_str())
    }
}
