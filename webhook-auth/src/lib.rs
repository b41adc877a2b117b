//! # webhook-auth
//!
//! Authentication of inbound ticketing-system webhooks:
//! - Resolution of the shared signing secret
//! - HMAC-SHA256 signature computation over the raw request body
//! - Constant-time comparison against the presented signature header
//!
//! ## Usage
//!
//! ```rust,ignore
//! use webhook_auth::webhook::{HmacWebhookValidator, WebhookSecret, WebhookValidator};
//!
//! let secret = WebhookSecret::new(SecretString::new(raw))?;
//! let validator = HmacWebhookValidator::new(secret, "x-webhook-signature".to_string());
//! validator.validate(body, header_value)?;
//! ```

pub mod error;
pub mod webhook;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
pub use webhook::{Accept, RejectReason};
