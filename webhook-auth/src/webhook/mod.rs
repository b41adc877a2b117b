//! Webhook signature validation.

mod hmac;
mod secret;

pub use self::hmac::{compute_signature, validate, HmacWebhookValidator};
pub use secret::WebhookSecret;

use std::fmt;

/// Marker returned when a request's signature matches its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Accept;

/// Why a webhook request failed authentication.
///
/// The `Display` text is safe to return to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The signature header was absent or empty.
    MissingHeader,
    /// A signature was presented but does not match the body. Malformed
    /// values land here too.
    InvalidSignature,
}

impl RejectReason {
    /// Stable machine-readable code for logs and response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::MissingHeader => "missing_header",
            RejectReason::InvalidSignature => "invalid_signature",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RejectReason::MissingHeader => write!(f, "missing signature header"),
            RejectReason::InvalidSignature => write!(f, "invalid signature"),
        }
    }
}

impl std::error::Error for RejectReason {}

/// Trait for validating webhook signatures.
pub trait WebhookValidator: Send + Sync {
    /// Validate a webhook request.
    ///
    /// # Arguments
    ///
    /// * `body` - Raw request body bytes, exactly as received
    /// * `signature` - Value of the signature header, `None` if it was not sent
    fn validate(&self, body: &[u8], signature: Option<&str>) -> Result<Accept, RejectReason>;

    /// Name of the header carrying the signature.
    fn signature_header(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_reasons_have_distinct_text() {
        assert_ne!(
            RejectReason::MissingHeader.to_string(),
            RejectReason::InvalidSignature.to_string()
        );
        assert_ne!(
            RejectReason::MissingHeader.code(),
            RejectReason::InvalidSignature.code()
        );
    }
}
