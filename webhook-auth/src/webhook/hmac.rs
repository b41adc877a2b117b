//! HMAC-SHA256 webhook signature validation.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::{Accept, RejectReason, WebhookSecret, WebhookValidator};
use crate::error::{secret_error, Error, SecretErrorKind};

type HmacSha256 = Hmac<Sha256>;

/// Lowercase hex HMAC-SHA256 of `body` keyed by `secret`.
pub fn compute_signature(secret: &WebhookSecret, body: &[u8]) -> Result<String, Error> {
    let mut mac = HmacSha256::new_from_slice(secret.key())
        .map_err(|_| secret_error(SecretErrorKind::InvalidKey, "Invalid HMAC key"))?;
    mac.update(body);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Decide whether `body` was signed with `secret`.
///
/// An absent or empty header is rejected before any HMAC work. Any other value
/// is compared against the computed signature in constant time; a non-hex or
/// wrong-length value is simply a mismatch.
pub fn validate(
    secret: &WebhookSecret,
    body: &[u8],
    signature: Option<&str>,
) -> Result<Accept, RejectReason> {
    let presented = match signature {
        Some(value) if !value.is_empty() => value,
        _ => return Err(RejectReason::MissingHeader),
    };

    // A key the MAC refuses can never have produced the presented signature.
    let Ok(computed) = compute_signature(secret, body) else {
        return Err(RejectReason::InvalidSignature);
    };

    if bool::from(computed.as_bytes().ct_eq(presented.as_bytes())) {
        Ok(Accept)
    } else {
        Err(RejectReason::InvalidSignature)
    }
}

/// HMAC-SHA256 webhook validator.
///
/// Holds the signing secret and the name of the header the ticketing system
/// puts its signature in.
#[derive(Debug, Clone)]
pub struct HmacWebhookValidator {
    secret: WebhookSecret,
    signature_header: String,
}

impl HmacWebhookValidator {
    /// Create a new HMAC webhook validator.
    ///
    /// # Arguments
    ///
    /// * `secret` - Webhook signing secret
    /// * `signature_header` - Name of the header containing the signature
    pub fn new(secret: WebhookSecret, signature_header: String) -> Self {
        Self {
            secret,
            signature_header: signature_header.to_ascii_lowercase(),
        }
    }
}

impl WebhookValidator for HmacWebhookValidator {
    fn validate(&self, body: &[u8], signature: Option<&str>) -> Result<Accept, RejectReason> {
        validate(&self.secret, body, signature)
    }

    fn signature_header(&self) -> &str {
        &self.signature_header
    }
}
