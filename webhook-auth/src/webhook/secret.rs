//! The shared signing secret.

use secrecy::{ExposeSecret, SecretString};

use crate::error::{secret_error, Error, SecretErrorKind};

/// Webhook signing secret, resolved once at startup.
///
/// The HMAC key is the UTF-8 bytes of the configured string, unmodified.
#[derive(Debug, Clone)]
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    /// Wrap a configured secret, refusing empty or whitespace-only values.
    pub fn new(secret: SecretString) -> Result<Self, Error> {
        if secret.expose_secret().trim().is_empty() {
            return Err(secret_error(
                SecretErrorKind::Empty,
                "Webhook signing secret is empty",
            ));
        }
        Ok(Self(secret))
    }

    /// Bind an optional configured secret, failing when none was supplied.
    pub fn from_config(secret: Option<SecretString>) -> Result<Self, Error> {
        let secret = secret.ok_or_else(|| {
            secret_error(
                SecretErrorKind::Missing,
                "Webhook signing secret is not configured",
            )
        })?;
        Self::new(secret)
    }

    pub(crate) fn key(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}
