//! Error types for the `webhook-auth` crate.
//!
//! Follows the same pattern as the service crate with a root Error struct and error kind enums.
//! Signature rejections are not errors; see [`crate::webhook::RejectReason`].

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for webhook-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in webhook-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Secret(SecretErrorKind),
}

/// Errors from resolving the webhook signing secret.
#[derive(Debug, PartialEq)]
pub enum SecretErrorKind {
    /// No secret was supplied.
    Missing,
    /// A secret was supplied but holds no usable bytes.
    Empty,
    /// The secret bytes were refused as an HMAC key.
    InvalidKey,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Secret(kind) => write!(f, "Webhook secret error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Helper function to create secret errors.
pub fn secret_error(kind: SecretErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Secret(kind),
    }
}
