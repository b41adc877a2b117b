//! Error types for the `service` crate.
//!
//! Mirrors `webhook_auth::error`: a root Error struct holding an error kind and
//! an optional source for chaining.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the service crate.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in the service crate.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Config(ConfigErrorKind),
    Payload(PayloadErrorKind),
    Queue(QueueErrorKind),
}

/// Startup configuration problems. All of these are fatal.
#[derive(Debug, PartialEq)]
pub enum ConfigErrorKind {
    /// Signature validation is enabled but no usable secret was supplied.
    InvalidSecret,
    ConflictingSecretSources,
    SecretFileUnreadable,
    InvalidSignatureHeader,
    /// Signature validation was switched off while running in production.
    ValidationDisabledInProduction,
}

/// Errors from parsing an authenticated ticket webhook body.
#[derive(Debug, PartialEq)]
pub enum PayloadErrorKind {
    /// The body is not a ticket event document.
    Malformed,
    /// The body parsed but a required field is unusable.
    Invalid,
}

/// Errors from handing enhancement jobs to the pipeline.
#[derive(Debug, PartialEq)]
pub enum QueueErrorKind {
    Full,
    Closed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Config(kind) => write!(f, "Configuration error: {:?}", kind),
            ErrorKind::Payload(kind) => write!(f, "Payload error: {:?}", kind),
            ErrorKind::Queue(kind) => write!(f, "Job queue error: {:?}", kind),
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

impl From<webhook_auth::Error> for Error {
    fn from(err: webhook_auth::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Config(ConfigErrorKind::InvalidSecret),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Payload(PayloadErrorKind::Malformed),
        }
    }
}

/// Helper function to create configuration errors.
pub fn config_error(kind: ConfigErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Config(kind),
    }
}

/// Helper function to create payload errors.
pub fn payload_error(kind: PayloadErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Payload(kind),
    }
}

/// Helper function to create job queue errors.
pub fn queue_error(kind: QueueErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Queue(kind),
    }
}
