use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::*;

use service::error::{Error as ServiceError, ErrorKind, PayloadErrorKind, QueueErrorKind};

use crate::controller::webhook_controller::WebhookResponse;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug)]
pub struct Error(ServiceError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Response reasons are fixed strings; source details only go to the log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, reason) = match &self.0.error_kind {
            ErrorKind::Payload(PayloadErrorKind::Malformed) => {
                (StatusCode::BAD_REQUEST, "malformed payload")
            }
            ErrorKind::Payload(PayloadErrorKind::Invalid) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "invalid payload")
            }
            ErrorKind::Queue(QueueErrorKind::Full) => {
                (StatusCode::SERVICE_UNAVAILABLE, "enhancement queue is full")
            }
            ErrorKind::Queue(QueueErrorKind::Closed) => {
                (StatusCode::SERVICE_UNAVAILABLE, "enhancement queue unavailable")
            }
            ErrorKind::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
        };

        if status.is_server_error() {
            error!("{}: {:?}", self.0, self.0.source);
        } else {
            warn!("{}: {:?}", self.0, self.0.source);
        }

        (status, Json(WebhookResponse::error(reason))).into_response()
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}
