use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::bridge::operation::ParseOperationError;

/// Failure of a single bridged operation.
///
/// `Malformed` and `Encode` are lifted into transport errors by the
/// dispatcher; every other variant is reported in-band as the sole element
/// of the result tuple, using its display text.
#[derive(Error, Debug)]
pub enum FsError {
    #[error("failed to decode body: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("{0}")]
    Decode(String),

    #[error("{}", crate::bridge::sys::error_text(.0))]
    Native(#[from] io::Error),

    #[error("operation is unimplemented")]
    Unimplemented,

    #[error("failed to encode result: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Transport level failures, answered with a plain-text HTTP error instead of
/// a result tuple.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("operation is required")]
    MissingOperation,

    #[error(transparent)]
    UnknownOperation(#[from] ParseOperationError),

    #[error("failed to decode body")]
    MalformedBody(#[source] serde_json::Error),

    #[error("failed to write body")]
    EncodeFailed(#[source] serde_json::Error),

    #[error("bridge worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingOperation
            | Self::UnknownOperation(_)
            | Self::MalformedBody(_)
            | Self::EncodeFailed(_) => StatusCode::BAD_REQUEST,
            Self::Worker(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("Generating response for AppError: {:?}", self);
        } else {
            tracing::warn!("Rejecting request: {:?}", self);
        }

        (status_code, self.to_string()).into_response()
    }
}
