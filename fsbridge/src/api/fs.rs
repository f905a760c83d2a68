use axum::body::Bytes;
use axum::extract::Path;
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::bridge;
use crate::error::AppError;

/// `ANY <base>/`
pub async fn missing_operation() -> AppError {
    AppError::MissingOperation
}

/// `ANY <base>/<operation>`
///
/// The native call blocks, so it runs on the blocking pool; each request gets
/// its own worker and nothing is shared between them.
pub async fn dispatch_handler(
    Path(op): Path<String>,
    body: Bytes,
) -> Result<Response, AppError> {
    let tuple = tokio::task::spawn_blocking(move || bridge::dispatch(&op, &body)).await??;
    let encoded = tuple.encode().map_err(AppError::EncodeFailed)?;

    Ok(([(header::CONTENT_TYPE, "application/json")], encoded).into_response())
}
