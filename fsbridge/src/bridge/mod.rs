//! Syscall forwarding: operation name + JSON body in, result tuple out.
//!
//! The bridge holds no state between requests. Descriptors returned by `open`
//! belong to the host process and stay valid until some later request closes
//! them; the bridge neither tracks nor serializes their use.

pub mod args;
pub mod decoder;
pub mod handlers;
pub mod operation;
pub mod reply;
pub mod stat;
pub(crate) mod sys;

pub use decoder::Decoder;
pub use operation::Operation;
pub use reply::ResultTuple;
pub use stat::Stat;

use crate::error::{AppError, FsError};

/// Runs one operation against the host filesystem.
///
/// Blocks for the duration of the native call.
pub fn dispatch(name: &str, body: &[u8]) -> Result<ResultTuple, AppError> {
    if name.is_empty() {
        return Err(AppError::MissingOperation);
    }
    let op: Operation = name.parse()?;

    let outcome = match op.handler() {
        Some(handler) => handler.handle(&Decoder::new(body)),
        None => Err(FsError::Unimplemented),
    };

    match outcome {
        Ok(values) => {
            tracing::debug!(op = %op, "operation succeeded");
            Ok(ResultTuple::success(values))
        }
        Err(FsError::Malformed(err)) => Err(AppError::MalformedBody(err)),
        Err(FsError::Encode(err)) => Err(AppError::EncodeFailed(err)),
        Err(err) => {
            tracing::debug!(op = %op, error = %err, "operation failed");
            Ok(ResultTuple::failure(&err))
        }
    }
}
