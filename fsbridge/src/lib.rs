//! Host side of a filesystem bridge for sandboxed programs.
//!
//! A program running without syscalls (Go compiled to WebAssembly, inside a
//! browser page) posts each filesystem primitive to `<base>/<operation>` and
//! gets back a `[error, ...values]` tuple shaped like Node's `fs` callbacks.
//! The host performs the call directly and trusts the caller completely: there
//! is no path confinement.

#[cfg(not(unix))]
compile_error!("fsbridge forwards POSIX syscalls and only builds on unix hosts");

pub mod api;
pub mod bridge;
pub mod config;
pub mod error;
pub mod utils;
