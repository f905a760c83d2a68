use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::error::AppError;

/// What the sandbox shim needs to know about the host before forwarding
/// anything: where relative paths resolve, and the native `O_*` values to put
/// in `open` requests.
#[derive(Debug, Serialize)]
pub struct HostInfo {
    pub cwd: String,
    pub flags: BTreeMap<&'static str, i32>,
}

pub fn open_flags() -> BTreeMap<&'static str, i32> {
    BTreeMap::from([
        ("O_WRONLY", libc::O_WRONLY),
        ("O_RDWR", libc::O_RDWR),
        ("O_CREAT", libc::O_CREAT),
        ("O_TRUNC", libc::O_TRUNC),
        ("O_APPEND", libc::O_APPEND),
        ("O_EXCL", libc::O_EXCL),
    ])
}

/// `GET /host`
pub async fn host_info() -> Result<Json<HostInfo>, AppError> {
    let cwd = std::env::current_dir()?;
    Ok(Json(HostInfo {
        cwd: cwd.to_string_lossy().into_owned(),
        flags: open_flags(),
    }))
}
