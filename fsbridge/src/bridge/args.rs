//! Argument shapes accepted by the forwarded operations.
//!
//! Unknown fields are ignored. Required fields have no default, so a missing
//! one is a decode error rather than a zero value handed to the kernel.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct OpenArgs {
    pub path: PathBuf,
    /// Host-native `O_*` bits.
    pub flags: i32,
    pub perm: u32,
}

#[derive(Debug, Deserialize)]
pub struct FdArgs {
    pub fd: i32,
}

#[derive(Debug, Deserialize)]
pub struct PathArgs {
    pub path: PathBuf,
}

/// `offset` and `position` are accepted but not honored; the read always
/// starts at the descriptor's current offset.
#[derive(Debug, Deserialize)]
pub struct ReadArgs {
    pub fd: i32,
    pub length: usize,
    pub offset: Option<i64>,
    pub position: Option<i64>,
}

/// `offset`, `length` and `position` are accepted but not honored; the whole
/// buffer is written at the descriptor's current offset.
#[derive(Debug, Deserialize)]
pub struct WriteArgs {
    pub fd: i32,
    pub buffer: String,
    pub offset: Option<i64>,
    pub length: Option<i64>,
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct MkdirArgs {
    pub path: PathBuf,
    pub perm: u32,
}

#[derive(Debug, Deserialize)]
pub struct ChmodArgs {
    pub path: PathBuf,
    pub mode: u32,
}

/// A negative id leaves that owner unchanged.
#[derive(Debug, Deserialize)]
pub struct ChownArgs {
    pub path: PathBuf,
    pub uid: i64,
    pub gid: i64,
}

#[derive(Debug, Deserialize)]
pub struct LinkArgs {
    pub path: PathBuf,
    #[serde(alias = "linkPath")]
    pub link: PathBuf,
}
