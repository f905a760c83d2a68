//! Portable file status record.
//!
//! `libc::stat` differs in field widths and signedness between hosts. This
//! conversion is the only code that reads it; everything past this point sees
//! the fixed-width [`Stat`].

// Field widths vary per target, so some of these casts are no-ops on a given host.
#![allow(clippy::unnecessary_cast)]

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stat {
    pub dev: u64,
    pub ino: u64,
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub rdev: u64,
    pub size: i64,
    pub blksize: i64,
    pub blocks: i64,
    pub atime_ms: i64,
    pub mtime_ms: i64,
    pub ctime_ms: i64,
    /// Backs `isDirectory()` on the sandbox side.
    pub dir: bool,
}

impl From<&libc::stat> for Stat {
    fn from(st: &libc::stat) -> Self {
        let mode = st.st_mode as u32;
        Stat {
            dev: st.st_dev as u64,
            ino: st.st_ino as u64,
            mode,
            nlink: st.st_nlink as u64,
            uid: st.st_uid as u32,
            gid: st.st_gid as u32,
            rdev: st.st_rdev as u64,
            size: st.st_size as i64,
            blksize: st.st_blksize as i64,
            blocks: st.st_blocks as i64,
            // Only whole seconds are carried over.
            atime_ms: secs_to_millis(st.st_atime as i64),
            mtime_ms: secs_to_millis(st.st_mtime as i64),
            ctime_ms: secs_to_millis(st.st_ctime as i64),
            dir: (mode & libc::S_IFMT as u32) == libc::S_IFDIR as u32,
        }
    }
}

fn secs_to_millis(secs: i64) -> i64 {
    secs.saturating_mul(1000)
}
