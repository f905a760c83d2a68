use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::bridge::handlers::{self, Handler};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unhandled operation: {0}")]
pub struct ParseOperationError(pub String);

/// Every filesystem primitive the sandbox shim may name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Chmod,
    Chown,
    Close,
    Fchmod,
    Fchown,
    Fstat,
    Ftruncate,
    Lchown,
    Link,
    Lstat,
    Mkdir,
    Open,
    Read,
    Readdir,
    Readlink,
    Rename,
    Rmdir,
    Stat,
    Symlink,
    Truncate,
    Unlink,
    Utimes,
    Write,
}

impl Operation {
    pub const ALL: [Operation; 23] = [
        Operation::Chmod,
        Operation::Chown,
        Operation::Close,
        Operation::Fchmod,
        Operation::Fchown,
        Operation::Fstat,
        Operation::Ftruncate,
        Operation::Lchown,
        Operation::Link,
        Operation::Lstat,
        Operation::Mkdir,
        Operation::Open,
        Operation::Read,
        Operation::Readdir,
        Operation::Readlink,
        Operation::Rename,
        Operation::Rmdir,
        Operation::Stat,
        Operation::Symlink,
        Operation::Truncate,
        Operation::Unlink,
        Operation::Utimes,
        Operation::Write,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Chmod => "chmod",
            Operation::Chown => "chown",
            Operation::Close => "close",
            Operation::Fchmod => "fchmod",
            Operation::Fchown => "fchown",
            Operation::Fstat => "fstat",
            Operation::Ftruncate => "ftruncate",
            Operation::Lchown => "lchown",
            Operation::Link => "link",
            Operation::Lstat => "lstat",
            Operation::Mkdir => "mkdir",
            Operation::Open => "open",
            Operation::Read => "read",
            Operation::Readdir => "readdir",
            Operation::Readlink => "readlink",
            Operation::Rename => "rename",
            Operation::Rmdir => "rmdir",
            Operation::Stat => "stat",
            Operation::Symlink => "symlink",
            Operation::Truncate => "truncate",
            Operation::Unlink => "unlink",
            Operation::Utimes => "utimes",
            Operation::Write => "write",
        }
    }

    /// The handler forwarding this operation, or `None` for names that are
    /// reserved but deliberately not forwarded.
    pub fn handler(self) -> Option<&'static dyn Handler> {
        match self {
            Operation::Chmod => Some(&handlers::Chmod),
            Operation::Chown => Some(&handlers::Chown),
            Operation::Close => Some(&handlers::Close),
            Operation::Fstat => Some(&handlers::Fstat),
            Operation::Link => Some(&handlers::Link),
            Operation::Lstat => Some(&handlers::Lstat),
            Operation::Mkdir => Some(&handlers::Mkdir),
            Operation::Open => Some(&handlers::Open),
            Operation::Read => Some(&handlers::Read),
            Operation::Readdir => Some(&handlers::Readdir),
            Operation::Rmdir => Some(&handlers::Rmdir),
            Operation::Stat => Some(&handlers::Stat),
            Operation::Unlink => Some(&handlers::Unlink),
            Operation::Write => Some(&handlers::Write),
            Operation::Fchmod
            | Operation::Fchown
            | Operation::Ftruncate
            | Operation::Lchown
            | Operation::Readlink
            | Operation::Rename
            | Operation::Symlink
            | Operation::Truncate
            | Operation::Utimes => None,
        }
    }
}

impl FromStr for Operation {
    type Err = ParseOperationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| ParseOperationError(s.to_string()))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
