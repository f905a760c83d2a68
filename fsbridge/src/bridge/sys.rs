//! Thin wrappers over the descriptor-level libc calls.
//!
//! Errors come straight from `errno`; nothing here retries, including on
//! `EINTR`.

use std::ffi::{CStr, CString};
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::io::RawFd;
use std::path::Path;

fn cvt(ret: libc::c_int) -> io::Result<libc::c_int> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret)
    }
}

fn cvt_size(ret: libc::ssize_t) -> io::Result<usize> {
    if ret < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(ret as usize)
    }
}

fn cstring(path: &Path) -> io::Result<CString> {
    CString::new(path.as_os_str().as_bytes()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "path contains an interior nul byte",
        )
    })
}

pub fn open(path: &Path, flags: i32, perm: u32) -> io::Result<RawFd> {
    let path = cstring(path)?;
    // SAFETY: `path` is a valid nul-terminated string for the duration of the call.
    cvt(unsafe { libc::open(path.as_ptr(), flags, perm as libc::c_uint) })
}

pub fn close(fd: RawFd) -> io::Result<()> {
    // SAFETY: closing an arbitrary descriptor is memory safe; validity is the caller's concern.
    cvt(unsafe { libc::close(fd) }).map(drop)
}

pub fn read(fd: RawFd, buf: &mut [u8]) -> io::Result<usize> {
    // SAFETY: `buf` is valid for writes of `buf.len()` bytes.
    cvt_size(unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) })
}

pub fn write(fd: RawFd, buf: &[u8]) -> io::Result<usize> {
    // SAFETY: `buf` is valid for reads of `buf.len()` bytes.
    cvt_size(unsafe { libc::write(fd, buf.as_ptr().cast(), buf.len()) })
}

pub fn stat(path: &Path) -> io::Result<libc::stat> {
    let path = cstring(path)?;
    let mut st = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: `st` points to writable storage for one `libc::stat`.
    cvt(unsafe { libc::stat(path.as_ptr(), st.as_mut_ptr()) })?;
    // SAFETY: a successful stat(2) filled the whole struct.
    Ok(unsafe { st.assume_init() })
}

pub fn lstat(path: &Path) -> io::Result<libc::stat> {
    let path = cstring(path)?;
    let mut st = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: as for `stat`.
    cvt(unsafe { libc::lstat(path.as_ptr(), st.as_mut_ptr()) })?;
    // SAFETY: a successful lstat(2) filled the whole struct.
    Ok(unsafe { st.assume_init() })
}

pub fn fstat(fd: RawFd) -> io::Result<libc::stat> {
    let mut st = MaybeUninit::<libc::stat>::uninit();
    // SAFETY: `st` points to writable storage for one `libc::stat`.
    cvt(unsafe { libc::fstat(fd, st.as_mut_ptr()) })?;
    // SAFETY: a successful fstat(2) filled the whole struct.
    Ok(unsafe { st.assume_init() })
}

/// The OS description of `err`, without the `(os error N)` suffix std adds.
pub fn error_text(err: &io::Error) -> String {
    match err.raw_os_error() {
        Some(errno) => strerror(errno),
        None => err.to_string(),
    }
}

pub fn strerror(errno: i32) -> String {
    let mut buf = [0 as libc::c_char; 256];
    // SAFETY: `buf` is writable for `buf.len()` bytes.
    if unsafe { libc::strerror_r(errno, buf.as_mut_ptr(), buf.len()) } != 0 {
        return format!("Unknown error {errno}");
    }
    // SAFETY: a successful strerror_r left a nul-terminated string in `buf`.
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_write_read_close() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("data");

        let fd = open(&path, libc::O_RDWR | libc::O_CREAT, 0o600).unwrap();
        assert_eq!(write(fd, b"abc").unwrap(), 3);
        assert_eq!(fstat(fd).unwrap().st_size, 3);
        close(fd).unwrap();

        let fd = open(&path, libc::O_RDONLY, 0).unwrap();
        let mut buf = [0u8; 8];
        assert_eq!(read(fd, &mut buf).unwrap(), 3);
        assert_eq!(&buf[..3], b"abc");
        close(fd).unwrap();
    }

    #[test]
    fn test_errors_carry_errno() {
        let tmp = tempfile::tempdir().unwrap();
        let err = stat(&tmp.path().join("missing")).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOENT));

        let err = close(-1).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::EBADF));
    }

    #[test]
    fn test_lstat_does_not_follow_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let target = tmp.path().join("target");
        let link = tmp.path().join("link");
        std::fs::create_dir(&target).unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let followed = stat(&link).unwrap();
        let not_followed = lstat(&link).unwrap();
        assert_eq!(followed.st_mode & libc::S_IFMT, libc::S_IFDIR);
        assert_eq!(not_followed.st_mode & libc::S_IFMT, libc::S_IFLNK);
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        let err = open(Path::new("a\0b"), libc::O_RDONLY, 0).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_strerror_has_no_errno_suffix() {
        assert_eq!(strerror(libc::ENOENT), "No such file or directory");
        let err = io::Error::from_raw_os_error(libc::EEXIST);
        assert_eq!(error_text(&err), "File exists");
    }

    #[test]
    fn test_error_text_keeps_non_os_messages() {
        let err = open(Path::new("a\0b"), libc::O_RDONLY, 0).unwrap_err();
        assert_eq!(error_text(&err), "path contains an interior nul byte");
    }
}
