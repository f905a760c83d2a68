use std::fs::{self, DirBuilder, Permissions};
use std::io;
use std::os::unix::fs::{DirBuilderExt, PermissionsExt};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::bridge::args::{
    ChmodArgs, ChownArgs, FdArgs, LinkArgs, MkdirArgs, OpenArgs, PathArgs, ReadArgs, WriteArgs,
};
use crate::bridge::decoder::Decoder;
use crate::bridge::reply::Values;
use crate::bridge::stat::Stat as StatRecord;
use crate::bridge::sys;
use crate::error::FsError;

/// Largest `length` a single read accepts, matching the default body limit.
pub const MAX_READ_LENGTH: usize = 64 * 1024 * 1024;

/// Common capability of every forwarded operation.
pub trait Handler: Send + Sync {
    fn handle(&self, dec: &Decoder<'_>) -> Result<Values, FsError>;
}

/// One native filesystem primitive together with the arguments it needs.
pub trait Syscall: Send + Sync {
    type Args: DeserializeOwned;

    fn call(&self, args: Self::Args) -> Result<Values, FsError>;
}

// Decoding always completes before `call` runs, so a rejected body never
// reaches the kernel.
impl<S: Syscall> Handler for S {
    fn handle(&self, dec: &Decoder<'_>) -> Result<Values, FsError> {
        let args = dec.decode::<S::Args>()?;
        self.call(args)
    }
}

fn stat_value(st: &libc::stat) -> Result<Value, FsError> {
    serde_json::to_value(StatRecord::from(st)).map_err(FsError::Encode)
}

fn owner_id(id: i64, field: &str) -> Result<Option<u32>, FsError> {
    if id < 0 {
        return Ok(None);
    }
    u32::try_from(id)
        .map(Some)
        .map_err(|_| FsError::Decode(format!("{field} {id} is out of range")))
}

pub struct Open;

impl Syscall for Open {
    type Args = OpenArgs;

    fn call(&self, args: OpenArgs) -> Result<Values, FsError> {
        let fd = sys::open(&args.path, args.flags, args.perm)?;
        Ok(vec![json!(fd)])
    }
}

pub struct Close;

impl Syscall for Close {
    type Args = FdArgs;

    fn call(&self, args: FdArgs) -> Result<Values, FsError> {
        sys::close(args.fd)?;
        Ok(vec![])
    }
}

pub struct Read;

impl Syscall for Read {
    type Args = ReadArgs;

    fn call(&self, args: ReadArgs) -> Result<Values, FsError> {
        if args.length > MAX_READ_LENGTH {
            return Err(FsError::Decode(format!(
                "read length {} exceeds the limit of {MAX_READ_LENGTH} bytes",
                args.length
            )));
        }
        let mut buf = vec![0; args.length];

        let n = sys::read(args.fd, &mut buf)?;

        // The full requested buffer goes back; only the first `n` bytes are data.
        Ok(vec![json!(n), json!(B64.encode(&buf))])
    }
}

pub struct Write;

impl Syscall for Write {
    type Args = WriteArgs;

    fn call(&self, args: WriteArgs) -> Result<Values, FsError> {
        let n = sys::write(args.fd, args.buffer.as_bytes())?;
        Ok(vec![json!(n)])
    }
}

pub struct Mkdir;

impl Syscall for Mkdir {
    type Args = MkdirArgs;

    fn call(&self, args: MkdirArgs) -> Result<Values, FsError> {
        DirBuilder::new().mode(args.perm).create(&args.path)?;
        Ok(vec![])
    }
}

pub struct Rmdir;

impl Syscall for Rmdir {
    type Args = PathArgs;

    fn call(&self, args: PathArgs) -> Result<Values, FsError> {
        fs::remove_dir(&args.path)?;
        Ok(vec![])
    }
}

pub struct Readdir;

impl Syscall for Readdir {
    type Args = PathArgs;

    fn call(&self, args: PathArgs) -> Result<Values, FsError> {
        let mut names = fs::read_dir(&args.path)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<io::Result<Vec<String>>>()?;
        names.sort();
        Ok(vec![json!(names)])
    }
}

pub struct Stat;

impl Syscall for Stat {
    type Args = PathArgs;

    fn call(&self, args: PathArgs) -> Result<Values, FsError> {
        let st = sys::stat(&args.path)?;
        Ok(vec![stat_value(&st)?])
    }
}

pub struct Lstat;

impl Syscall for Lstat {
    type Args = PathArgs;

    fn call(&self, args: PathArgs) -> Result<Values, FsError> {
        let st = sys::lstat(&args.path)?;
        Ok(vec![stat_value(&st)?])
    }
}

pub struct Fstat;

impl Syscall for Fstat {
    type Args = FdArgs;

    fn call(&self, args: FdArgs) -> Result<Values, FsError> {
        let st = sys::fstat(args.fd)?;
        Ok(vec![stat_value(&st)?])
    }
}

pub struct Chmod;

impl Syscall for Chmod {
    type Args = ChmodArgs;

    fn call(&self, args: ChmodArgs) -> Result<Values, FsError> {
        fs::set_permissions(&args.path, Permissions::from_mode(args.mode))?;
        Ok(vec![])
    }
}

pub struct Chown;

impl Syscall for Chown {
    type Args = ChownArgs;

    fn call(&self, args: ChownArgs) -> Result<Values, FsError> {
        let uid = owner_id(args.uid, "uid")?;
        let gid = owner_id(args.gid, "gid")?;
        std::os::unix::fs::chown(&args.path, uid, gid)?;
        Ok(vec![])
    }
}

pub struct Link;

impl Syscall for Link {
    type Args = LinkArgs;

    fn call(&self, args: LinkArgs) -> Result<Values, FsError> {
        fs::hard_link(&args.path, &args.link)?;
        Ok(vec![])
    }
}

pub struct Unlink;

impl Syscall for Unlink {
    type Args = PathArgs;

    fn call(&self, args: PathArgs) -> Result<Values, FsError> {
        fs::remove_file(&args.path)?;
        Ok(vec![])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::MetadataExt;

    fn run<H: Handler>(handler: &H, body: Value) -> Result<Values, FsError> {
        let body = serde_json::to_vec(&body).unwrap();
        handler.handle(&Decoder::new(&body))
    }

    #[test]
    fn test_read_returns_full_buffer() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("short");
        fs::write(&path, "abc").unwrap();

        let fd = run(&Open, json!({"path": path, "flags": libc::O_RDONLY, "perm": 0})).unwrap()[0]
            .as_i64()
            .unwrap();
        let values = run(&Read, json!({"fd": fd, "length": 6})).unwrap();
        assert_eq!(values[0], 3);
        let buf = B64.decode(values[1].as_str().unwrap()).unwrap();
        assert_eq!(buf, b"abc\0\0\0");
        run(&Close, json!({"fd": fd})).unwrap();
    }

    #[test]
    fn test_read_length_over_limit_fails_before_reading() {
        // fd -1 would give EBADF if the read were attempted.
        for length in [MAX_READ_LENGTH as u64 + 1, u64::MAX] {
            let err = run(&Read, json!({"fd": -1, "length": length})).unwrap_err();
            assert!(matches!(err, FsError::Decode(_)), "{length}");
            assert!(err.to_string().contains("exceeds the limit"));
        }

        let err = run(&Read, json!({"fd": -1, "length": MAX_READ_LENGTH})).unwrap_err();
        assert!(matches!(err, FsError::Native(ref e) if e.raw_os_error() == Some(libc::EBADF)));
    }

    #[test]
    fn test_write_ignores_position() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("out");
        let fd = run(
            &Open,
            json!({"path": path, "flags": libc::O_WRONLY | libc::O_CREAT, "perm": 0o644}),
        )
        .unwrap()[0]
            .as_i64()
            .unwrap();

        run(&Write, json!({"fd": fd, "buffer": "one", "position": 100})).unwrap();
        run(&Write, json!({"fd": fd, "buffer": "two", "offset": 0, "length": 1})).unwrap();
        run(&Close, json!({"fd": fd})).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "onetwo");
    }

    #[test]
    fn test_mkdir_applies_permission_bits() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("d");
        run(&Mkdir, json!({"path": dir, "perm": 0o700})).unwrap();
        assert_eq!(fs::metadata(&dir).unwrap().mode() & 0o777, 0o700);

        let err = run(&Mkdir, json!({"path": dir, "perm": 0o700})).unwrap_err();
        assert!(matches!(err, FsError::Native(ref e) if e.raw_os_error() == Some(libc::EEXIST)));
    }

    #[test]
    fn test_rmdir_refuses_non_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("d");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("f"), "x").unwrap();

        let err = run(&Rmdir, json!({"path": dir})).unwrap_err();
        assert!(matches!(err, FsError::Native(_)));

        fs::remove_file(dir.join("f")).unwrap();
        run(&Rmdir, json!({"path": dir})).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_readdir_is_sorted() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["c", "a", "b"] {
            fs::write(tmp.path().join(name), "").unwrap();
        }
        let values = run(&Readdir, json!({"path": tmp.path()})).unwrap();
        assert_eq!(values, vec![json!(["a", "b", "c"])]);

        let empty = tempfile::tempdir().unwrap();
        let values = run(&Readdir, json!({"path": empty.path()})).unwrap();
        assert_eq!(values, vec![json!([])]);
    }

    #[test]
    fn test_chmod_changes_mode() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("f");
        fs::write(&path, "").unwrap();

        run(&Chmod, json!({"path": path, "mode": 0o640})).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().mode() & 0o777, 0o640);
    }

    #[test]
    fn test_chown_to_current_owner() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("f");
        fs::write(&path, "").unwrap();
        let meta = fs::metadata(&path).unwrap();

        run(&Chown, json!({"path": path, "uid": meta.uid(), "gid": meta.gid()})).unwrap();
        run(&Chown, json!({"path": path, "uid": -1, "gid": -1})).unwrap();

        let err = run(&Chown, json!({"path": path, "uid": 1u64 << 40, "gid": -1})).unwrap_err();
        assert!(matches!(err, FsError::Decode(_)));
    }

    #[test]
    fn test_link_and_unlink() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("f");
        let link = tmp.path().join("g");
        fs::write(&path, "shared").unwrap();

        run(&Link, json!({"path": path, "link": link})).unwrap();
        assert_eq!(fs::metadata(&path).unwrap().nlink(), 2);
        assert_eq!(fs::read_to_string(&link).unwrap(), "shared");

        run(&Unlink, json!({"path": path})).unwrap();
        assert!(!path.exists());
        assert_eq!(fs::metadata(&link).unwrap().nlink(), 1);
    }

    #[test]
    fn test_stat_family_agree_with_metadata() {
        let tmp = tempfile::tempdir().unwrap();
        let meta = fs::metadata(tmp.path()).unwrap();

        let by_path = run(&Stat, json!({"path": tmp.path()})).unwrap();
        let by_link = run(&Lstat, json!({"path": tmp.path()})).unwrap();
        let fd = run(&Open, json!({"path": tmp.path(), "flags": libc::O_RDONLY, "perm": 0}))
            .unwrap()[0]
            .as_i64()
            .unwrap();
        let by_fd = run(&Fstat, json!({"fd": fd})).unwrap();
        run(&Close, json!({"fd": fd})).unwrap();

        for values in [by_path, by_link, by_fd] {
            let st = &values[0];
            assert_eq!(st["dir"], true);
            assert_eq!(st["size"], meta.size());
            assert_eq!(st["mode"], meta.mode());
            assert_eq!(st["ino"], meta.ino());
            assert_eq!(st["mtimeMs"], meta.mtime() * 1000);
        }
    }
}
