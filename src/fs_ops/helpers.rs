//! I/O helper utilities.
//!
//! Small adapters that enrich io::Error with the operation, the path and a
//! platform-aware hint, for use with `map_err` in anyhow and io code paths.
//!
//! Usage:
//!   fs::rename(a, b).map_err(io_error_with_help("rename occupant", a))?;
//!   fs::read_dir(dir).map_err(io_error_with_help_io("read directory", dir))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Hint for a raw OS error code, if we know one.
#[cfg(unix)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
        libc::EXDEV => Some("cross-filesystem; a plain rename cannot move this file"),
        libc::EBUSY => Some("resource busy; ensure no other process is writing"),
        libc::ENOENT => Some("path not found; verify it exists"),
        libc::EEXIST => Some("already exists"),
        libc::ENOSPC => Some("insufficient space on device"),
        libc::EROFS => Some("read-only filesystem"),
        libc::ENAMETOOLONG => Some("filename or path too long"),
        libc::ENOTDIR => Some("a path component is not a directory"),
        _ => None,
    }
}

#[cfg(windows)]
fn os_hint(code: i32) -> Option<&'static str> {
    match code {
        5 => Some("access denied; check permissions"),
        17 => Some("not same device; cross-filesystem move"),
        32 => Some("sharing violation; file is in use"),
        2 | 3 => Some("path not found; verify it exists"),
        80 | 183 => Some("already exists"),
        112 => Some("insufficient disk space"),
        206 => Some("filename or path too long"),
        _ => None,
    }
}

#[cfg(not(any(unix, windows)))]
fn os_hint(_code: i32) -> Option<&'static str> {
    None
}

fn kind_hint(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; verify it exists"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        _ => None,
    }
}

/// Format "op 'path': error; hint [os code: n]".
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => os_hint(code),
        None => kind_hint(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str("; ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// True if the error is the platform's "cross-device link" failure.
pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    #[cfg(unix)]
    {
        e.raw_os_error() == Some(libc::EXDEV)
    }
    #[cfg(windows)]
    {
        e.raw_os_error() == Some(17)
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = e;
        false
    }
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
