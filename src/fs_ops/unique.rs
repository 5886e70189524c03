//! Unique-name resolution inside a destination directory.
//!
//! Policy: append "(n)" directly before the extension, counting from 1, until the
//! name is free. Examples:
//! - "report.pdf" -> "report(1).pdf", "report(2).pdf", ...
//! - ".env" -> ".env(1)"
//! - "archive.tar.gz" -> "archive.tar(1).gz"
//!
//! The answer reflects the directory at the moment of the check only; two processes
//! resolving the same name concurrently can both get the same candidate.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;
use tracing::trace;

/// True if anything (file, dir, or dangling symlink) occupies `path`.
pub fn entry_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Return `name` if it is free in `dest_dir`, else the first free "stem(n).ext".
pub fn make_unique(dest_dir: &Path, name: &OsStr) -> OsString {
    if !entry_exists(&dest_dir.join(name)) {
        return name.to_os_string();
    }

    let base = Path::new(name);
    let stem: OsString = base
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext: Option<&OsStr> = base.extension();

    let mut counter: u64 = 1;
    loop {
        let candidate = with_counter(&stem, ext, counter);
        if !entry_exists(&dest_dir.join(&candidate)) {
            return candidate;
        }
        if counter % 100 == 0 {
            trace!(name = ?name, dir = %dest_dir.display(), counter, "unique name: still colliding");
        }
        counter += 1;
    }
}

fn with_counter(stem: &OsStr, ext: Option<&OsStr>, counter: u64) -> OsString {
    let mut out = OsString::with_capacity(stem.len() + 8);
    out.push(stem);
    out.push(format!("({counter})"));
    if let Some(e) = ext {
        out.push(".");
        out.push(e);
    }
    out
}
