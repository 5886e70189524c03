//! Collision-safe move into a destination directory.
//!
//! The incoming file always keeps its name. If the destination already holds an
//! entry with that name, the *occupant* is renamed aside first (see `make_unique`),
//! then the incoming file is renamed into the freed slot. Only a native rename is
//! used; cross-filesystem moves fail with `SorterError::CrossDevice`. A missing
//! destination directory is reported as `SorterError::DestinationMissing` before
//! anything is touched.
//!
//! If the second rename fails the occupant stays under its new name and the
//! incoming file stays at the source path; a later pass picks it up again.

use anyhow::Result;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::SorterError;

use super::helpers::{build_message, io_error_with_help, is_cross_device};
use super::unique::{entry_exists, make_unique};

/// What a successful move did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Final location of the incoming file (`dest_dir/name`).
    pub dest: PathBuf,
    /// New location of the previous occupant, if one was renamed aside.
    pub displaced: Option<PathBuf>,
}

/// Move `source` into `dest_dir` under `name`, renaming any existing occupant aside.
pub fn move_file(dest_dir: &Path, source: &Path, name: &OsStr) -> Result<MoveOutcome> {
    ensure_destination(dest_dir)?;
    fs::symlink_metadata(source).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SorterError::SourceNotFound(source.to_path_buf()).into(),
        _ => io_error_with_help("stat source", source)(e),
    })?;

    let dest = dest_dir.join(name);
    let mut displaced = None;

    if entry_exists(&dest) {
        let unique = make_unique(dest_dir, name);
        let aside = dest_dir.join(&unique);
        fs::rename(&dest, &aside).map_err(|e| map_rename_error("rename occupant", &dest, &aside, e))?;
        info!(
            from = %dest.display(),
            to = %aside.display(),
            "Renamed existing file to make room"
        );
        displaced = Some(aside);
    }

    fs::rename(source, &dest).map_err(|e| map_rename_error("move", source, &dest, e))?;
    debug!(src = %source.display(), dest = %dest.display(), "Renamed into destination");

    Ok(MoveOutcome { dest, displaced })
}

/// Fails with `DestinationMissing` unless `dest_dir` is an existing directory.
pub fn ensure_destination(dest_dir: &Path) -> Result<()> {
    if dest_dir.is_dir() {
        Ok(())
    } else {
        Err(SorterError::DestinationMissing(dest_dir.to_path_buf()).into())
    }
}

fn map_rename_error(op: &str, from: &Path, to: &Path, e: io::Error) -> anyhow::Error {
    if is_cross_device(&e) {
        return SorterError::CrossDevice {
            src: from.to_path_buf(),
            dest: to.to_path_buf(),
        }
        .into();
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => SorterError::PermissionDenied {
            path: from.to_path_buf(),
            context: build_message(op, from, &e),
        }
        .into(),
        _ => io_error_with_help(op, from)(e),
    }
}
