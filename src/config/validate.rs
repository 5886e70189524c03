//! Config validation logic.
//! Verifies the watched folder, canonicalizes paths and sanity-checks destinations.
//! Destinations are never created here; a missing one is only reported.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::types::Config;

/// Validate the config and rewrite its paths in canonical form (where they exist).
///
/// - `source_dir` must exist, be a directory and be readable.
/// - A destination that exists must be a directory and must not be `source_dir`.
/// - A destination that does not exist is logged; moves into it fail per entry.
/// - `log_file` is made absolute; one inside `source_dir` is allowed with a warning
///   (the watch loop skips its own writes to it).
pub fn validate_and_normalize(cfg: &mut Config) -> Result<()> {
    ensure_dir_exists_and_is_dir(&cfg.source_dir, "source_dir")?;
    ensure_readable(&cfg.source_dir, "source_dir")?;
    cfg.source_dir = canonical_or_same(&cfg.source_dir);

    let source = cfg.source_dir.clone();
    let dest = &mut cfg.destinations;
    for (name, slot) in [
        ("image_dir", &mut dest.image),
        ("video_dir", &mut dest.video),
        ("sfx_dir", &mut dest.sfx),
        ("music_dir", &mut dest.music),
        ("document_dir", &mut dest.document),
    ] {
        check_destination(slot, name, &source)?;
    }

    if let Some(log) = cfg.log_file.as_mut() {
        *log = canonical_file_path(log);
        if log.starts_with(&cfg.source_dir) {
            warn!(
                "log_file '{}' is inside source_dir; writes to it are ignored by the watcher",
                log.display()
            );
        }
    }

    if cfg.sfx_size_threshold == 0 {
        warn!("sfx_size_threshold is 0; only names containing \"SFX\" will go to sfx_dir");
    }

    info!(
        "Config validated: source='{}' log_file='{}'",
        cfg.source_dir.display(),
        cfg.log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".into())
    );
    Ok(())
}

fn canonical_or_same(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

/// Canonical form of a file path that may not exist yet: the parent is resolved
/// and the file name appended.
fn canonical_file_path(path: &Path) -> PathBuf {
    if path.exists() {
        return canonical_or_same(path);
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            canonical_or_same(parent).join(name)
        }
        (_, Some(name)) => std::env::current_dir()
            .map(|cwd| canonical_or_same(&cwd).join(name))
            .unwrap_or_else(|_| path.to_path_buf()),
        _ => path.to_path_buf(),
    }
}

fn check_destination(slot: &mut PathBuf, name: &str, source: &Path) -> Result<()> {
    if !slot.exists() {
        warn!(
            "{name} does not exist: {}; files for it will fail to move until it is created",
            slot.display()
        );
        return Ok(());
    }
    if !slot.is_dir() {
        error!("{name} exists but isn't a directory: {}", slot.display());
        bail!("{name} exists but isn't a directory: {}", slot.display());
    }
    let real = canonical_or_same(slot);
    if real == source {
        bail!(
            "{name} and source_dir resolve to the same path: '{}'",
            real.display()
        );
    }
    debug!("{name} ok: {}", real.display());
    *slot = real;
    Ok(())
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).with_context(|| {
        format!("Cannot read {name} directory '{}'; check permissions", path.display())
    })?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}
