//! Directory scanner.
//! Lists the direct entries of the watched folder on demand. Nothing is cached:
//! every call reads the directory again.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::fs_ops::io_error_with_help_io;

/// One direct entry of the source folder, as seen during a single pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Raw file name, used for the move itself.
    pub file_name: OsString,
    /// Lossy UTF-8 form of the name, used for classification and logs.
    pub name: String,
    pub path: PathBuf,
    /// Size in bytes (symlinks are not followed).
    pub size: u64,
}

/// Lazily yield the direct (non-recursive) entries of `source_dir`.
///
/// Directories are included; filtering happens downstream by name. An entry that
/// disappears between listing and stat is reported as an error for that entry only.
pub fn scan(source_dir: &Path) -> impl Iterator<Item = io::Result<FileEntry>> + use<> {
    WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
        .into_iter()
        .map(|res| {
            let entry = res.map_err(io::Error::from)?;
            let meta = entry
                .metadata()
                .map_err(io::Error::from)
                .map_err(io_error_with_help_io("stat entry", entry.path()))?;
            let file_name = entry.file_name().to_os_string();
            Ok(FileEntry {
                name: file_name.to_string_lossy().into_owned(),
                file_name,
                size: meta.len(),
                path: entry.into_path(),
            })
        })
}
