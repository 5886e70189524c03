//! One scan-and-route pass over the source folder.
//!
//! For every direct entry: classify by name, pick the destination (audio is split by
//! size/name), and move it with the collision-safe mover. Failures are isolated per
//! entry: they are logged and counted and the pass carries on with the next entry.

use anyhow::Result;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

use crate::classify::{Category, RoutingTable};
use crate::config::Config;
use crate::errors::SorterError;
use crate::fs_ops::{ensure_destination, move_file};
use crate::scan::{scan, FileEntry};

/// Counters for a single pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    pub scanned: usize,
    pub moved: usize,
    pub unmatched: usize,
    pub failed: usize,
}

impl AddAssign for PassReport {
    fn add_assign(&mut self, rhs: Self) {
        self.scanned += rhs.scanned;
        self.moved += rhs.moved;
        self.unmatched += rhs.unmatched;
        self.failed += rhs.failed;
    }
}

/// Result of handling one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryOutcome {
    /// No table matched; the entry was not touched.
    Unmatched,
    Moved { category: Category, dest: PathBuf },
    /// Dry-run: the move that would have happened.
    Planned { category: Category, dest: PathBuf },
}

/// Immutable pass runner built once from the config.
#[derive(Debug, Clone)]
pub struct Sorter {
    source_dir: PathBuf,
    routes: RoutingTable,
    dry_run: bool,
}

impl Sorter {
    pub fn new(cfg: &Config) -> Self {
        Self {
            source_dir: cfg.source_dir.clone(),
            routes: cfg.routing_table(),
            dry_run: cfg.dry_run,
        }
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Scan the source folder once and route every entry.
    pub fn run_pass(&self) -> PassReport {
        let mut report = PassReport::default();

        for item in scan(&self.source_dir) {
            let entry = match item {
                Ok(e) => e,
                Err(e) => {
                    report.failed += 1;
                    error!(dir = %self.source_dir.display(), error = %e, "Failed to read source entry");
                    continue;
                }
            };
            report.scanned += 1;

            match self.process_entry(&entry) {
                Ok(EntryOutcome::Unmatched) => {
                    report.unmatched += 1;
                    debug!(name = %entry.name, "No category matched; leaving in place");
                }
                Ok(EntryOutcome::Moved { category, dest }) => {
                    report.moved += 1;
                    info!(
                        category = %category,
                        name = %entry.name,
                        dest = %dest.display(),
                        "Moved {category} file: {}",
                        entry.name
                    );
                }
                Ok(EntryOutcome::Planned { category, dest }) => {
                    report.moved += 1;
                    info!(
                        category = %category,
                        name = %entry.name,
                        dest = %dest.display(),
                        "dry-run: would move {category} file: {}",
                        entry.name
                    );
                }
                Err(e) => {
                    report.failed += 1;
                    let category = self.routes.classify(&entry.name);
                    log_entry_error(&entry, category, &e);
                }
            }
        }

        report
    }

    /// Classify one entry and move it if it matches a category.
    pub fn process_entry(&self, entry: &FileEntry) -> Result<EntryOutcome> {
        let Some((category, dir)) = self.routes.route(&entry.name, entry.size) else {
            return Ok(EntryOutcome::Unmatched);
        };

        if self.dry_run {
            ensure_destination(dir)?;
            return Ok(EntryOutcome::Planned {
                category,
                dest: dir.join(&entry.file_name),
            });
        }

        let outcome = move_file(dir, &entry.path, &entry.file_name)?;
        Ok(EntryOutcome::Moved {
            category,
            dest: outcome.dest,
        })
    }
}

fn log_entry_error(entry: &FileEntry, category: Category, e: &anyhow::Error) {
    match e.downcast_ref::<SorterError>() {
        Some(se) => error!(
            code = se.code(),
            kind = se.kind(),
            category = %category,
            name = %entry.name,
            error = %se,
            "Failed to sort entry"
        ),
        None => error!(
            category = %category,
            name = %entry.name,
            error = %format!("{e:#}"),
            "Failed to sort entry"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Destinations;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    fn layout() -> (TempDir, Config) {
        let td = tempdir().unwrap();
        let root = td.path();
        let dest = Destinations {
            image: root.join("img"),
            video: root.join("vid"),
            sfx: root.join("sfx"),
            music: root.join("music"),
            document: root.join("doc"),
        };
        for (_, p) in dest.named() {
            fs::create_dir_all(p).unwrap();
        }
        fs::create_dir_all(root.join("src")).unwrap();
        let cfg = Config::new(root.join("src"), dest);
        (td, cfg)
    }

    #[test]
    fn process_entry_unmatched_touches_nothing() {
        let (_td, cfg) = layout();
        let p = cfg.source_dir.join("notes.txt");
        fs::write(&p, b"x").unwrap();
        let sorter = Sorter::new(&cfg);
        let entry = scan(&cfg.source_dir).next().unwrap().unwrap();
        assert_eq!(sorter.process_entry(&entry).unwrap(), EntryOutcome::Unmatched);
        assert!(p.exists());
    }

    #[test]
    fn dry_run_plans_without_moving() {
        let (_td, mut cfg) = layout();
        cfg.dry_run = true;
        let p = cfg.source_dir.join("pic.png");
        fs::write(&p, b"x").unwrap();
        let report = Sorter::new(&cfg).run_pass();
        assert_eq!(report.moved, 1);
        assert!(p.exists());
        assert!(!cfg.destinations.image.join("pic.png").exists());
    }

    #[test]
    fn dry_run_still_reports_missing_destination() {
        let (_td, mut cfg) = layout();
        cfg.dry_run = true;
        fs::remove_dir(&cfg.destinations.video).unwrap();
        fs::write(cfg.source_dir.join("clip.mov"), b"x").unwrap();
        let entry = scan(&cfg.source_dir).next().unwrap().unwrap();
        let err = Sorter::new(&cfg).process_entry(&entry).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SorterError>(),
            Some(SorterError::DestinationMissing(_))
        ));
    }

    #[test]
    fn missing_destination_is_isolated() {
        let (_td, cfg) = layout();
        fs::remove_dir(&cfg.destinations.document).unwrap();
        fs::write(cfg.source_dir.join("a.pdf"), b"x").unwrap();
        fs::write(cfg.source_dir.join("b.png"), b"x").unwrap();

        let report = Sorter::new(&cfg).run_pass();
        assert_eq!(report.failed, 1);
        assert_eq!(report.moved, 1);
        assert!(cfg.source_dir.join("a.pdf").exists());
        assert!(cfg.destinations.image.join("b.png").exists());
    }
}
