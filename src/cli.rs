//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Every path flag overrides the matching config-file value.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::types::{Config, LogLevel};

/// Watch a downloads folder and sort new files into category folders.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Watch a folder and sort files into category folders by extension"
)]
pub struct Args {
    /// Explicit config file (otherwise $DOWNLOAD_SORTER_CONFIG or the platform default).
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Folder to watch.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub source_dir: Option<PathBuf>,

    /// Destination for images.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub image_dir: Option<PathBuf>,

    /// Destination for videos.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub video_dir: Option<PathBuf>,

    /// Destination for short audio clips and files named with "SFX".
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub sfx_dir: Option<PathBuf>,

    /// Destination for other audio.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub music_dir: Option<PathBuf>,

    /// Destination for documents.
    #[arg(long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub document_dir: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(
        long,
        value_name = "LEVEL",
        value_parser = LogLevel::from_str,
        help = "Set log level: quiet, normal, info, debug"
    )]
    pub log_level: Option<LogLevel>,

    /// Also append logs to this file.
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Dry-run: log planned moves but do not modify the filesystem.
    #[arg(long, help = "Show what would be moved, but do not modify files")]
    pub dry_run: bool,

    /// Run a single pass over the source folder and exit instead of watching.
    #[arg(long, help = "Sort the source folder once and exit")]
    pub once: bool,

    /// Print where the config file is looked up, then exit.
    #[arg(long, help = "Print the config file location and exit")]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config value).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.clone()
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.source_dir {
            cfg.source_dir = p.clone();
        }
        let dest = &mut cfg.destinations;
        for (flag, slot) in [
            (&self.image_dir, &mut dest.image),
            (&self.video_dir, &mut dest.video),
            (&self.sfx_dir, &mut dest.sfx),
            (&self.music_dir, &mut dest.music),
            (&self.document_dir, &mut dest.document),
        ] {
            if let Some(p) = flag {
                *slot = p.clone();
            }
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(p) = &self.log_file {
            cfg.log_file = Some(p.clone());
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
