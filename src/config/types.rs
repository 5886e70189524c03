//! Core configuration types.
//! - Config holds the immutable runtime settings built once at startup.
//! - Destinations names the five target folders.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::classify::{ExtensionTables, RoutingTable, SFX_SIZE_THRESHOLD_DEFAULT};

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// One line per moved file (default)
    #[default]
    Normal,
    /// Per-pass summaries and skipped entries
    Info,
    /// Everything, including raw watch events
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// The five category folders files are routed into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub image: PathBuf,
    pub video: PathBuf,
    /// Short audio clips and anything named with "SFX"
    pub sfx: PathBuf,
    pub music: PathBuf,
    pub document: PathBuf,
}

impl Default for Destinations {
    fn default() -> Self {
        paths::default_destinations()
    }
}

impl Destinations {
    /// (config field name, path) pairs, in a stable order.
    pub fn named(&self) -> [(&'static str, &Path); 5] {
        [
            ("image_dir", self.image.as_path()),
            ("video_dir", self.video.as_path()),
            ("sfx_dir", self.sfx.as_path()),
            ("music_dir", self.music.as_path()),
            ("document_dir", self.document.as_path()),
        ]
    }
}

/// Runtime configuration used by the sorter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Folder being watched
    pub source_dir: PathBuf,
    /// Category folders
    pub destinations: Destinations,
    /// Recognized suffixes per category
    pub extensions: ExtensionTables,
    /// Audio files smaller than this go to the SFX folder
    pub sfx_size_threshold: u64,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, log planned moves but do not modify the filesystem
    pub dry_run: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: paths::default_source_dir(),
            destinations: Destinations::default(),
            extensions: ExtensionTables::default(),
            sfx_size_threshold: SFX_SIZE_THRESHOLD_DEFAULT,
            log_level: LogLevel::Normal,
            log_file: None,
            dry_run: false,
        }
    }
}

impl Config {
    /// Construct a Config with explicit folders; other fields use defaults.
    pub fn new(source_dir: impl Into<PathBuf>, destinations: Destinations) -> Self {
        Self {
            source_dir: source_dir.into(),
            destinations,
            ..Default::default()
        }
    }

    /// Build the ordered routing table from the configured tables and folders.
    pub fn routing_table(&self) -> RoutingTable {
        RoutingTable::new(&self.extensions, &self.destinations, self.sfx_size_threshold)
    }
}
