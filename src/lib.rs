//! Core library for `download_sorter`.
//!
//! Watches a source directory and moves files into per-category destination
//! directories, keyed on file extension. The pieces are kept small and mostly pure:
//! - `classify`: extension tables and the ordered routing table
//! - `fs_ops`: unique-name resolution and the collision-safe mover
//! - `scan`: direct-entry listing of the source directory
//! - `sorter`: one scan-and-route pass with per-entry error isolation
//! - `watch`: the notification-driven loop that triggers passes

pub mod classify;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod scan;
pub mod shutdown;
pub mod sorter;
pub mod watch;

pub use classify::{AudioRoute, Category, ExtensionTable, RoutingTable};
pub use config::{
    default_config_path, load_config_from_xml_path, path_has_symlink_ancestor,
    validate_and_normalize, Config, Destinations, ExtensionTables, LogLevel,
};
pub use errors::SorterError;
pub use fs_ops::{make_unique, move_file};
pub use scan::{scan, FileEntry};
pub use sorter::{PassReport, Sorter};
pub use watch::{WatchLoop, WatchState};
