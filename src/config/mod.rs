//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use crate::classify::ExtensionTables;
pub use paths::{
    default_config_path, default_destinations, default_source_dir,
    path_has_symlink_ancestor,
};
pub use types::{Config, Destinations, LogLevel};
pub use validate::validate_and_normalize;
pub use xml::{create_template_config, load_config_from_xml_path, load_or_init, LoadResult};

/// Environment variable that points at an explicit config file (or a directory holding one).
pub const CONFIG_ENV: &str = "DOWNLOAD_SORTER_CONFIG";

/// File name used inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.xml";

/// Folder names created under the user's media folders by the default layout.
pub const IMAGE_DIR_NAME: &str = "Downloaded Photos";
pub const VIDEO_DIR_NAME: &str = "Downloaded Videos";
pub const SFX_DIR_NAME: &str = "Downloaded Sounds";
pub const MUSIC_DIR_NAME: &str = "Downloaded Music";
pub const DOCUMENT_DIR_NAME: &str = "Downloaded Documents";
