//! Extension-based classification and routing.
//!
//! A file is classified by name only: the lower-cased name is tested against each
//! category's suffix table in a fixed order (Audio, Video, Image, Document) and the
//! first hit wins. Routing then maps the category to a destination directory; Audio
//! is split between sound effects and music by size and name.
//!
//! # Examples
//!
//! ```
//! use download_sorter::classify::{Category, ExtensionTables, RoutingTable};
//! use download_sorter::config::Destinations;
//!
//! let table = RoutingTable::new(&ExtensionTables::default(), &Destinations::default(), 10_000_000);
//! assert_eq!(table.classify("photo.JPG"), Category::Image);
//! assert_eq!(table.classify("notes.txt"), Category::Unmatched);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Destinations;

/// Size below which an audio file is treated as a sound effect.
pub const SFX_SIZE_THRESHOLD_DEFAULT: u64 = 10_000_000;

/// Literal marker that forces an audio file into the sound-effects folder.
pub const SFX_NAME_MARKER: &str = "SFX";

/// Broad file category used to pick a destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Audio,
    Video,
    Image,
    Document,
    /// No table matched; the file stays where it is.
    Unmatched,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Audio => "audio",
            Category::Video => "video",
            Category::Image => "image",
            Category::Document => "document",
            Category::Unmatched => "unmatched",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which audio folder a file lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioRoute {
    Sfx,
    Music,
}

/// Pick the audio folder: small files or names containing "SFX" (case-sensitive)
/// are sound effects, everything else is music.
pub fn route_audio(name: &str, size: u64, threshold: u64) -> AudioRoute {
    if size < threshold || name.contains(SFX_NAME_MARKER) {
        AudioRoute::Sfx
    } else {
        AudioRoute::Music
    }
}

/// Immutable set of lowercase suffixes (each with its leading dot).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtensionTable {
    suffixes: Vec<String>,
}

impl ExtensionTable {
    /// Build a table, normalizing each entry to lowercase with a leading dot.
    /// Blank entries and duplicates are dropped; order is preserved.
    pub fn from_list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut suffixes: Vec<String> = Vec::new();
        for item in items {
            let trimmed = item.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut ext = trimmed.to_lowercase();
            if !ext.starts_with('.') {
                ext.insert(0, '.');
            }
            if !suffixes.contains(&ext) {
                suffixes.push(ext);
            }
        }
        Self { suffixes }
    }

    /// Parse a comma/whitespace separated list such as ".jpg, .png .gif".
    pub fn parse(list: &str) -> Self {
        Self::from_list(list.split(|c: char| c == ',' || c.is_whitespace()))
    }

    /// True if `lowered_name` ends with any suffix. The caller lower-cases once.
    pub fn matches_lowered(&self, lowered_name: &str) -> bool {
        self.suffixes.iter().any(|s| lowered_name.ends_with(s.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.suffixes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.suffixes.iter().map(String::as_str)
    }
}

/// The four recognized suffix tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionTables {
    pub audio: ExtensionTable,
    pub video: ExtensionTable,
    pub image: ExtensionTable,
    pub document: ExtensionTable,
}

impl Default for ExtensionTables {
    fn default() -> Self {
        Self {
            audio: ExtensionTable::from_list([".m4a", ".flac", ".mp3", ".wav", ".wma", ".aac"]),
            video: ExtensionTable::from_list([
                ".webm", ".mpg", ".mp2", ".mpeg", ".mpe", ".mpv", ".ogg", ".mp4", ".mp4v", ".m4v",
                ".avi", ".wmv", ".mov", ".qt", ".flv", ".swf", ".avchd",
            ]),
            image: ExtensionTable::from_list([
                ".jpg", ".jpeg", ".jpe", ".jif", ".jfif", ".jfi", ".png", ".gif", ".webp", ".tiff",
                ".tif", ".psd", ".raw", ".arw", ".cr2", ".nrw", ".k25", ".bmp", ".dib", ".heif",
                ".heic", ".ind", ".indd", ".indt", ".jp2", ".j2k", ".jpf", ".jpx", ".jpm", ".mj2",
                ".svg", ".svgz", ".ai", ".eps", ".ico",
            ]),
            document: ExtensionTable::from_list([
                ".doc", ".docx", ".odt", ".pdf", ".xls", ".xlsx", ".ppt", ".pptx",
            ]),
        }
    }
}

/// Where a matched category sends its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestinationRule {
    Fixed(PathBuf),
    AudioSplit {
        sfx: PathBuf,
        music: PathBuf,
        threshold: u64,
    },
}

impl DestinationRule {
    /// Resolve the directory for a file. Evaluated once per entry.
    pub fn resolve(&self, name: &str, size: u64) -> &Path {
        match self {
            DestinationRule::Fixed(dir) => dir,
            DestinationRule::AudioSplit {
                sfx,
                music,
                threshold,
            } => match route_audio(name, size, *threshold) {
                AudioRoute::Sfx => sfx,
                AudioRoute::Music => music,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct Route {
    category: Category,
    table: ExtensionTable,
    rule: DestinationRule,
}

/// Ordered (category, suffix table, destination rule) list. Checking order breaks ties
/// for names that match more than one table.
#[derive(Debug, Clone)]
pub struct RoutingTable {
    routes: Vec<Route>,
}

impl RoutingTable {
    pub fn new(tables: &ExtensionTables, dest: &Destinations, sfx_threshold: u64) -> Self {
        let routes = vec![
            Route {
                category: Category::Audio,
                table: tables.audio.clone(),
                rule: DestinationRule::AudioSplit {
                    sfx: dest.sfx.clone(),
                    music: dest.music.clone(),
                    threshold: sfx_threshold,
                },
            },
            Route {
                category: Category::Video,
                table: tables.video.clone(),
                rule: DestinationRule::Fixed(dest.video.clone()),
            },
            Route {
                category: Category::Image,
                table: tables.image.clone(),
                rule: DestinationRule::Fixed(dest.image.clone()),
            },
            Route {
                category: Category::Document,
                table: tables.document.clone(),
                rule: DestinationRule::Fixed(dest.document.clone()),
            },
        ];
        Self { routes }
    }

    /// Classify a bare file name.
    pub fn classify(&self, name: &str) -> Category {
        self.find(&name.to_lowercase())
            .map(|r| r.category)
            .unwrap_or(Category::Unmatched)
    }

    /// Classify and pick the destination directory. `None` means unmatched.
    pub fn route(&self, name: &str, size: u64) -> Option<(Category, &Path)> {
        let route = self.find(&name.to_lowercase())?;
        Some((route.category, route.rule.resolve(name, size)))
    }

    fn find(&self, lowered: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.table.matches_lowered(lowered))
    }
}
