//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a commented template at the default location if missing.
//!
//! Notes:
//! - This module only reads/writes the config file; directory validation happens elsewhere.
//! - Unknown XML fields are rejected so typos surface at startup.

use anyhow::{bail, Context, Result};
use quick_xml::de::from_str as from_xml_str;
use quick_xml::escape::escape;
use serde::Deserialize;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{default_config_path, default_destinations, default_source_dir, path_has_symlink_ancestor};
use super::types::{Config, Destinations, LogLevel};
use super::CONFIG_ENV;
use crate::classify::{ExtensionTable, ExtensionTables, SFX_SIZE_THRESHOLD_DEFAULT};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    source_dir: Option<String>,
    image_dir: Option<String>,
    video_dir: Option<String>,
    sfx_dir: Option<String>,
    music_dir: Option<String>,
    document_dir: Option<String>,
    log_level: Option<String>,
    log_file: Option<String>,
    #[serde(default, deserialize_with = "de_u64_trimmed_opt")]
    sfx_size_threshold: Option<u64>,
    audio_extensions: Option<String>,
    video_extensions: Option<String>,
    image_extensions: Option<String>,
    document_extensions: Option<String>,
}

// Trims surrounding whitespace before parsing an optional u64.
fn de_u64_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<u64>().map(Some).map_err(serde::de::Error::custom),
    }
}

fn non_empty_path(s: Option<&str>) -> Option<PathBuf> {
    s.map(str::trim).filter(|t| !t.is_empty()).map(PathBuf::from)
}

fn table_or(raw: Option<&str>, fallback: &ExtensionTable) -> ExtensionTable {
    match raw.map(ExtensionTable::parse) {
        Some(t) if !t.is_empty() => t,
        _ => fallback.clone(),
    }
}

// Map XmlConfig -> Config; absent fields keep their defaults.
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    if let Some(p) = non_empty_path(parsed.source_dir.as_deref()) {
        cfg.source_dir = p;
    }
    let dest = &mut cfg.destinations;
    if let Some(p) = non_empty_path(parsed.image_dir.as_deref()) {
        dest.image = p;
    }
    if let Some(p) = non_empty_path(parsed.video_dir.as_deref()) {
        dest.video = p;
    }
    if let Some(p) = non_empty_path(parsed.sfx_dir.as_deref()) {
        dest.sfx = p;
    }
    if let Some(p) = non_empty_path(parsed.music_dir.as_deref()) {
        dest.music = p;
    }
    if let Some(p) = non_empty_path(parsed.document_dir.as_deref()) {
        dest.document = p;
    }

    cfg.log_file = non_empty_path(parsed.log_file.as_deref());
    if let Some(s) = parsed.log_level.as_deref()
        && !s.trim().is_empty()
    {
        cfg.log_level = s
            .parse::<LogLevel>()
            .map_err(anyhow::Error::msg)
            .context("log_level")?;
    }
    if let Some(t) = parsed.sfx_size_threshold {
        cfg.sfx_size_threshold = t;
    }

    let defaults = ExtensionTables::default();
    cfg.extensions = ExtensionTables {
        audio: table_or(parsed.audio_extensions.as_deref(), &defaults.audio),
        video: table_or(parsed.video_extensions.as_deref(), &defaults.video),
        image: table_or(parsed.image_extensions.as_deref(), &defaults.image),
        document: table_or(parsed.document_extensions.as_deref(), &defaults.document),
    };

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("invalid value in '{}'", path.display()))
}

/// Outcome of looking for a config file at startup.
#[derive(Debug)]
pub enum LoadResult {
    /// A config file was found and parsed.
    Loaded(Box<Config>, PathBuf),
    /// No config existed at the default location; a template was written there.
    CreatedTemplate(PathBuf),
}

/// Load the config in use, or write a template when the default location is empty.
/// An explicit `DOWNLOAD_SORTER_CONFIG` that points at a missing file is an error.
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(Box::new(cfg), path));
    }
    if env::var_os(CONFIG_ENV).is_some() {
        bail!(
            "{CONFIG_ENV} points at '{}', which does not exist",
            path.display()
        );
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

fn template_contents() -> String {
    template_contents_for(&default_source_dir(), &default_destinations())
}

// Paths come from the user's home and may contain '&' or '<'.
fn xml_path(p: &Path) -> String {
    let raw = p.display().to_string();
    escape(raw.as_str()).into_owned()
}

fn template_contents_for(source: &Path, dest: &Destinations) -> String {
    let tables = ExtensionTables::default();
    let join = |t: &ExtensionTable| t.iter().collect::<Vec<_>>().join(" ");
    format!(
        "<!--\n  download_sorter configuration (XML)\n\n  source_dir           -> folder that is watched\n  image_dir .. document_dir -> category folders (must already exist)\n  sfx_size_threshold   -> audio files below this many bytes go to sfx_dir\n  *_extensions         -> suffixes per category, separated by spaces or commas\n  log_level            -> quiet | normal | info | debug\n  log_file             -> optional log file (stdout is always used)\n\n  CLI flags override values here.\n-->\n<config>\n  <source_dir>{}</source_dir>\n  <image_dir>{}</image_dir>\n  <video_dir>{}</video_dir>\n  <sfx_dir>{}</sfx_dir>\n  <music_dir>{}</music_dir>\n  <document_dir>{}</document_dir>\n  <log_level>normal</log_level>\n  <sfx_size_threshold>{}</sfx_size_threshold>\n  <audio_extensions>{}</audio_extensions>\n  <video_extensions>{}</video_extensions>\n  <image_extensions>{}</image_extensions>\n  <document_extensions>{}</document_extensions>\n</config>\n",
        xml_path(source),
        xml_path(&dest.image),
        xml_path(&dest.video),
        xml_path(&dest.sfx),
        xml_path(&dest.music),
        xml_path(&dest.document),
        SFX_SIZE_THRESHOLD_DEFAULT,
        join(&tables.audio),
        join(&tables.video),
        join(&tables.image),
        join(&tables.document),
    )
}

/// Create the template config file and its parent directory.
/// Refuses to write through a symlinked ancestor and never overwrites an existing file.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create config directory '{}'", parent.display()))?;
    }

    let mut opts = fs::OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    let mut file = opts
        .open(path)
        .with_context(|| format!("create config '{}'", path.display()))?;
    file.write_all(template_contents().as_bytes())
        .with_context(|| format!("write config '{}'", path.display()))?;
    file.sync_all().ok();

    info!("Created template config at {}", path.display());
    Ok(())
}
