//! Default path helpers and symlink checks.
//! Determines OS-appropriate config and media paths and detects symlinked ancestors for safety.

use anyhow::{anyhow, Context, Result};
use dirs::{audio_dir, config_dir, document_dir, download_dir, home_dir, picture_dir, video_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::Destinations;
use super::{
    CONFIG_ENV, CONFIG_FILE_NAME, DOCUMENT_DIR_NAME, IMAGE_DIR_NAME, MUSIC_DIR_NAME,
    SFX_DIR_NAME, VIDEO_DIR_NAME,
};

const APP_DIR: &str = "download_sorter";

/// Config file path in use.
///
/// `DOWNLOAD_SORTER_CONFIG` wins when set: relative values are resolved against the
/// current directory, and a directory value means `<dir>/config.xml`. Otherwise the
/// platform config dir is used.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(raw) = env::var_os(CONFIG_ENV) {
        let mut p = PathBuf::from(raw);
        if p.as_os_str().is_empty() {
            return Err(anyhow!("{CONFIG_ENV} is set but empty"));
        }
        if p.is_relative() {
            let cwd = env::current_dir().context("resolve current directory")?;
            p = cwd.join(p);
        }
        if p.is_dir() {
            p.push(CONFIG_FILE_NAME);
        }
        return Ok(p);
    }

    let base = config_dir()
        .or_else(|| home_dir().map(|h| h.join(".config")))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no HOME?)"))?;
    Ok(base.join(APP_DIR).join(CONFIG_FILE_NAME))
}

/// The user's downloads folder.
pub fn default_source_dir() -> PathBuf {
    download_dir()
        .or_else(|| home_dir().map(|h| h.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

fn media_dir(found: Option<PathBuf>, home_fallback: &str) -> PathBuf {
    found
        .or_else(|| home_dir().map(|h| h.join(home_fallback)))
        .unwrap_or_else(|| PathBuf::from(home_fallback))
}

/// Default category folders under the user's media directories.
/// Music sits inside the sound-effects folder.
pub fn default_destinations() -> Destinations {
    let sounds = media_dir(audio_dir(), "Music").join(SFX_DIR_NAME);
    Destinations {
        image: media_dir(picture_dir(), "Pictures").join(IMAGE_DIR_NAME),
        video: media_dir(video_dir(), "Videos").join(VIDEO_DIR_NAME),
        music: sounds.join(MUSIC_DIR_NAME),
        sfx: sounds,
        document: media_dir(document_dir(), "Documents").join(DOCUMENT_DIR_NAME),
    }
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
