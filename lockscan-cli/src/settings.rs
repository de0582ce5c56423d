use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use lockscan_core::markup::Markup;
use lockscan_db::models::LockSize;

pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lock_size: LockSize,
    pub markup: Markup,
    /// Directory holding one `<YYYY-MM-DD>.json` feed per day.
    pub feed_dir: PathBuf,
    pub interval_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lock_size: LockSize::default(),
            markup: Markup::default(),
            feed_dir: PathBuf::from("feeds"),
            interval_secs: 60,
        }
    }
}

/// A missing file means defaults; a malformed one is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read settings {:?}", path))?;
    let settings: Settings = serde_json::from_str(&json)
        .with_context(|| format!("Invalid settings {:?}", path))?;
    Ok(settings)
}

pub fn save_settings(settings: &Settings, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)
        .with_context(|| format!("Cannot write settings {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.lock_size.get(), 4);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            lock_size: LockSize::new(6).unwrap(),
            markup: Markup::Html,
            ..Settings::default()
        };
        save_settings(&settings, &path).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "lock_size": 5 }"#).unwrap();
        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.lock_size.get(), 5);
        assert_eq!(settings.interval_secs, 60);
    }

    #[test]
    fn test_rejects_zero_lock_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "lock_size": 0 }"#).unwrap();
        assert!(load_settings(&path).is_err());
    }
}
