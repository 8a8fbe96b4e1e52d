use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::recent::RecentList;
use crate::app::infrastructure::error::AppError;

/// Persisted application state: `~/.marknote/settings.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub recent_notebooks: RecentList,

    /// Stamped on every save.
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub last_save_time: Option<DateTime<Local>>,
}

/// Accepts RFC 3339 as well as offset-free ISO-8601 (read as local time).
/// Anything unparseable becomes `None` so the rest of the file still loads.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let Some(raw) = value.as_ref().and_then(|v| v.as_str()) else {
        return Ok(None);
    };
    Ok(parse_timestamp(raw))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Local));
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(naive) => Local.from_local_datetime(&naive).earliest(),
        Err(e) => {
            log::warn!("Ignoring unreadable last_save_time {raw:?}: {e}");
            None
        }
    }
}

impl AppSettings {
    /// Load settings from the fixed per-user location.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    /// Load settings from `path`. Any failure is logged and yields defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings {}: {}. Using defaults.", path.display(), e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No settings at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Failed to read settings {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to the fixed per-user location.
    pub fn save(&mut self) -> Result<(), AppError> {
        self.save_to(&Self::get_config_path())
    }

    /// Save settings to `path`, creating the parent directory if needed.
    pub fn save_to(&mut self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        self.last_save_time = Some(Local::now());
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;

        Ok(())
    }

    /// Move `notebook` to the front of the recent list.
    pub fn remember_notebook(&mut self, notebook: &Path) {
        self.recent_notebooks.touch(notebook);
    }

    /// Get config file path
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".marknote");
        path.push("settings.json");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert!(settings.recent_notebooks.is_empty());
        assert!(settings.last_save_time.is_none());
    }

    #[test]
    fn test_config_path_is_fixed() {
        let path = AppSettings::get_config_path();
        assert!(path.ends_with(".marknote/settings.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut settings = AppSettings::default();
        settings.remember_notebook(Path::new("/notes/a"));
        settings.remember_notebook(Path::new("/notes/b"));
        settings.save_to(&path).unwrap();
        assert!(settings.last_save_time.is_some());

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_json_shape() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let mut settings = AppSettings::default();
        settings.remember_notebook(Path::new("/notes/a"));
        settings.save_to(&path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["recent_notebooks"], serde_json::json!(["/notes/a"]));
        let stamp = value["last_save_time"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamp).is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let loaded = AppSettings::load_from(&dir.path().join("absent.json"));
        assert_eq!(loaded, AppSettings::default());
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{"recent_notebooks": ["/x"]}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.recent_notebooks.len(), 1);
        assert!(settings.last_save_time.is_none());
    }

    #[test]
    fn test_accepts_timestamp_with_offset() {
        let json = r#"{"recent_notebooks": [], "last_save_time": "2023-10-01T12:30:00+08:00"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(settings.last_save_time.is_some());
    }

    #[test]
    fn test_accepts_timestamp_without_offset() {
        let json = r#"{"recent_notebooks": ["/notes/a", "/notes/b"], "last_save_time": "2023-10-01T12:30:00.123456"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.recent_notebooks.len(), 2);
        let stamp = settings.last_save_time.unwrap();
        assert_eq!(stamp.naive_local().to_string(), "2023-10-01 12:30:00.123456");
    }

    #[test]
    fn test_bad_timestamp_keeps_recent_notebooks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"recent_notebooks": ["/notes/a"], "last_save_time": "yesterday"}"#).unwrap();

        let loaded = AppSettings::load_from(&path);
        assert_eq!(loaded.recent_notebooks.len(), 1);
        assert!(loaded.last_save_time.is_none());
    }

    #[test]
    fn test_null_timestamp() {
        let json = r#"{"recent_notebooks": [], "last_save_time": null}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert!(settings.last_save_time.is_none());
    }

    #[test]
    fn test_save_into_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let mut settings = AppSettings::default();
        let err = settings.save_to(&blocker.join("settings.json")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
