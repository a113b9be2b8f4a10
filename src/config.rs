//! User settings, persisted as JSON in the OS config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::reschedule::RowMetrics;

/// Persisted user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineSettings {
    /// Pixels per day column.
    pub day_width: f32,
    pub min_day_width: f32,
    pub max_day_width: f32,
    pub bar_height: f32,
    pub row_gap: f32,
    /// Width of the resize hit zone at each bar edge.
    pub handle_width: f32,
    /// Identity used for edit-permission checks.
    pub viewer_id: String,
    /// Project reopened on start-up.
    pub last_project: Option<PathBuf>,
}

impl Default for TimelineSettings {
    fn default() -> Self {
        let metrics = RowMetrics::default();
        Self {
            day_width: 35.0,
            min_day_width: 12.0,
            max_day_width: 80.0,
            bar_height: metrics.bar_height,
            row_gap: metrics.row_gap,
            handle_width: metrics.handle_width,
            viewer_id: "local-user".into(),
            last_project: None,
        }
    }
}

impl TimelineSettings {
    pub fn row_metrics(&self) -> RowMetrics {
        RowMetrics {
            bar_height: self.bar_height,
            row_gap: self.row_gap,
            handle_width: self.handle_width,
        }
    }

    /// Directory holding `settings.json`.
    pub fn config_dir() -> PathBuf {
        match directories::ProjectDirs::from("", "", "ProjectTimeline") {
            Some(dirs) => dirs.config_dir().to_path_buf(),
            None => PathBuf::from("."),
        }
    }

    pub fn default_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load settings; a missing or unreadable file yields the defaults.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(StorageError::Read { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(error = %e, "ignoring unreadable settings");
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path).map_err(|source| StorageError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| StorageError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| StorageError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_files_fill_in_defaults() {
        let settings: TimelineSettings = serde_json::from_str(r#"{ "day_width": 20.0 }"#).unwrap();
        assert_eq!(settings.day_width, 20.0);
        assert_eq!(settings.handle_width, 8.0);
        assert_eq!(settings.viewer_id, "local-user");
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = TimelineSettings::load_or_default(&dir.path().join("nope.json"));
        assert_eq!(settings, TimelineSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = TimelineSettings {
            viewer_id: "alice".into(),
            day_width: 40.0,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(TimelineSettings::load(&path).unwrap(), settings);
    }
}
