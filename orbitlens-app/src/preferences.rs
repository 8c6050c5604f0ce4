use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Window geometry remembered between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppPreferences {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
}

fn default_window_width() -> f32 {
    1280.0
}
fn default_window_height() -> f32 {
    820.0
}

impl Default for AppPreferences {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
        }
    }
}

impl AppPreferences {
    /// Load preferences from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if !path.exists() {
            debug!("No preferences file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(prefs) => {
                    info!("Loaded preferences from {}", path.display());
                    return prefs;
                }
                Err(e) => error!("Failed to parse preferences: {e}"),
            },
            Err(e) => error!("Failed to read preferences file: {e}"),
        }
        Self::default()
    }

    fn from_json(json: &str) -> serde_json::Result<Self> {
        let mut prefs: Self = serde_json::from_str(json)?;
        if !(prefs.window_width >= 200.0 && prefs.window_height >= 150.0) {
            prefs = Self::default();
        }
        Ok(prefs)
    }

    /// Persist preferences to disk.
    pub fn save(&self) {
        let path = config_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write preferences: {e}");
                } else {
                    debug!("Saved preferences");
                }
            }
            Err(e) => error!("Failed to serialize preferences: {e}"),
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("preferences.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let prefs = AppPreferences::from_json(r#"{"window_width": 900.0}"#).unwrap();
        assert_eq!(prefs.window_width, 900.0);
        assert_eq!(prefs.window_height, default_window_height());
    }

    #[test]
    fn degenerate_geometry_resets() {
        let prefs = AppPreferences::from_json(r#"{"window_width": 0.0, "window_height": 10.0}"#)
            .unwrap();
        assert_eq!(prefs, AppPreferences::default());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppPreferences::from_json("{ window_width").is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let prefs = AppPreferences {
            window_width: 1024.0,
            window_height: 700.0,
        };
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(AppPreferences::from_json(&json).unwrap(), prefs);
    }
}
