use crate::error::{MacTagError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const SETTINGS_DIRNAME: &str = ".mactag";
const SETTINGS_FILENAME: &str = "settings.json";

/// Persisted settings, stored in `<vault>/.mactag/settings.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Write tags whenever a note is saved. Nothing acts on this yet.
    #[serde(default = "default_write_on_save")]
    pub write_on_save: bool,
}

fn default_write_on_save() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            write_on_save: default_write_on_save(),
        }
    }
}

impl Settings {
    /// Load settings from the given directory. Missing fields take their
    /// defaults; a missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(settings_dir: P) -> Result<Self> {
        let path = settings_dir.as_ref().join(SETTINGS_FILENAME);

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).map_err(MacTagError::Io)?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(MacTagError::Serialization)?;
        Ok(settings)
    }

    /// Save the full record to the given directory
    pub fn save<P: AsRef<Path>>(&self, settings_dir: P) -> Result<()> {
        let settings_dir = settings_dir.as_ref();

        if !settings_dir.exists() {
            fs::create_dir_all(settings_dir).map_err(MacTagError::Io)?;
        }

        let path = settings_dir.join(SETTINGS_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(MacTagError::Serialization)?;
        fs::write(path, content).map_err(MacTagError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        assert!(Settings::default().write_on_save);
    }

    #[test]
    fn test_load_missing_settings() {
        let temp = TempDir::new().unwrap();
        let settings = Settings::load(temp.path().join(SETTINGS_DIRNAME)).unwrap();
        assert_eq!(settings, Settings { write_on_save: true });
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(SETTINGS_DIRNAME);

        let settings = Settings {
            write_on_save: false,
        };
        settings.save(&dir).unwrap();

        let loaded = Settings::load(&dir).unwrap();
        assert!(!loaded.write_on_save);
    }

    #[test]
    fn test_partial_record_is_merged_with_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILENAME), r#"{"somethingElse": 3}"#).unwrap();

        let loaded = Settings::load(temp.path()).unwrap();
        assert!(loaded.write_on_save);
    }

    #[test]
    fn test_stored_field_name() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert_eq!(json, r#"{"writeOnSave":true}"#);
    }

    #[test]
    fn test_corrupt_settings_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(SETTINGS_FILENAME), "not json").unwrap();

        let result = Settings::load(temp.path());
        assert!(matches!(result, Err(MacTagError::Serialization(_))));
    }
}
