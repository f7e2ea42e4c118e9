//! User preferences, persisted as JSON in the config directory.

use hookcore::storage::{config_dir, load_json, save_json, StorageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub blue_sky_mode: bool,
    pub stay_on_top: bool,
    /// Directory the open dialog starts in.
    pub last_dir: Option<PathBuf>,
}

impl Preferences {
    pub fn default_path() -> PathBuf {
        config_dir("filehook").join("preferences.json")
    }

    /// Load from `path`; a missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        match load_json(path) {
            Ok(prefs) => prefs,
            Err(StorageError::NotFound(_)) => Self::default(),
            Err(e) => {
                log::warn!("ignoring preferences at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) {
        if let Err(e) = save_json(self, path) {
            log::warn!("failed to save preferences: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("filehook_prefs_{}", uuid::Uuid::new_v4().simple()))
            .join("preferences.json")
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        assert_eq!(Preferences::load(&scratch_path()), Preferences::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = scratch_path();
        let prefs = Preferences {
            blue_sky_mode: true,
            stay_on_top: true,
            last_dir: Some(PathBuf::from("/books")),
        };
        prefs.save(&path);
        assert_eq!(Preferences::load(&path), prefs);
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{ "blue_sky_mode": true }"#).unwrap();

        let prefs = Preferences::load(&path);
        assert!(prefs.blue_sky_mode);
        assert!(!prefs.stay_on_top);
        assert_eq!(prefs.last_dir, None);

        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let path = scratch_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "garbage").unwrap();
        assert_eq!(Preferences::load(&path), Preferences::default());
        std::fs::remove_dir_all(path.parent().unwrap()).unwrap();
    }
}
