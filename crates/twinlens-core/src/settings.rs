use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use twinlens_types::{Region, WindowId, WindowPosition, WindowSettings};

use crate::error::SettingsError;

/// On-disk shape of one window's settings
#[derive(Debug, Serialize, Deserialize)]
struct SettingsRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rect_coords: Option<[f64; 4]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    window_position: Option<[i32; 2]>,
}

/// One JSON file per window identity inside a directory
#[derive(Debug, Clone)]
pub struct SettingsStore {
    dir: PathBuf,
}

impl SettingsStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: WindowId) -> PathBuf {
        self.dir.join(format!("settings_{}.json", id.0))
    }

    /// Persisted settings, or the defaults for `id` when nothing usable is stored
    pub fn load(&self, id: WindowId) -> WindowSettings {
        let defaults = WindowSettings::default_for(id);
        let path = self.path_for(id);

        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}, using defaults", path.display(), e);
                } else {
                    tracing::debug!("No settings at {}, using defaults", path.display());
                }
                return defaults;
            }
        };

        let record: SettingsRecord = match serde_json::from_str(&data) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Unreadable settings in {}: {}, using defaults", path.display(), e);
                return defaults;
            }
        };

        WindowSettings {
            region: record
                .rect_coords
                .map(Region::from_coords)
                .unwrap_or(defaults.region),
            window_position: record
                .window_position
                .map(|[x, y]| WindowPosition::new(x, y))
                .unwrap_or(defaults.window_position),
        }
    }

    /// Overwrites the record for `id`
    pub fn save(&self, id: WindowId, settings: &WindowSettings) -> Result<(), SettingsError> {
        let record = SettingsRecord {
            rect_coords: Some(settings.region.to_coords()),
            window_position: Some([settings.window_position.x, settings.window_position.y]),
        };
        let json = serde_json::to_string(&record)?;

        let path = self.path_for(id);
        let io_err = |source| SettingsError::Io {
            path: path.clone(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(io_err)?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)?;

        tracing::info!("Saved window {} settings to {}", id, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());

        let first = store.load(WindowId::FIRST);
        assert_eq!(first.region, Region::new(100.0, 150.0, 645.0, 326.0));
        assert_eq!(first.window_position, WindowPosition::new(100, 100));

        let second = store.load(WindowId::SECOND);
        assert_eq!(second.window_position, WindowPosition::new(150, 100));
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        let settings = WindowSettings {
            region: Region::new(12.5, 40.0, 300.25, 99.0),
            window_position: WindowPosition::new(-20, 640),
        };

        store.save(WindowId::SECOND, &settings).unwrap();

        assert_eq!(store.load(WindowId::SECOND), settings);
        // other window is untouched
        assert_eq!(
            store.load(WindowId::FIRST),
            WindowSettings::default_for(WindowId::FIRST)
        );
    }

    #[test]
    fn test_last_save_wins() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        let mut settings = WindowSettings::default_for(WindowId::FIRST);

        store.save(WindowId::FIRST, &settings).unwrap();
        settings.region.translate(5.0, 5.0);
        store.save(WindowId::FIRST, &settings).unwrap();

        assert_eq!(store.load(WindowId::FIRST), settings);
    }

    #[test]
    fn test_record_uses_legacy_keys() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        store
            .save(WindowId::FIRST, &WindowSettings::default_for(WindowId::FIRST))
            .unwrap();

        let raw = fs::read_to_string(store.path_for(WindowId::FIRST)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["rect_coords"], serde_json::json!([100.0, 150.0, 645.0, 326.0]));
        assert_eq!(value["window_position"], serde_json::json!([100, 100]));
    }

    #[test]
    fn test_reads_integer_coordinates() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path_for(WindowId::SECOND),
            r#"{"rect_coords": [1, 2, 3, 4], "window_position": [7, 8]}"#,
        )
        .unwrap();

        let settings = store.load(WindowId::SECOND);
        assert_eq!(settings.region, Region::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(settings.window_position, WindowPosition::new(7, 8));
    }

    #[test]
    fn test_missing_key_falls_back_per_key() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(
            store.path_for(WindowId::SECOND),
            r#"{"rect_coords": [10, 20, 30, 40]}"#,
        )
        .unwrap();

        let settings = store.load(WindowId::SECOND);
        assert_eq!(settings.region, Region::new(10.0, 20.0, 30.0, 40.0));
        assert_eq!(settings.window_position, WindowPosition::new(150, 100));
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path());
        fs::write(store.path_for(WindowId::FIRST), "not json").unwrap();

        assert_eq!(
            store.load(WindowId::FIRST),
            WindowSettings::default_for(WindowId::FIRST)
        );
    }

    #[test]
    fn test_save_creates_directory() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("profiles"));

        store
            .save(WindowId::FIRST, &WindowSettings::default_for(WindowId::FIRST))
            .unwrap();

        assert!(store.path_for(WindowId::FIRST).exists());
    }
}
