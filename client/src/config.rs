use bevy::prelude::*;
use shared::config::{GameplayConfig, TUNING_PATH};
use shared::GameFolderPaths;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes a serialized settings file, creating its folder first.
pub(crate) fn write_settings_file(serialized: &str, path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())
}

fn write_tuning_to_path(config: &GameplayConfig, path: &Path) -> Result<(), std::io::Error> {
    let serialized = config
        .to_ron()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    write_settings_file(&serialized, path)
}

fn tuning_path(game_folder_paths: &GameFolderPaths) -> PathBuf {
    game_folder_paths.game_folder_path.join(TUNING_PATH)
}

/// Reads `tuning.ron`; a missing or unreadable file is replaced by the defaults.
pub fn get_tuning(game_folder_paths: &GameFolderPaths) -> GameplayConfig {
    let path = tuning_path(game_folder_paths);

    match fs::read_to_string(&path) {
        Ok(content) => match GameplayConfig::from_ron(&content) {
            Ok(config) => {
                info!("Loaded tuning from {:?}", path);
                return config;
            }
            Err(e) => warn!("Invalid tuning file {:?}: {}, using defaults", path, e),
        },
        Err(e) => debug!("No tuning file at {:?}: {}", path, e),
    }

    let config = GameplayConfig::default();
    if let Err(e) = write_tuning_to_path(&config, &path) {
        error!("Failed to create default tuning file at {:?}: {}", path, e);
    }
    config
}

pub fn save_tuning(config: Res<GameplayConfig>, game_folder_paths: Res<GameFolderPaths>) {
    let path = tuning_path(&game_folder_paths);
    match write_tuning_to_path(&config, &path) {
        Ok(_) => info!("Tuning saved to {:?}", path),
        Err(e) => error!("Failed to save tuning to {:?}: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_folder(name: &str) -> GameFolderPaths {
        let root = std::env::temp_dir().join(format!("reelworld-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&root);
        GameFolderPaths {
            game_folder_path: root.clone(),
            assets_folder_path: root.join("assets"),
        }
    }

    #[test]
    fn test_missing_tuning_writes_defaults() {
        let paths = scratch_folder("missing");
        let config = get_tuning(&paths);
        assert_eq!(config, GameplayConfig::default());
        assert!(tuning_path(&paths).exists());
        let _ = fs::remove_dir_all(&paths.game_folder_path);
    }

    #[test]
    fn test_broken_tuning_is_replaced() {
        let paths = scratch_folder("broken");
        write_settings_file("(physics: (gravity: ", &tuning_path(&paths)).unwrap();
        assert_eq!(get_tuning(&paths), GameplayConfig::default());
        let rewritten = fs::read_to_string(tuning_path(&paths)).unwrap();
        assert!(GameplayConfig::from_ron(&rewritten).is_ok());
        let _ = fs::remove_dir_all(&paths.game_folder_path);
    }

    #[test]
    fn test_existing_tuning_is_kept() {
        let paths = scratch_folder("kept");
        write_settings_file("(physics: (gravity: -9.5))", &tuning_path(&paths)).unwrap();
        assert_eq!(get_tuning(&paths).physics.gravity, -9.5);
        let _ = fs::remove_dir_all(&paths.game_folder_path);
    }
}
