use std::path::PathBuf;

use bevy_ecs::resource::Resource;

pub mod character;
pub mod clock;
pub mod config;
pub mod constants;
pub mod fish;
pub mod fishing;
pub mod input;
pub mod physics;
pub mod pond;
pub mod sets;
pub mod steering;
pub mod surfaces;

pub use constants::*;

#[derive(Resource, Debug, Clone)]
pub struct GameFolderPaths {
    pub game_folder_path: PathBuf,
    pub assets_folder_path: PathBuf,
}

pub fn get_game_folder_paths(
    game_folder_path: Option<String>,
    assets_folder_path: Option<String>,
) -> GameFolderPaths {
    let mut paths = default_game_folder_paths();

    if let Some(game_data) = game_folder_path {
        paths.game_folder_path = game_data.into();
    }
    if let Some(game_assets) = assets_folder_path {
        paths.assets_folder_path = game_assets.into();
    }

    paths
}

fn env_dir(var: &str) -> PathBuf {
    std::env::var_os(var)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(target_os = "windows")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    GameFolderPaths {
        game_folder_path: env_dir("APPDATA").join("reelworld"),
        assets_folder_path: "assets".into(),
    }
}

#[cfg(target_os = "macos")]
pub fn default_game_folder_paths() -> GameFolderPaths {
    GameFolderPaths {
        game_folder_path: env_dir("HOME").join("Library/Application Support/reelworld"),
        assets_folder_path: "assets".into(),
    }
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub fn default_game_folder_paths() -> GameFolderPaths {
    GameFolderPaths {
        game_folder_path: env_dir("HOME").join(".local/share/reelworld"),
        assets_folder_path: "assets".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_path_overrides() {
        let paths = get_game_folder_paths(Some("/tmp/reel".into()), None);
        assert_eq!(paths.game_folder_path, PathBuf::from("/tmp/reel"));
        assert_eq!(
            paths.assets_folder_path,
            default_game_folder_paths().assets_folder_path
        );
    }
}
