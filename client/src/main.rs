mod animation;
mod camera;
mod config;
mod constants;
mod fish;
mod fishing;
mod game;
mod input;
mod player;
mod ui;
mod world;

use bevy::{prelude::*, window::PresentMode};
use clap::Parser;
use input::{data::GameAction, keyboard::get_bindings};
use serde::{Deserialize, Serialize};
use shared::{get_game_folder_paths, DEFAULT_FISH_PER_POND};
use std::collections::BTreeMap;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long)]
    game_folder_path: Option<String>,

    #[arg(
        short,
        long,
        help = "Allows overriding of the asset folder path, defaults to ./assets"
    )]
    assets_folder_path: Option<String>,

    #[arg(long, default_value_t = DEFAULT_FISH_PER_POND, help = "Fish spawned in every pond")]
    fish_per_pond: usize,

    #[arg(long, help = "Show the tuning inspector window")]
    inspector: bool,
}

/// Progress of the level scene. Fish and the character wait for `Ready`.
#[derive(Clone, Copy, Default, Eq, PartialEq, Debug, Hash, States)]
pub enum LevelState {
    #[default]
    Loading,
    Ready,
    /// The level asset could not be loaded; nothing depending on it runs.
    Failed,
}

#[derive(Resource, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "input::keyboard::default_key_map")]
    pub map: BTreeMap<GameAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: input::keyboard::default_key_map(),
        }
    }
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct FishPerPond(pub usize);

fn main() {
    let args = Args::parse();

    let game_folder_paths = get_game_folder_paths(args.game_folder_path, args.assets_folder_path);

    println!(
        "Starting application with game folder: {}",
        game_folder_paths.game_folder_path.display()
    );

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                file_path: game_folder_paths
                    .assets_folder_path
                    .to_string_lossy()
                    .into_owned(),
                ..Default::default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "ReelWorld".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            }),
    );

    if args.inspector {
        ui::add_inspector(&mut app);
    }

    app.insert_resource(get_bindings(&game_folder_paths))
        .insert_resource(config::get_tuning(&game_folder_paths))
        .insert_resource(FishPerPond(args.fish_per_pond))
        .insert_resource(game_folder_paths)
        .init_state::<LevelState>()
        .add_plugins(game::game_plugin)
        .run();
}
