use crate::config::write_settings_file;
use crate::{constants::BINDS_PATH, input::data::GameAction, KeyMap};
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use shared::input::MovementInput;
use shared::GameFolderPaths;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::Other, "serialization failed"))?;
    write_settings_file(&serialized, binds_path)
}

pub fn is_action_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_pressed(keys.iter().copied()))
}

pub fn is_action_just_pressed(
    action: GameAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keyboard_input.any_just_pressed(keys.iter().copied()))
}

/// Run condition for one-shot actions.
pub fn action_just_pressed(
    action: GameAction,
) -> impl Fn(Res<ButtonInput<KeyCode>>, Res<KeyMap>) -> bool {
    move |keyboard_input, key_map| is_action_just_pressed(action, &keyboard_input, &key_map)
}

pub(crate) fn default_key_map() -> BTreeMap<GameAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(GameAction::MoveForward, vec![KeyCode::KeyW, KeyCode::ArrowUp]);
    map.insert(
        GameAction::MoveBackward,
        vec![KeyCode::KeyS, KeyCode::ArrowDown],
    );
    map.insert(GameAction::MoveLeft, vec![KeyCode::KeyA, KeyCode::ArrowLeft]);
    map.insert(
        GameAction::MoveRight,
        vec![KeyCode::KeyD, KeyCode::ArrowRight],
    );
    map.insert(GameAction::Jump, vec![KeyCode::Space]);
    map.insert(GameAction::ToggleFishing, vec![KeyCode::KeyF]);
    map.insert(GameAction::SaveTuning, vec![KeyCode::F5]);
    map
}

pub fn get_bindings(game_folder_paths: &GameFolderPaths) -> KeyMap {
    let binds_path: PathBuf = Path::new(&game_folder_paths.assets_folder_path).join(BINDS_PATH);

    if let Ok(content) = fs::read_to_string(binds_path.as_path()) {
        match from_str::<KeyMap>(&content) {
            Ok(key_map) => return key_map,
            Err(e) => warn!("Invalid keybindings file {:?}: {}", binds_path, e),
        }
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, binds_path.as_path()) {
        error!(
            "Failed to create default keybindings file at {:?}: {}",
            binds_path, e
        );
    }
    key_map
}

/// Rebuilds the frame's movement flags from the keyboard. Gamepad and touch
/// readers run afterwards and only add to it.
pub fn keyboard_movement_system(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut input: ResMut<MovementInput>,
) {
    let pressed = |action| is_action_pressed(action, &keyboard_input, &key_map);

    *input = MovementInput {
        forward: pressed(GameAction::MoveForward),
        backward: pressed(GameAction::MoveBackward),
        left: pressed(GameAction::MoveLeft),
        right: pressed(GameAction::MoveRight),
        jump: pressed(GameAction::Jump),
        toggle_fishing: is_action_just_pressed(
            GameAction::ToggleFishing,
            &keyboard_input,
            &key_map,
        ),
        ..default()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_has_a_default_key() {
        let map = default_key_map();
        for action in [
            GameAction::MoveForward,
            GameAction::MoveBackward,
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Jump,
            GameAction::ToggleFishing,
            GameAction::SaveTuning,
        ] {
            assert!(!map[&action].is_empty(), "{:?} is unbound", action);
        }
    }

    #[test]
    fn test_any_bound_key_triggers_the_action() {
        let key_map = KeyMap::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ArrowUp);
        assert!(is_action_pressed(GameAction::MoveForward, &keyboard, &key_map));
        assert!(is_action_just_pressed(GameAction::MoveForward, &keyboard, &key_map));
        assert!(!is_action_pressed(GameAction::MoveBackward, &keyboard, &key_map));

        keyboard.clear();
        assert!(is_action_pressed(GameAction::MoveForward, &keyboard, &key_map));
        assert!(!is_action_just_pressed(GameAction::MoveForward, &keyboard, &key_map));
    }

    #[test]
    fn test_partial_bindings_file_keeps_defaults() {
        let key_map: KeyMap = from_str("()").unwrap();
        assert_eq!(key_map.map, default_key_map());
    }
}
