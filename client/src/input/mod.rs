pub mod data;
pub mod joystick;
pub mod keyboard;

use bevy::prelude::*;
use shared::input::MovementInput;
use shared::sets::GamePrepareSet;

pub fn input_plugin(app: &mut App) {
    app.init_resource::<MovementInput>()
        .init_resource::<joystick::TouchStick>()
        .add_systems(
            Update,
            (
                keyboard::keyboard_movement_system,
                joystick::gamepad_movement_system,
                joystick::touch_movement_system,
            )
                .chain()
                .in_set(GamePrepareSet::Input),
        );
}
