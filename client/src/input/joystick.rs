//! Analog movement: gamepad left stick and an on-screen touch stick.

use bevy::prelude::*;
use shared::input::{JoystickAxes, MovementInput};

use crate::constants::TOUCH_STICK_RADIUS;

/// The touch currently acting as a virtual stick, and where it started.
#[derive(Resource, Debug, Default)]
pub struct TouchStick {
    active: Option<(u64, Vec2)>,
}

/// Axes for a touch dragged from `start` to `current`. Screen y grows
/// downwards, so dragging up is forward.
pub fn touch_axes(start: Vec2, current: Vec2, radius: f32) -> JoystickAxes {
    let drag = (current - start) / radius.max(f32::EPSILON);
    let drag = drag.clamp_length_max(1.0);
    JoystickAxes {
        forward: -drag.y,
        right: drag.x,
    }
}

pub fn gamepad_movement_system(gamepads: Query<&Gamepad>, mut input: ResMut<MovementInput>) {
    for gamepad in gamepads.iter() {
        let axes = JoystickAxes::from_stick(gamepad.left_stick());
        if axes.is_deflected() {
            input.joystick = axes;
        }
        input.jump |= gamepad.pressed(GamepadButton::South);
        input.toggle_fishing |= gamepad.just_pressed(GamepadButton::North);
    }
}

/// The first touch on the left half of the window becomes the stick until it
/// is lifted.
pub fn touch_movement_system(
    touches: Res<Touches>,
    windows: Query<&Window>,
    mut stick: ResMut<TouchStick>,
    mut input: ResMut<MovementInput>,
) {
    if let Some((id, _)) = stick.active {
        if touches.get_pressed(id).is_none() {
            stick.active = None;
        }
    }

    if stick.active.is_none() {
        let half_width = windows.iter().next().map_or(f32::MAX, |w| w.width() / 2.0);
        stick.active = touches
            .iter_just_pressed()
            .find(|touch| touch.position().x < half_width)
            .map(|touch| (touch.id(), touch.position()));
    }

    let Some((id, start)) = stick.active else {
        return;
    };
    if let Some(touch) = touches.get_pressed(id) {
        let axes = touch_axes(start, touch.position(), TOUCH_STICK_RADIUS);
        if axes.is_deflected() {
            input.joystick = axes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_up_is_forward() {
        let axes = touch_axes(Vec2::new(100.0, 100.0), Vec2::new(100.0, 75.0), 50.0);
        assert!((axes.forward - 0.5).abs() < 1e-6);
        assert_eq!(axes.right, 0.0);
    }

    #[test]
    fn test_drag_is_capped_at_full_deflection() {
        let axes = touch_axes(Vec2::ZERO, Vec2::new(300.0, 400.0), 50.0);
        let length = Vec2::new(axes.right, axes.forward).length();
        assert!((length - 1.0).abs() < 1e-5);
        assert!(axes.right > 0.0 && axes.forward < 0.0);
    }

    #[test]
    fn test_small_drag_stays_in_deadzone() {
        let axes = touch_axes(Vec2::ZERO, Vec2::new(3.0, 0.0), 50.0);
        assert!(!axes.is_deflected());
    }
}
