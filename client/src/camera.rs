//! Orbit camera that follows the character.

use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use shared::character::CharacterController;
use shared::input::CameraBasis;

use crate::constants::*;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    /// Angle around the vertical axis.
    pub yaw: f32,
    /// Angle down from straight above the target.
    pub pitch: f32,
    pub radius: f32,
    pub target: Vec3,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw: CAMERA_START_YAW,
            pitch: CAMERA_START_PITCH,
            radius: CAMERA_START_RADIUS,
            target: CHARACTER_SPAWN,
        }
    }
}

impl OrbitCamera {
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(CAMERA_MIN_PITCH, CAMERA_MAX_PITCH);
    }

    pub fn zoom(&mut self, amount: f32) {
        self.radius = (self.radius + amount).clamp(CAMERA_MIN_RADIUS, CAMERA_MAX_RADIUS);
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.sin(),
            self.pitch.cos(),
            self.yaw.sin() * self.pitch.sin(),
        ) * self.radius
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.target + self.offset()).looking_at(self.target, Vec3::Y)
    }
}

/// Horizontal forward/right of the active camera, for camera-relative input.
pub fn camera_basis(transform: &Transform) -> CameraBasis {
    CameraBasis::from_forward(*transform.forward())
}

pub fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Name::new("Camera"),
        Camera3d::default(),
        orbit.transform(),
        orbit,
    ));
}

pub fn orbit_camera_input_system(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    gamepads: Query<&Gamepad>,
    time: Res<Time>,
    mut cameras: Query<&mut OrbitCamera>,
) {
    let mut rotation = Vec2::ZERO;
    if mouse_buttons.pressed(MouseButton::Left) || mouse_buttons.pressed(MouseButton::Right) {
        rotation -= mouse_motion.delta * CAMERA_MOUSE_SENSITIVITY;
    }
    for gamepad in gamepads.iter() {
        rotation -= gamepad.right_stick() * CAMERA_STICK_SPEED * time.delta_secs();
    }
    let zoom = -mouse_scroll.delta.y * CAMERA_ZOOM_STEP;

    for mut orbit in cameras.iter_mut() {
        if rotation != Vec2::ZERO {
            orbit.rotate(-rotation.x, rotation.y);
        }
        if zoom != 0.0 {
            orbit.zoom(zoom);
        }
    }
}

/// Runs after the physics writeback so the camera sees this frame's body.
pub fn follow_character_system(
    characters: Query<&Transform, (With<CharacterController>, Without<OrbitCamera>)>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let Ok(character) = characters.single() else {
        return;
    };
    for (mut orbit, mut transform) in cameras.iter_mut() {
        orbit.target = character.translation + Vec3::Y * CAMERA_TARGET_HEIGHT;
        *transform = orbit.transform();
    }
}
