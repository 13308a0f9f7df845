use bevy::math::{Vec2, Vec3};
use bevy_ecs::resource::Resource;

/// Stick deflection below this is treated as centered.
pub const JOYSTICK_DEADZONE: f32 = 0.15;

/// Virtual joystick reading, both axes in [-1, 1].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct JoystickAxes {
    pub forward: f32,
    pub right: f32,
}

impl JoystickAxes {
    pub fn from_stick(stick: Vec2) -> Self {
        Self {
            forward: stick.y,
            right: stick.x,
        }
    }

    pub fn is_deflected(&self) -> bool {
        Vec2::new(self.right, self.forward).length() > JOYSTICK_DEADZONE
    }
}

/// Per-frame input the gameplay systems consume, filled by the client from
/// the keyboard and gamepad.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MovementInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub joystick: JoystickAxes,
    /// Held this frame.
    pub jump: bool,
    /// Pressed this frame.
    pub toggle_fishing: bool,
}

impl MovementInput {
    pub fn direction_pressed(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn is_moving(&self) -> bool {
        self.direction_pressed() || self.joystick.is_deflected()
    }

    /// Forward and right amounts. The joystick wins when deflected.
    pub fn axes(&self) -> Vec2 {
        if self.joystick.is_deflected() {
            return Vec2::new(self.joystick.right, self.joystick.forward);
        }
        let axis = |pos: bool, neg: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.right, self.left), axis(self.forward, self.backward))
    }

    /// Input direction on the horizontal plane, relative to the camera.
    /// Not normalized; zero when opposing keys cancel out.
    pub fn world_direction(&self, camera: &CameraBasis) -> Vec3 {
        let axes = self.axes();
        camera.forward * axes.y + camera.right * axes.x
    }
}

/// Camera forward and right flattened onto the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for CameraBasis {
    fn default() -> Self {
        Self::from_forward(Vec3::NEG_Z)
    }
}

impl CameraBasis {
    /// A camera looking straight down keeps the default forward.
    pub fn from_forward(forward: Vec3) -> Self {
        let forward = forward.with_y(0.0).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        Self { forward, right }
    }
}
