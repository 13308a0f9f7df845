use bevy::color::Color;
use bevy::math::Vec3;

pub const BINDS_PATH: &str = "keybindings.ron";

pub const LEVEL_ASSET: &str = "reelworld.glb";
pub const CHARACTER_ASSET: &str = "reelguy.glb";
pub const ROD_ASSET: &str = "reelrod.glb";
pub const FISH_ASSET: &str = "reelfish.glb";

pub const CHARACTER_SPAWN: Vec3 = Vec3::new(15.0, 5.0, 20.0);

// Rod placement relative to the hand joint
pub const ROD_OFFSET: Vec3 = Vec3::new(-0.15, 0.0, -0.1);
pub const ROD_PITCH: f32 = std::f32::consts::FRAC_PI_4;

pub const FISH_COLLIDER_RADIUS: f32 = 0.3;
pub const FISH_MIN_SCALE: f32 = 1.0;
pub const FISH_MAX_SCALE: f32 = 1.5;
pub const FISH_MIN_PLAYBACK: f32 = 0.8;
pub const FISH_MAX_PLAYBACK: f32 = 1.2;
pub const FISH_SWIM_CLIP: &str = "swim";

/// How far below a pond the spawn probe looks for the bottom.
pub const GROUND_PROBE_LENGTH: f32 = 100.0;

pub const CAMERA_START_RADIUS: f32 = 10.0;
pub const CAMERA_MIN_RADIUS: f32 = 3.0;
pub const CAMERA_MAX_RADIUS: f32 = 15.0;
/// Polar angle from straight up.
pub const CAMERA_START_PITCH: f32 = std::f32::consts::FRAC_PI_3;
pub const CAMERA_MIN_PITCH: f32 = 0.1;
pub const CAMERA_MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
pub const CAMERA_START_YAW: f32 = std::f32::consts::FRAC_PI_2;
pub const CAMERA_TARGET_HEIGHT: f32 = 1.0;
pub const CAMERA_MOUSE_SENSITIVITY: f32 = 0.005;
pub const CAMERA_STICK_SPEED: f32 = 2.5;
pub const CAMERA_ZOOM_STEP: f32 = 0.5;

/// Screen distance a touch must be dragged to fully deflect the stick.
pub const TOUCH_STICK_RADIUS: f32 = 50.0;

pub const SKY_COLOR: Color = Color::srgb(0.53, 0.81, 0.92);
