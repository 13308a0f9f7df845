/// Upper bound on the simulated time of a single frame, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Depth of a pond's swim band below its water surface.
pub const POND_DEPTH: f32 = 5.0;
/// Minimum clearance between a fish and the water surface.
pub const SURFACE_CLEARANCE: f32 = 0.5;

pub const SEPARATION_DISTANCE: f32 = 3.0;
pub const ALIGNMENT_DISTANCE: f32 = 8.0;
pub const COHESION_DISTANCE: f32 = 10.0;
pub const LOOK_AHEAD_DISTANCE: f32 = 5.0;
pub const PROBE_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

pub const SEPARATION_WEIGHT: f32 = 0.2;
pub const ALIGNMENT_WEIGHT: f32 = 0.005;
pub const COHESION_WEIGHT: f32 = 0.005;
pub const AVOIDANCE_WEIGHT: f32 = 1.0;

pub const FISH_MIN_SPEED: f32 = 2.0;
pub const FISH_MAX_SPEED: f32 = 5.0;
pub const FISH_WAVE_AMPLITUDE: f32 = 0.3;

pub const DEFAULT_WALK_SPEED: f32 = 10.0;
/// Seconds of sustained movement before the walk speed starts ramping.
pub const WALK_RAMP_DELAY: f32 = 2.0;
pub const MAX_WALK_MULTIPLIER: f32 = 2.0;
/// Exponential smoothing applied per tick to walk direction, facing and velocity.
pub const MOVEMENT_SMOOTHING: f32 = 0.2;
pub const IDLE_VELOCITY_DAMPING: f32 = 0.8;
pub const FOOT_ALIGNMENT_BLEND: f32 = 0.3;
/// Foot probes start this far above the joint.
pub const FOOT_PROBE_HEIGHT: f32 = 0.5;
pub const FOOT_PROBE_LENGTH: f32 = 2.0;

/// Depth range, relative to the water surface, in which the character floats.
pub const SUBMERGED_MIN_DEPTH: f32 = -1.0;
pub const SUBMERGED_MAX_DEPTH: f32 = 4.0;
/// Height of the body center above the water surface while floating.
pub const FLOAT_HEIGHT: f32 = 0.99;
pub const BOB_FREQUENCY: f32 = 2.0;
pub const BOB_AMPLITUDE: f32 = 0.2;
pub const FLOAT_RESPONSE: f32 = 5.0;
pub const SWIM_DRAG: f32 = 0.85;

pub const HAND_JOINT: &str = "hand.r";
pub const FOOT_JOINTS: [&str; 2] = ["foot.l", "foot.r"];

pub const DEFAULT_FISH_PER_POND: usize = 5;
