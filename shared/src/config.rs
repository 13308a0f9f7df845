//! Gameplay tuning loaded from `tuning.ron`.
//!
//! Every field has a default, so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_WALK_SPEED;

pub const TUNING_PATH: &str = "tuning.ron";

#[derive(Resource, Debug, Default, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct GameplayConfig {
    pub physics: PhysicsTuning,
    pub character: CharacterTuning,
    pub fishing: FishingTuning,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Vertical gravity acceleration, negative is down.
    pub gravity: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self { gravity: -30.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CharacterTuning {
    pub walk_speed: f32,
    /// Upward impulse applied when the jump clip finishes.
    pub jump_impulse: f32,
    pub mass: f32,
    pub capsule_radius: f32,
    pub capsule_half_height: f32,
    /// Length of the downward probe that decides whether an airborne
    /// character has landed, measured from the body center.
    pub landing_probe: f32,
}

impl Default for CharacterTuning {
    fn default() -> Self {
        Self {
            walk_speed: DEFAULT_WALK_SPEED,
            jump_impulse: 12.0,
            mass: 1.0,
            capsule_radius: 0.4,
            capsule_half_height: 0.5,
            landing_probe: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct FishingTuning {
    /// Seconds between the toggle and the bobber leaving the hand.
    pub cast_delay: f32,
    /// Seconds the bobber flies before the line is strung.
    pub settle_delay: f32,
    pub cast_speed: f32,
    pub arc_speed: f32,
    pub hand_height: f32,
    pub forward_offset: f32,
    pub segment_count: usize,
    pub segment_radius: f32,
    pub segment_mass: f32,
    pub bobber_radius: f32,
    pub bobber_mass: f32,
    /// Upward force on a bobber that just touches the surface.
    pub buoyancy_base: f32,
    /// Additional upward force per unit of depth.
    pub buoyancy_gain: f32,
    pub horizontal_water_damping: f32,
    pub vertical_water_damping: f32,
}

impl Default for FishingTuning {
    fn default() -> Self {
        Self {
            cast_delay: 0.5,
            settle_delay: 0.3,
            cast_speed: 8.0,
            arc_speed: 6.0,
            hand_height: 1.5,
            forward_offset: 1.0,
            segment_count: 10,
            segment_radius: 0.03,
            segment_mass: 0.01,
            bobber_radius: 0.1,
            bobber_mass: 0.2,
            buoyancy_base: 8.0,
            buoyancy_gain: 40.0,
            horizontal_water_damping: 0.9,
            vertical_water_damping: 0.95,
        }
    }
}

impl GameplayConfig {
    pub fn from_ron(content: &str) -> Result<Self, ron::Error> {
        ron::from_str(content)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        let pretty_config = ron::ser::PrettyConfig::new().with_depth_limit(3);
        ron::ser::to_string_pretty(self, pretty_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_survive_the_file_format() {
        let config = GameplayConfig::default();
        let text = config.to_ron().unwrap();
        assert_eq!(GameplayConfig::from_ron(&text).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = GameplayConfig::from_ron("(fishing: (segment_count: 4))").unwrap();
        assert_eq!(config.fishing.segment_count, 4);
        assert_eq!(config.fishing.cast_delay, 0.5);
        assert_eq!(config.character, CharacterTuning::default());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(GameplayConfig::from_ron("not ron at all {").is_err());
    }
}
