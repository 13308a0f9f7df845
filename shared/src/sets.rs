use bevy::prelude::*;

/// Per-frame gameplay ordering. The sets are chained in this order, so a
/// system placed in a later set always observes the writes of earlier ones.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameUpdateSet {
    FishingApparatus,
    CharacterWater,
    CharacterMotion,
    FootAlignment,
    Flock,
}

/// Systems that gather device input and world loading work, run in `Update`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GamePrepareSet {
    Input,
    Activation,
}
