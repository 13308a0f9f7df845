pub mod rapier;

pub use rapier::{
    collision_groups, BobberPhysicsBundle, CharacterPhysicsBundle, FishPhysicsBundle,
    HandAnchorBundle, ReelPhysicsPlugin, RopeSegmentBundle,
};
