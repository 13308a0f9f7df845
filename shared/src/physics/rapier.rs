//! Rapier bodies for the character, fish, bobber and fishing line.

use bevy::prelude::*;
use bevy_log::debug;
use bevy_rapier3d::prelude::*;

use crate::config::{CharacterTuning, FishingTuning, GameplayConfig};

/// Collision groups used by every body in the game.
pub mod collision_groups {
    use bevy_rapier3d::prelude::Group;

    /// Player character
    pub const CHARACTER: Group = Group::GROUP_1;
    /// Static level geometry
    pub const WORLD: Group = Group::GROUP_2;
    pub const FISH: Group = Group::GROUP_3;
    /// Bobber and line segments
    pub const TACKLE: Group = Group::GROUP_4;
}

/// Dynamic capsule the character model is parented to. Rotation is locked;
/// the controller sets the upright yaw itself.
#[derive(Bundle)]
pub struct CharacterPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub locked_axes: LockedAxes,
    pub mass: ColliderMassProperties,
    pub impulse: ExternalImpulse,
    pub friction: Friction,
    pub restitution: Restitution,
    pub collision_groups: CollisionGroups,
    pub sleeping: Sleeping,
}

impl CharacterPhysicsBundle {
    pub fn new(tuning: &CharacterTuning) -> Self {
        let collider = Collider::capsule_y(tuning.capsule_half_height, tuning.capsule_radius);
        Self {
            body: RigidBody::Dynamic,
            collider,
            velocity: Velocity::zero(),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            mass: ColliderMassProperties::Mass(tuning.mass),
            impulse: ExternalImpulse::default(),
            friction: Friction::coefficient(0.0),
            restitution: Restitution::coefficient(0.0),
            collision_groups: CollisionGroups::new(
                collision_groups::CHARACTER,
                collision_groups::WORLD | collision_groups::FISH,
            ),
            sleeping: Sleeping::disabled(),
        }
    }

    /// Distance from the body center to the bottom of the capsule.
    pub fn foot_offset(tuning: &CharacterTuning) -> f32 {
        tuning.capsule_half_height + tuning.capsule_radius
    }
}

/// Weightless swimmer driven by velocity every tick.
#[derive(Bundle)]
pub struct FishPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub gravity_scale: GravityScale,
    pub locked_axes: LockedAxes,
    pub collision_groups: CollisionGroups,
    pub sleeping: Sleeping,
}

impl FishPhysicsBundle {
    pub fn new(radius: f32) -> Self {
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::ball(radius),
            velocity: Velocity::zero(),
            gravity_scale: GravityScale(0.0),
            locked_axes: LockedAxes::ROTATION_LOCKED,
            collision_groups: CollisionGroups::new(
                collision_groups::FISH,
                collision_groups::WORLD | collision_groups::FISH | collision_groups::CHARACTER,
            ),
            sleeping: Sleeping::disabled(),
        }
    }
}

/// Small ball thrown on a cast. Spawned once and parked disabled between casts.
#[derive(Bundle)]
pub struct BobberPhysicsBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub mass: ColliderMassProperties,
    pub force: ExternalForce,
    pub ccd: Ccd,
    pub damping: Damping,
    pub collision_groups: CollisionGroups,
    pub disabled: RigidBodyDisabled,
}

impl BobberPhysicsBundle {
    pub fn new(tuning: &FishingTuning) -> Self {
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::ball(tuning.bobber_radius),
            velocity: Velocity::zero(),
            mass: ColliderMassProperties::Mass(tuning.bobber_mass),
            force: ExternalForce::default(),
            ccd: Ccd::enabled(),
            damping: Damping {
                linear_damping: 0.1,
                angular_damping: 1.0,
            },
            collision_groups: CollisionGroups::new(
                collision_groups::TACKLE,
                collision_groups::WORLD,
            ),
            disabled: RigidBodyDisabled,
        }
    }
}

/// One link of the fishing line.
#[derive(Bundle)]
pub struct RopeSegmentBundle {
    pub body: RigidBody,
    pub collider: Collider,
    pub velocity: Velocity,
    pub mass: ColliderMassProperties,
    pub damping: Damping,
    pub collision_groups: CollisionGroups,
}

impl RopeSegmentBundle {
    pub fn new(tuning: &FishingTuning) -> Self {
        Self {
            body: RigidBody::Dynamic,
            collider: Collider::ball(tuning.segment_radius),
            velocity: Velocity::zero(),
            mass: ColliderMassProperties::Mass(tuning.segment_mass),
            damping: Damping {
                linear_damping: 0.5,
                angular_damping: 1.0,
            },
            collision_groups: CollisionGroups::new(
                collision_groups::TACKLE,
                collision_groups::WORLD,
            ),
        }
    }
}

/// Kinematic body the line hangs from; follows the hand joint.
#[derive(Bundle)]
pub struct HandAnchorBundle {
    pub body: RigidBody,
    pub velocity: Velocity,
}

impl Default for HandAnchorBundle {
    fn default() -> Self {
        Self {
            body: RigidBody::KinematicPositionBased,
            velocity: Velocity::zero(),
        }
    }
}

/// Adds Rapier and keeps its gravity in step with the tuning resource.
pub struct ReelPhysicsPlugin;

impl Plugin for ReelPhysicsPlugin {
    fn build(&self, app: &mut App) {
        // In bevy_rapier3d 0.30 RapierConfiguration is a component on the
        // context entity, so gravity is written after it is spawned.
        app.add_plugins(
            RapierPhysicsPlugin::<NoUserData>::default().with_default_system_setup(true),
        );
        app.init_resource::<GameplayConfig>();
        app.register_type::<GameplayConfig>();
        app.add_systems(
            Update,
            configure_rapier_context.run_if(resource_changed::<GameplayConfig>),
        );

        #[cfg(debug_assertions)]
        {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_rapier_context(
    config: Res<GameplayConfig>,
    mut query: Query<&mut RapierConfiguration>,
) {
    for mut rapier in query.iter_mut() {
        debug!("rapier gravity set to {}", config.physics.gravity);
        rapier.gravity = Vec3::new(0.0, config.physics.gravity, 0.0);
        rapier.physics_pipeline_active = true;
        rapier.query_pipeline_active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_body_is_dynamic_and_upright() {
        let bundle = CharacterPhysicsBundle::new(&CharacterTuning::default());
        assert!(matches!(bundle.body, RigidBody::Dynamic));
        assert_eq!(bundle.locked_axes, LockedAxes::ROTATION_LOCKED);
        assert!((CharacterPhysicsBundle::foot_offset(&CharacterTuning::default()) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_fish_ignore_gravity() {
        let bundle = FishPhysicsBundle::new(0.3);
        assert_eq!(bundle.gravity_scale.0, 0.0);
    }

    #[test]
    fn test_tackle_does_not_hit_the_character() {
        let bobber = BobberPhysicsBundle::new(&FishingTuning::default());
        let segment = RopeSegmentBundle::new(&FishingTuning::default());
        for groups in [bobber.collision_groups, segment.collision_groups] {
            assert!(!groups.filters.contains(collision_groups::CHARACTER));
            assert!(groups.filters.contains(collision_groups::WORLD));
        }
    }
}
