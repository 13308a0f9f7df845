//! Line bodies and joints on top of Rapier.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::config::GameplayConfig;
use shared::fishing::RopePhysics;
use shared::physics::{HandAnchorBundle, RopeSegmentBundle};

/// Bobber, line segments and the hand anchor.
#[derive(Component, Debug, Default)]
pub struct TackleBody;

/// Bodies are entities. A joint lives on the body it pulls, so the joint
/// handle is that body's entity.
#[derive(SystemParam)]
pub struct RapierTackle<'w, 's> {
    commands: Commands<'w, 's>,
    bodies: Query<
        'w,
        's,
        (
            &'static mut Transform,
            &'static mut Velocity,
            Option<&'static mut ExternalForce>,
        ),
        With<TackleBody>,
    >,
    config: Res<'w, GameplayConfig>,
}

impl RopePhysics for RapierTackle<'_, '_> {
    type Handle = Entity;

    fn spawn_hand_anchor(&mut self, position: Vec3) -> Entity {
        self.commands
            .spawn((
                Name::new("Hand anchor"),
                TackleBody,
                HandAnchorBundle::default(),
                Transform::from_translation(position),
            ))
            .id()
    }

    fn spawn_segment(&mut self, position: Vec3) -> Entity {
        self.commands
            .spawn((
                Name::new("Line segment"),
                TackleBody,
                RopeSegmentBundle::new(&self.config.fishing),
                Transform::from_translation(position),
            ))
            .id()
    }

    fn despawn(&mut self, body: Entity) {
        self.commands.entity(body).try_despawn();
    }

    fn attach_max_distance(&mut self, parent: Entity, child: Entity, max_distance: f32) -> Entity {
        self.commands
            .entity(child)
            .insert(ImpulseJoint::new(parent, RopeJointBuilder::new(max_distance)));
        child
    }

    fn detach(&mut self, joint: Entity) {
        self.commands.entity(joint).try_remove::<ImpulseJoint>();
    }

    fn position(&self, body: Entity) -> Option<Vec3> {
        self.bodies
            .get(body)
            .ok()
            .map(|(transform, _, _)| transform.translation)
    }

    fn linear_velocity(&self, body: Entity) -> Option<Vec3> {
        self.bodies.get(body).ok().map(|(_, velocity, _)| velocity.linvel)
    }

    fn set_linear_velocity(&mut self, body: Entity, linvel: Vec3) {
        if let Ok((_, mut velocity, _)) = self.bodies.get_mut(body) {
            velocity.linvel = linvel;
        }
    }

    fn move_kinematic(&mut self, body: Entity, position: Vec3) {
        if let Ok((mut transform, _, _)) = self.bodies.get_mut(body) {
            transform.translation = position;
        }
    }

    fn set_force(&mut self, body: Entity, force: Vec3) {
        if let Ok((_, _, Some(mut external))) = self.bodies.get_mut(body) {
            external.force = force;
        }
    }

    fn set_enabled(&mut self, body: Entity, enabled: bool) {
        let mut entity = self.commands.entity(body);
        if enabled {
            entity
                .try_remove::<RigidBodyDisabled>()
                .try_insert(Visibility::Inherited);
        } else {
            entity.try_insert((RigidBodyDisabled, Visibility::Hidden));
        }
    }

    fn teleport(&mut self, body: Entity, position: Vec3) {
        if let Ok((mut transform, mut velocity, _)) = self.bodies.get_mut(body) {
            transform.translation = position;
            *velocity = Velocity::zero();
        }
    }
}
