use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::character::{AnimationState, CharacterController};
use shared::clock::FrameClock;
use shared::config::GameplayConfig;
use shared::input::MovementInput;
use shared::pond::Ponds;
use shared::surfaces::{SurfaceQuery, SurfaceSet};

use crate::animation::{is_clip_finished, play_clip, AnimationRig, ClipLibrary};
use crate::camera::{camera_basis, OrbitCamera};
use crate::world::WorldSurfaces;

pub fn character_water_system(
    clock: Res<FrameClock>,
    ponds: Res<Ponds>,
    mut characters: Query<(&mut CharacterController, &Transform, &mut Velocity)>,
) {
    for (mut controller, transform, mut velocity) in characters.iter_mut() {
        let was_submerged = controller.submerged;
        if let Some(floating) =
            controller.float_in_water(transform.translation, velocity.linvel, &ponds, clock.delta)
        {
            velocity.linvel = floating;
        }
        if controller.submerged != was_submerged {
            debug!("character submerged: {}", controller.submerged);
        }
    }
}

fn launch(impulse: &mut ExternalImpulse, config: &GameplayConfig) {
    impulse.impulse = Vec3::Y * config.character.jump_impulse;
    debug!("jump launched");
}

/// Landing, jump take-off, input to velocity and clip switching.
pub fn character_motion_system(
    clock: Res<FrameClock>,
    input: Res<MovementInput>,
    config: Res<GameplayConfig>,
    cameras: Query<&Transform, (With<OrbitCamera>, Without<CharacterController>)>,
    surfaces: WorldSurfaces,
    mut characters: Query<(
        &mut CharacterController,
        &mut Transform,
        &mut Velocity,
        &mut ExternalImpulse,
        &ClipLibrary,
        Option<&AnimationRig>,
    )>,
    mut players: Query<(&mut AnimationPlayer, &mut AnimationTransitions)>,
) {
    let basis = cameras.single().map(camera_basis).unwrap_or_default();
    let jump_clip = AnimationState::Jump.clip_name();

    for (mut controller, mut transform, mut velocity, mut impulse, library, rig) in
        characters.iter_mut()
    {
        let mut animation = rig.and_then(|rig| players.get_mut(rig.player).ok());

        let ground = surfaces.cast_ray(
            SurfaceSet::Walkable,
            transform.translation,
            Vec3::NEG_Y,
            config.character.landing_probe,
        );
        if controller.land(ground.is_some(), velocity.linvel.y) {
            debug!("landed");
        }

        if controller.state == AnimationState::Jump && controller.launch_pending {
            let finished = match (library.node(jump_clip), animation.as_ref()) {
                (Some(node), Some((player, _))) => is_clip_finished(player, node),
                _ => true,
            };
            if finished && controller.on_clip_finished(AnimationState::Jump) {
                launch(&mut impulse, &config);
            }
        }

        let step = controller.tick(
            &input,
            &basis,
            velocity.linvel,
            clock.elapsed,
            &config.character,
        );
        velocity.linvel = step.velocity;
        velocity.angvel = Vec3::ZERO;
        transform.rotation = step.rotation;

        let rate = controller.playback_rate();
        let current = library.node(controller.state.clip_name());
        match (step.transition, current, animation.as_mut()) {
            (Some(state), Some(node), Some((player, transitions))) => {
                play_clip(player, transitions, node, state.looping(), rate);
            }
            (Some(state), _, _) => {
                debug!("no '{}' clip to play", state.clip_name());
                if state == AnimationState::Jump
                    && controller.on_clip_finished(AnimationState::Jump)
                {
                    launch(&mut impulse, &config);
                }
            }
            (None, Some(node), Some((player, _))) => {
                if let Some(active) = player.animation_mut(node) {
                    active.set_speed(rate);
                }
            }
            (None, _, _) => {}
        }
    }
}
