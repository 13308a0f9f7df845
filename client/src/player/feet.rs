use bevy::prelude::*;
use shared::character::feet::{align_foot, ground_normal_below};

use super::CharacterBones;
use crate::world::WorldSurfaces;

/// Tilts each animated foot toward the ground normal under it. Works on the
/// pose the animation wrote this frame, in the parent bone's space.
pub fn align_feet_system(
    characters: Query<&CharacterBones>,
    mut joints: Query<(&mut Transform, &GlobalTransform, &ChildOf)>,
    parents: Query<&GlobalTransform>,
    surfaces: WorldSurfaces,
) {
    if !surfaces.has_walkable() {
        return;
    }

    for bones in characters.iter() {
        for &foot in &bones.feet {
            let Ok((mut transform, global, child_of)) = joints.get_mut(foot) else {
                debug!("foot joint {:?} is gone", foot);
                continue;
            };
            let Some(normal) = ground_normal_below(global.translation(), &surfaces) else {
                continue;
            };
            let parent_rotation = parents
                .get(child_of.parent())
                .map(GlobalTransform::rotation)
                .unwrap_or(Quat::IDENTITY);

            let current = parent_rotation * transform.rotation;
            if let Some(aligned) = align_foot(current, normal) {
                transform.rotation = parent_rotation.inverse() * aligned;
            }
        }
    }
}
