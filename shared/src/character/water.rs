use bevy::math::Vec3;

use super::CharacterController;
use crate::constants::{
    BOB_AMPLITUDE, BOB_FREQUENCY, FLOAT_HEIGHT, FLOAT_RESPONSE, SUBMERGED_MAX_DEPTH,
    SUBMERGED_MIN_DEPTH, SWIM_DRAG,
};
use crate::pond::Ponds;

/// Surface height of the pond the body is floating in, if any.
pub fn water_surface_at(position: Vec3, ponds: &Ponds) -> Option<f32> {
    ponds
        .0
        .iter()
        .filter(|pond| pond.contains_xz(position))
        .find_map(|pond| {
            let depth = pond.depth_at(position.y);
            (depth > SUBMERGED_MIN_DEPTH && depth < SUBMERGED_MAX_DEPTH).then_some(pond.surface_y)
        })
}

impl CharacterController {
    /// Updates the submerged flag. While submerged the body bobs around a
    /// point just above the surface and horizontal motion is dragged.
    /// Returns the velocity to apply, or `None` on dry land.
    pub fn float_in_water(
        &mut self,
        position: Vec3,
        velocity: Vec3,
        ponds: &Ponds,
        delta: f32,
    ) -> Option<Vec3> {
        let surface = water_surface_at(position, ponds);
        self.submerged = surface.is_some();
        let surface = surface?;

        self.bob_phase += delta * BOB_FREQUENCY;
        let target = surface + FLOAT_HEIGHT + self.bob_phase.sin() * BOB_AMPLITUDE;
        Some(Vec3::new(
            velocity.x * SWIM_DRAG,
            (target - position.y) * FLOAT_RESPONSE,
            velocity.z * SWIM_DRAG,
        ))
    }
}
