use bevy::math::Vec3;

use super::CharacterController;
use crate::constants::{IDLE_VELOCITY_DAMPING, MAX_WALK_MULTIPLIER, MOVEMENT_SMOOTHING, WALK_RAMP_DELAY};
use crate::steering::{heading, yaw_rotation};

/// Walk speed multiplier after `elapsed` seconds of continuous movement.
pub fn speed_multiplier(elapsed: f32) -> f32 {
    if elapsed > WALK_RAMP_DELAY {
        (elapsed / WALK_RAMP_DELAY).clamp(1.0, MAX_WALK_MULTIPLIER)
    } else {
        1.0
    }
}

impl CharacterController {
    /// Steers the horizontal velocity toward `direction` and turns the
    /// character to face where it walks. Vertical velocity is left alone.
    pub fn apply_movement(
        &mut self,
        direction: Vec3,
        velocity: Vec3,
        now: f32,
        base_speed: f32,
    ) -> Vec3 {
        if self.walk_started.is_none() {
            self.walk_started = Some(now);
        }

        let input = direction.with_y(0.0);
        if input.length_squared() == 0.0 {
            return self.coast(velocity);
        }

        self.walk_direction = self
            .walk_direction
            .lerp(input.normalize(), MOVEMENT_SMOOTHING);
        if let Some(yaw) = heading(self.walk_direction) {
            self.facing = self.facing.slerp(yaw_rotation(yaw), MOVEMENT_SMOOTHING);
        }

        let target = self.walk_direction * self.walk_speed(base_speed);
        Vec3::new(
            velocity.x + (target.x - velocity.x) * MOVEMENT_SMOOTHING,
            velocity.y,
            velocity.z + (target.z - velocity.z) * MOVEMENT_SMOOTHING,
        )
    }

    /// No input: the walk direction fades and horizontal speed bleeds off.
    pub fn coast(&mut self, velocity: Vec3) -> Vec3 {
        self.walk_direction = self.walk_direction.lerp(Vec3::ZERO, MOVEMENT_SMOOTHING);
        Vec3::new(
            velocity.x * IDLE_VELOCITY_DAMPING,
            velocity.y,
            velocity.z * IDLE_VELOCITY_DAMPING,
        )
    }

    pub fn walk_speed(&self, base_speed: f32) -> f32 {
        base_speed * self.speed_multiplier
    }

    pub(super) fn update_speed_multiplier(&mut self, now: f32) {
        if let Some(started) = self.walk_started {
            self.speed_multiplier = speed_multiplier(now - started);
        }
    }
}
