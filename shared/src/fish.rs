use bevy::prelude::*;
use rand::Rng;

use crate::constants::{
    ALIGNMENT_WEIGHT, AVOIDANCE_WEIGHT, COHESION_WEIGHT, FISH_MAX_SPEED, FISH_MIN_SPEED,
    FISH_WAVE_AMPLITUDE, SEPARATION_WEIGHT,
};
use crate::pond::{Pond, PondId};
use crate::steering::{alignment, boundary_avoidance, cohesion, heading, separation};
use crate::surfaces::SurfaceQuery;

pub use crate::steering::FlockMember;

/// An autonomous swimmer. Its position lives on the physics body; this only
/// carries what the steering rules need between ticks.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct Fish {
    /// Unit swim direction.
    pub direction: Vec3,
    pub speed: f32,
    /// Offset into the vertical wave so the school does not bob in lockstep.
    pub phase_offset: f32,
    pub pond: PondId,
}

/// Result of one flock step for a single fish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FishStep {
    pub velocity: Vec3,
    /// Body yaw, `None` when the fish has no horizontal velocity.
    pub yaw: Option<f32>,
    /// Set when the fish broke the surface clearance and must be moved back down.
    pub clamped_position: Option<Vec3>,
}

impl Fish {
    pub fn random(pond: PondId, rng: &mut impl Rng) -> Self {
        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        let direction = Vec3::new(
            yaw.sin(),
            rng.gen_range(-0.2..0.2),
            yaw.cos(),
        )
        .normalize_or(Vec3::Z);
        Self {
            direction,
            speed: rng.gen_range(FISH_MIN_SPEED..=FISH_MAX_SPEED),
            phase_offset: rng.gen_range(0.0..std::f32::consts::TAU),
            pond,
        }
    }

    pub fn member(&self, position: Vec3) -> FlockMember {
        FlockMember {
            position,
            direction: self.direction,
        }
    }

    /// Blends the four steering rules into the swim direction. A zero sum
    /// keeps the previous direction.
    pub fn steer(&mut self, position: Vec3, flock: &[FlockMember], surfaces: &impl SurfaceQuery) {
        let steer = separation(position, flock) * SEPARATION_WEIGHT
            + alignment(position, flock) * ALIGNMENT_WEIGHT
            + cohesion(position, flock) * COHESION_WEIGHT
            + boundary_avoidance(position, self.direction, surfaces) * AVOIDANCE_WEIGHT;
        self.direction = (self.direction + steer).normalize_or(self.direction);
    }

    /// Steers, then turns the swim direction into this tick's body motion.
    pub fn swim(
        &mut self,
        position: Vec3,
        pond: &Pond,
        elapsed: f32,
        flock: &[FlockMember],
        surfaces: &impl SurfaceQuery,
    ) -> FishStep {
        self.steer(position, flock, surfaces);

        let mut velocity = self.direction * self.speed;
        velocity.y += (elapsed + self.phase_offset).sin() * FISH_WAVE_AMPLITUDE;

        let (_, ceiling) = pond.swim_band();
        let clamped_position = (position.y > ceiling).then(|| {
            if self.direction.y > 0.0 {
                self.direction.y = -self.direction.y;
            }
            velocity.y = velocity.y.min(0.0);
            position.with_y(ceiling)
        });

        FishStep {
            velocity,
            yaw: heading(velocity),
            clamped_position,
        }
    }
}
