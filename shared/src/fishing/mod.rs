//! Rod, bobber and line.
//!
//! The apparatus is a small state machine driven by the fishing toggle:
//! stowed, cast pending (the wind-up), cast (bobber flying or floating). It
//! owns the handles of every body it creates through [`RopePhysics`].

pub mod buoyancy;
pub mod rope;

use bevy::prelude::*;
use bevy_log::{debug, info};

pub use buoyancy::{bobber_buoyancy, Buoyancy};
pub use rope::{RopeChain, RopePhysics, RopeSamples};

use crate::config::FishingTuning;
use crate::input::CameraBasis;
use crate::pond::Ponds;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FishingPhase {
    #[default]
    Stowed,
    /// Seconds left before the bobber leaves the hand.
    CastPending(f32),
    Cast,
}

/// Where the character is this tick, as seen by the apparatus.
#[derive(Debug, Clone, Copy)]
pub struct CastContext {
    pub character_position: Vec3,
    /// World position of the hand joint, when the skeleton is posed.
    pub hand_position: Option<Vec3>,
    pub camera: CameraBasis,
}

#[derive(Component, Debug)]
pub struct FishingApparatus<H> {
    pub phase: FishingPhase,
    /// Hand joint and rod model both present.
    pub rod_attached: bool,
    pub rod_visible: bool,
    pub bobber: Option<H>,
    pub bobber_active: bool,
    /// Seconds until the line is strung, while the bobber is in flight.
    settle: Option<f32>,
    pub line: Option<RopeChain<H>>,
    pub samples: RopeSamples,
}

impl<H: Copy + Eq + std::fmt::Debug> FishingApparatus<H> {
    pub fn new(segment_count: usize) -> Self {
        Self {
            phase: FishingPhase::Stowed,
            rod_attached: false,
            rod_visible: false,
            bobber: None,
            bobber_active: false,
            settle: None,
            line: None,
            samples: RopeSamples::new(segment_count),
        }
    }

    /// Mirrors the character's fishing flag.
    pub fn is_fishing(&self) -> bool {
        self.phase != FishingPhase::Stowed
    }

    /// Advances stowed to cast pending, cancels a pending cast, or reels in.
    /// Ignored when there is no rod to fish with.
    pub fn toggle<P: RopePhysics<Handle = H>>(&mut self, physics: &mut P, tuning: &FishingTuning) {
        if !self.rod_attached {
            debug!("fishing toggle ignored, no rod attached");
            return;
        }
        self.phase = match self.phase {
            FishingPhase::Stowed => FishingPhase::CastPending(tuning.cast_delay),
            FishingPhase::CastPending(_) => FishingPhase::Stowed,
            FishingPhase::Cast => {
                self.reel_in(physics);
                FishingPhase::Stowed
            }
        };
    }

    pub fn update<P: RopePhysics<Handle = H>>(
        &mut self,
        physics: &mut P,
        context: &CastContext,
        ponds: &Ponds,
        tuning: &FishingTuning,
        delta: f32,
    ) {
        match self.phase {
            FishingPhase::Stowed => {}
            FishingPhase::CastPending(remaining) => {
                let remaining = remaining - delta;
                if remaining > 0.0 {
                    self.phase = FishingPhase::CastPending(remaining);
                } else {
                    self.cast(physics, context, ponds, tuning);
                }
            }
            FishingPhase::Cast => {
                self.settle_line(physics, context, tuning, delta);
                self.float_bobber(physics, ponds, tuning);
            }
        }

        if let (Some(line), Some(hand)) = (&self.line, context.hand_position) {
            physics.move_kinematic(line.anchor, hand);
        }
        let segments = self.line.as_ref().map_or(&[][..], |line| &line.segments[..]);
        self.samples
            .refresh(physics, context.hand_position, segments, self.bobber);
    }

    fn cast<P: RopePhysics<Handle = H>>(
        &mut self,
        physics: &mut P,
        context: &CastContext,
        ponds: &Ponds,
        tuning: &FishingTuning,
    ) {
        self.phase = FishingPhase::Cast;
        self.rod_visible = true;

        if ponds.is_empty() {
            debug!("cast skipped, no ponds in the world");
            return;
        }
        let Some(bobber) = self.bobber else {
            debug!("cast skipped, no bobber");
            return;
        };

        let forward = context.camera.forward;
        let launch = context.character_position
            + Vec3::Y * tuning.hand_height
            + forward * tuning.forward_offset;
        physics.teleport(bobber, launch);
        physics.set_force(bobber, Vec3::ZERO);
        physics.set_enabled(bobber, true);
        physics.set_linear_velocity(bobber, forward * tuning.cast_speed + Vec3::Y * tuning.arc_speed);
        self.bobber_active = true;
        self.settle = Some(tuning.settle_delay);
        info!("cast bobber from {:?}", launch);
    }

    /// Strings the line once the settle delay has passed. Retries every tick
    /// until both the hand and the bobber have a position.
    fn settle_line<P: RopePhysics<Handle = H>>(
        &mut self,
        physics: &mut P,
        context: &CastContext,
        tuning: &FishingTuning,
        delta: f32,
    ) {
        let Some(remaining) = self.settle else {
            return;
        };
        let remaining = remaining - delta;
        if remaining > 0.0 {
            self.settle = Some(remaining);
            return;
        }
        self.settle = Some(0.0);

        let Some(bobber) = self.bobber else {
            return;
        };
        let (Some(hand), Some(bobber_position)) = (context.hand_position, physics.position(bobber))
        else {
            debug!("line not strung yet, hand or bobber position unavailable");
            return;
        };
        self.line = Some(RopeChain::build(
            physics,
            hand,
            bobber,
            bobber_position,
            tuning.segment_count,
        ));
        // New segment bodies may not be readable until the next tick.
        self.samples
            .seed(hand, bobber_position, tuning.segment_count);
        self.settle = None;
    }

    fn float_bobber<P: RopePhysics<Handle = H>>(
        &mut self,
        physics: &mut P,
        ponds: &Ponds,
        tuning: &FishingTuning,
    ) {
        let Some(bobber) = self.bobber.filter(|_| self.bobber_active) else {
            return;
        };
        let (Some(position), Some(velocity)) =
            (physics.position(bobber), physics.linear_velocity(bobber))
        else {
            return;
        };
        match bobber_buoyancy(position, velocity, ponds, tuning) {
            Some(buoyancy) => {
                physics.set_force(bobber, buoyancy.force);
                physics.set_linear_velocity(bobber, buoyancy.velocity);
            }
            None => physics.set_force(bobber, Vec3::ZERO),
        }
    }

    /// Tears down the line and stows the bobber and rod.
    pub fn reel_in<P: RopePhysics<Handle = H>>(&mut self, physics: &mut P) {
        if let Some(line) = self.line.take() {
            line.dispose(physics);
        }
        self.samples.clear();
        if let Some(bobber) = self.bobber {
            physics.set_linear_velocity(bobber, Vec3::ZERO);
            physics.set_force(bobber, Vec3::ZERO);
            physics.set_enabled(bobber, false);
        }
        self.settle = None;
        self.bobber_active = false;
        self.rod_visible = false;
        info!("reeled in");
    }

    /// Line points to draw, while a line exists.
    pub fn line_points(&self) -> Option<&[Vec3]> {
        self.line.as_ref().map(|_| self.samples.points())
    }
}
