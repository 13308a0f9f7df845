//! Player character: locomotion state machine, swimming and foot placement.
//!
//! The controller never touches the physics body or the animation player
//! directly. Each tick it takes the body's velocity and the frame input and
//! hands back the velocity, rotation and clip change to apply.

pub mod feet;
pub mod locomotion;
pub mod state;
pub mod water;

use bevy::prelude::*;
use bevy_log::debug;

pub use state::{resolve_state, AnimationState, StateInputs};

use crate::config::CharacterTuning;
use crate::input::{CameraBasis, MovementInput};
use crate::steering::upright;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CharacterController {
    pub state: AnimationState,
    /// Jump requested, waiting for the take-off clip to finish.
    pub starting_jump: bool,
    pub airborne: bool,
    /// Frame clock time at which continuous movement began.
    pub walk_started: Option<f32>,
    pub speed_multiplier: f32,
    pub walk_direction: Vec3,
    pub facing: Quat,
    pub submerged: bool,
    pub bob_phase: f32,
    pub fishing: bool,
    /// Jump input as seen on the previous tick.
    pub jump_held: bool,
    /// Launch to fire when the current jump clip completes.
    pub launch_pending: bool,
}

impl Default for CharacterController {
    fn default() -> Self {
        Self {
            state: AnimationState::Idle,
            starting_jump: false,
            airborne: false,
            walk_started: None,
            speed_multiplier: 1.0,
            walk_direction: Vec3::ZERO,
            facing: Quat::IDENTITY,
            submerged: false,
            bob_phase: 0.0,
            fishing: false,
            jump_held: false,
            launch_pending: false,
        }
    }
}

/// What a tick asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterStep {
    pub velocity: Vec3,
    /// Upright body rotation.
    pub rotation: Quat,
    /// New state when the clip must change.
    pub transition: Option<AnimationState>,
}

impl CharacterController {
    pub fn tick(
        &mut self,
        input: &MovementInput,
        camera: &CameraBasis,
        velocity: Vec3,
        now: f32,
        tuning: &CharacterTuning,
    ) -> CharacterStep {
        if input.jump && !self.jump_held && !self.airborne {
            self.starting_jump = true;
        }
        self.jump_held = input.jump;

        let moving = input.is_moving();
        let next = resolve_state(StateInputs {
            fishing: self.fishing,
            submerged: self.submerged,
            starting_jump: self.starting_jump,
            moving,
            airborne: self.airborne,
        });

        let mut velocity = velocity;
        match next {
            AnimationState::Swim | AnimationState::Walk | AnimationState::Float if moving => {
                velocity =
                    self.apply_movement(input.world_direction(camera), velocity, now, tuning.walk_speed);
            }
            AnimationState::Jump => {}
            _ => {
                velocity = self.coast(velocity);
                if next == AnimationState::Idle {
                    self.walk_started = None;
                    self.speed_multiplier = 1.0;
                }
            }
        }
        self.update_speed_multiplier(now);

        CharacterStep {
            velocity,
            rotation: upright(self.facing),
            transition: self.enter(next),
        }
    }

    fn enter(&mut self, next: AnimationState) -> Option<AnimationState> {
        if next == self.state {
            return None;
        }
        if self.state == AnimationState::Jump && self.launch_pending {
            debug!("jump clip replaced by {:?} before take-off", next);
            self.launch_pending = false;
            self.starting_jump = false;
        }
        if next == AnimationState::Jump {
            self.launch_pending = true;
        }
        self.state = next;
        Some(next)
    }

    /// Called when a non-looping clip completes. Returns true when the jump
    /// impulse must be applied now.
    pub fn on_clip_finished(&mut self, clip: AnimationState) -> bool {
        if clip != AnimationState::Jump || self.state != AnimationState::Jump || !self.launch_pending
        {
            return false;
        }
        self.launch_pending = false;
        self.starting_jump = false;
        self.airborne = true;
        true
    }

    /// Grounds an airborne character once the ground probe hits and it is no
    /// longer rising. Returns true on the landing tick.
    pub fn land(&mut self, ground_below: bool, vertical_velocity: f32) -> bool {
        if self.airborne && ground_below && vertical_velocity <= 0.0 {
            self.airborne = false;
            return true;
        }
        false
    }

    pub fn playback_rate(&self) -> f32 {
        self.state.playback_rate(self.speed_multiplier)
    }
}
