use bevy::reflect::Reflect;

/// Locomotion state, one animation clip each.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Jump,
    Float,
    Swim,
    Fishing,
}

impl AnimationState {
    pub fn clip_name(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Jump => "jump",
            AnimationState::Float => "float",
            AnimationState::Swim => "swim",
            AnimationState::Fishing => "fishing",
        }
    }

    /// Every clip loops except the jump take-off.
    pub fn looping(self) -> bool {
        self != AnimationState::Jump
    }

    pub fn playback_rate(self, speed_multiplier: f32) -> f32 {
        let base = match self {
            AnimationState::Walk => 2.0,
            _ => 1.0,
        };
        base * speed_multiplier
    }
}

/// What the character is doing this tick, before the state machine runs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StateInputs {
    pub fishing: bool,
    pub submerged: bool,
    pub starting_jump: bool,
    pub moving: bool,
    pub airborne: bool,
}

/// First match wins: fishing, swimming, jump take-off, moving, idle.
pub fn resolve_state(inputs: StateInputs) -> AnimationState {
    if inputs.fishing {
        AnimationState::Fishing
    } else if inputs.submerged {
        AnimationState::Swim
    } else if inputs.starting_jump {
        AnimationState::Jump
    } else if inputs.moving {
        if inputs.airborne {
            AnimationState::Float
        } else {
            AnimationState::Walk
        }
    } else {
        AnimationState::Idle
    }
}
