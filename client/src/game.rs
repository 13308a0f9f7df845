use bevy::app::Animation;
use bevy::prelude::*;
use bevy::time::TimeSystem;
use bevy_rapier3d::prelude::PhysicsSet;
use shared::clock::{advance_frame_clock, FrameClock};
use shared::physics::ReelPhysicsPlugin;
use shared::sets::{GamePrepareSet, GameUpdateSet};

use crate::animation::bind_animation_players;
use crate::camera::{follow_character_system, orbit_camera_input_system, spawn_camera};
use crate::config::save_tuning;
use crate::input::data::GameAction;
use crate::input::keyboard::action_just_pressed;
use crate::{fish, fishing, input, player, world};

pub fn game_plugin(app: &mut App) {
    app.add_plugins(ReelPhysicsPlugin)
        .init_resource::<FrameClock>()
        .configure_sets(
            Update,
            (GamePrepareSet::Input, GamePrepareSet::Activation).chain(),
        )
        .configure_sets(
            PostUpdate,
            (
                GameUpdateSet::FishingApparatus,
                GameUpdateSet::CharacterWater,
                GameUpdateSet::CharacterMotion,
                GameUpdateSet::FootAlignment,
                GameUpdateSet::Flock,
            )
                .chain()
                .after(Animation)
                .before(PhysicsSet::SyncBackend),
        )
        .add_systems(First, advance_frame_clock.after(TimeSystem))
        .add_systems(Startup, spawn_camera)
        .add_systems(
            Update,
            (
                bind_animation_players.in_set(GamePrepareSet::Activation),
                orbit_camera_input_system.after(GamePrepareSet::Input),
                save_tuning.run_if(action_just_pressed(GameAction::SaveTuning)),
            ),
        )
        .add_systems(
            PostUpdate,
            follow_character_system
                .after(PhysicsSet::Writeback)
                .before(TransformSystem::TransformPropagate),
        );

    input::input_plugin(app);
    world::world_plugin(app);
    fish::fish_plugin(app);
    player::player_plugin(app);
    fishing::fishing_plugin(app);
}
