pub mod level;
pub mod surfaces;

use bevy::prelude::*;
use shared::pond::Ponds;
use shared::sets::GamePrepareSet;

use crate::constants::SKY_COLOR;
use crate::LevelState;

pub use surfaces::{PondGround, WalkableGround, WorldSurfaces};

pub fn world_plugin(app: &mut App) {
    app.init_resource::<Ponds>()
        .insert_resource(ClearColor(SKY_COLOR))
        .add_systems(Startup, level::setup_level)
        .add_systems(
            Update,
            level::activate_level
                .in_set(GamePrepareSet::Activation)
                .run_if(in_state(LevelState::Loading)),
        );
}
