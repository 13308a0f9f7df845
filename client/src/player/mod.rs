pub mod controller;
pub mod feet;

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use shared::character::CharacterController;
use shared::config::GameplayConfig;
use shared::fishing::FishingApparatus;
use shared::physics::CharacterPhysicsBundle;
use shared::sets::{GamePrepareSet, GameUpdateSet};
use shared::{FOOT_JOINTS, HAND_JOINT};

use crate::animation::{find_named_descendant, ClipLibrary, StartClip};
use crate::constants::{CHARACTER_ASSET, CHARACTER_SPAWN};
use crate::fishing::{spawn_bobber, TackleAssets};
use crate::LevelState;

/// Inert placeholder for the character until its model is loaded.
#[derive(Component, Debug)]
pub struct CharacterAssets {
    gltf: Handle<Gltf>,
    scene: Handle<Scene>,
}

/// Skeleton joints the gameplay systems drive or follow.
#[derive(Component, Debug, Default, Clone)]
pub struct CharacterBones {
    pub hand: Option<Entity>,
    pub feet: Vec<Entity>,
}

pub fn spawn_character(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        Name::new("ReelGuy"),
        CharacterAssets {
            gltf: asset_server.load(CHARACTER_ASSET),
            scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(CHARACTER_ASSET)),
        },
        Transform::from_translation(CHARACTER_SPAWN),
        Visibility::default(),
    ));
}

/// Turns the placeholder into a physical, animated character once both the
/// model and the level are there to stand on.
pub fn activate_character(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    gltfs: Res<Assets<Gltf>>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    config: Res<GameplayConfig>,
    mut tackle_assets: TackleAssets,
    placeholders: Query<(Entity, &CharacterAssets)>,
) {
    for (entity, assets) in placeholders.iter() {
        if let LoadState::Failed(err) = asset_server.load_state(&assets.gltf) {
            error!("Failed to load {}: {}, no character", CHARACTER_ASSET, err);
            commands.entity(entity).despawn();
            continue;
        }
        let Some(gltf) = gltfs.get(&assets.gltf) else {
            continue;
        };

        let library = ClipLibrary::from_gltf(gltf, &mut graphs);
        info!("Character loaded with {} clips", library.clip_count());

        let mut apparatus = FishingApparatus::<Entity>::new(config.fishing.segment_count);
        apparatus.bobber = Some(spawn_bobber(
            &mut commands,
            &mut tackle_assets,
            &config.fishing,
            CHARACTER_SPAWN,
        ));

        let foot_offset = CharacterPhysicsBundle::foot_offset(&config.character);
        commands
            .entity(entity)
            .remove::<CharacterAssets>()
            .insert((
                CharacterController::default(),
                CharacterPhysicsBundle::new(&config.character),
                apparatus,
                library,
                StartClip {
                    name: "idle",
                    or_first: false,
                    speed: 1.0,
                },
            ))
            .with_children(|parent| {
                parent
                    .spawn((
                        SceneRoot(assets.scene.clone()),
                        Transform::from_xyz(0.0, -foot_offset, 0.0),
                    ))
                    .observe(find_character_bones);
            });
    }
}

fn find_character_bones(
    trigger: Trigger<SceneInstanceReady>,
    mut commands: Commands,
    parents: Query<&ChildOf>,
    children: Query<&Children>,
    names: Query<&Name>,
) {
    let model = trigger.target();
    let Ok(character) = parents.get(model).map(ChildOf::parent) else {
        return;
    };

    let hand = find_named_descendant(model, HAND_JOINT, &children, &names);
    let feet: Vec<Entity> = FOOT_JOINTS
        .iter()
        .filter_map(|joint| find_named_descendant(model, joint, &children, &names))
        .collect();
    if hand.is_none() {
        debug!("character has no '{}' joint, fishing disabled", HAND_JOINT);
    }
    if feet.len() < FOOT_JOINTS.len() {
        debug!("character has {} of {} foot joints", feet.len(), FOOT_JOINTS.len());
    }
    commands
        .entity(character)
        .insert(CharacterBones { hand, feet });
}

pub fn player_plugin(app: &mut App) {
    app.register_type::<CharacterController>()
        .add_systems(Startup, spawn_character)
        .add_systems(
            Update,
            activate_character
                .in_set(GamePrepareSet::Activation)
                .run_if(in_state(LevelState::Ready)),
        )
        .add_systems(
            PostUpdate,
            (
                controller::character_water_system.in_set(GameUpdateSet::CharacterWater),
                controller::character_motion_system.in_set(GameUpdateSet::CharacterMotion),
                feet::align_feet_system.in_set(GameUpdateSet::FootAlignment),
            ),
        );
}
