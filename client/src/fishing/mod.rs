pub mod physics;
pub mod render;

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use shared::character::CharacterController;
use shared::clock::FrameClock;
use shared::config::{FishingTuning, GameplayConfig};
use shared::fishing::{CastContext, FishingApparatus};
use shared::input::MovementInput;
use shared::physics::BobberPhysicsBundle;
use shared::pond::Ponds;
use shared::sets::{GamePrepareSet, GameUpdateSet};

use crate::camera::{camera_basis, OrbitCamera};
use crate::constants::{ROD_ASSET, ROD_OFFSET, ROD_PITCH};
use crate::player::CharacterBones;
pub use physics::{RapierTackle, TackleBody};

#[derive(Resource, Debug)]
pub struct RodAssets {
    scene: Handle<Scene>,
}

/// Rod model parented to the hand joint.
#[derive(Component, Debug)]
pub struct FishingRod;

#[derive(SystemParam)]
pub struct TackleAssets<'w> {
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
}

/// The bobber lives for the whole session and is parked disabled while the
/// rod is stowed.
pub fn spawn_bobber(
    commands: &mut Commands,
    assets: &mut TackleAssets,
    tuning: &FishingTuning,
    position: Vec3,
) -> Entity {
    commands
        .spawn((
            Name::new("Bobber"),
            TackleBody,
            BobberPhysicsBundle::new(tuning),
            Mesh3d(assets.meshes.add(Sphere::new(tuning.bobber_radius))),
            MeshMaterial3d(assets.materials.add(StandardMaterial {
                base_color: Color::srgb(0.9, 0.15, 0.1),
                ..default()
            })),
            Transform::from_translation(position),
            Visibility::Hidden,
        ))
        .id()
}

pub fn load_rod_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(RodAssets {
        scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(ROD_ASSET)),
    });
}

/// Puts the rod in the character's hand once both exist. Until then fishing
/// toggles are ignored.
pub fn attach_rod(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    rod: Res<RodAssets>,
    mut failed: Local<bool>,
    mut characters: Query<(&CharacterBones, &mut FishingApparatus<Entity>)>,
) {
    if *failed {
        return;
    }
    for (bones, mut apparatus) in characters.iter_mut() {
        if apparatus.rod_attached {
            continue;
        }
        let Some(hand) = bones.hand else {
            continue;
        };
        match asset_server.load_state(&rod.scene) {
            LoadState::Loaded => {}
            LoadState::Failed(err) => {
                error!("Failed to load {}: {}, fishing disabled", ROD_ASSET, err);
                *failed = true;
                return;
            }
            _ => return,
        }

        commands.spawn((
            Name::new("Fishing rod"),
            FishingRod,
            SceneRoot(rod.scene.clone()),
            Transform::from_translation(ROD_OFFSET).with_rotation(Quat::from_rotation_x(ROD_PITCH)),
            Visibility::Hidden,
            ChildOf(hand),
        ));
        apparatus.rod_attached = true;
        info!("Fishing rod attached to hand");
    }
}

/// Toggle, cast, line and buoyancy for every character's apparatus.
pub fn fishing_system(
    clock: Res<FrameClock>,
    input: Res<MovementInput>,
    ponds: Res<Ponds>,
    config: Res<GameplayConfig>,
    cameras: Query<&Transform, (With<OrbitCamera>, Without<TackleBody>)>,
    hands: Query<&GlobalTransform>,
    mut characters: Query<
        (
            &mut FishingApparatus<Entity>,
            &mut CharacterController,
            &Transform,
            Option<&CharacterBones>,
        ),
        Without<TackleBody>,
    >,
    mut tackle: RapierTackle,
) {
    let basis = cameras.single().map(camera_basis).unwrap_or_default();

    for (mut apparatus, mut controller, transform, bones) in characters.iter_mut() {
        if input.toggle_fishing {
            apparatus.toggle(&mut tackle, &config.fishing);
        }

        let hand_position = bones
            .and_then(|bones| bones.hand)
            .and_then(|hand| hands.get(hand).ok())
            .map(GlobalTransform::translation);
        let context = CastContext {
            character_position: transform.translation,
            hand_position,
            camera: basis,
        };
        apparatus.update(&mut tackle, &context, &ponds, &config.fishing, clock.delta);

        if controller.fishing != apparatus.is_fishing() {
            controller.fishing = apparatus.is_fishing();
        }
    }
}

pub fn fishing_plugin(app: &mut App) {
    app.add_systems(Startup, load_rod_assets)
        .add_systems(Update, attach_rod.in_set(GamePrepareSet::Activation))
        .add_systems(
            PostUpdate,
            (
                fishing_system.in_set(GameUpdateSet::FishingApparatus),
                (render::sync_rod_visibility, render::draw_fishing_line)
                    .after(GameUpdateSet::FishingApparatus),
            ),
        );
}
