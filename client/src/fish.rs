//! Fish spawning and the per-frame flock update.

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use rand::Rng;
use shared::clock::FrameClock;
use shared::fish::{Fish, FlockMember};
use shared::physics::FishPhysicsBundle;
use shared::pond::Ponds;
use shared::sets::{GamePrepareSet, GameUpdateSet};
use shared::steering::{heading, yaw_rotation};
use shared::surfaces::{SurfaceQuery, SurfaceSet};

use crate::animation::{ClipLibrary, StartClip};
use crate::constants::*;
use crate::world::{PondGround, WorldSurfaces};
use crate::{FishPerPond, LevelState};

#[derive(Resource, Debug)]
pub struct FishAssets {
    gltf: Handle<Gltf>,
    scene: Handle<Scene>,
}

pub fn load_fish_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(FishAssets {
        gltf: asset_server.load(FISH_ASSET),
        scene: asset_server.load(GltfAssetLabel::Scene(0).from_asset(FISH_ASSET)),
    });
}

#[derive(SystemParam)]
pub struct FishSpawnResources<'w> {
    asset_server: Res<'w, AssetServer>,
    fish_assets: Res<'w, FishAssets>,
    gltfs: Res<'w, Assets<Gltf>>,
    graphs: ResMut<'w, Assets<AnimationGraph>>,
    ponds: Res<'w, Ponds>,
    fish_per_pond: Res<'w, FishPerPond>,
}

/// Fills every pond once the fish model is loaded and the pond beds can be
/// ray cast.
pub fn spawn_fish(
    mut commands: Commands,
    mut done: Local<bool>,
    resources: FishSpawnResources,
    pending_ground: Query<(), (With<PondGround>, Without<RapierColliderHandle>)>,
    surfaces: WorldSurfaces,
) {
    if *done {
        return;
    }
    let FishSpawnResources {
        asset_server,
        fish_assets,
        gltfs,
        mut graphs,
        ponds,
        fish_per_pond,
    } = resources;

    if let LoadState::Failed(err) = asset_server.load_state(&fish_assets.gltf) {
        error!("Failed to load {}: {}, ponds stay empty", FISH_ASSET, err);
        *done = true;
        return;
    }
    let Some(gltf) = gltfs.get(&fish_assets.gltf) else {
        return;
    };
    if !pending_ground.is_empty() {
        return;
    }
    *done = true;

    let library = ClipLibrary::from_gltf(gltf, &mut graphs);
    let mut rng = rand::thread_rng();
    let mut count = 0;

    for (pond_id, pond) in ponds.iter() {
        if pond.is_empty() {
            debug!("skipping empty pond {:?}", pond_id);
            continue;
        }
        let ground = surfaces
            .cast_ray(
                SurfaceSet::PondGround,
                pond.ground_probe_origin(),
                Vec3::NEG_Y,
                GROUND_PROBE_LENGTH,
            )
            .map(|hit| hit.point.y);

        for i in 0..fish_per_pond.0 {
            let fish = Fish::random(pond_id, &mut rng);
            let position = pond.spawn_point(ground, &mut rng);
            let rotation = yaw_rotation(heading(fish.direction).unwrap_or(0.0));
            let scale = rng.gen_range(FISH_MIN_SCALE..=FISH_MAX_SCALE);
            let playback = rng.gen_range(FISH_MIN_PLAYBACK..=FISH_MAX_PLAYBACK);

            commands
                .spawn((
                    Name::new(format!("Fish {}.{}", pond_id.0, i)),
                    fish,
                    FishPhysicsBundle::new(FISH_COLLIDER_RADIUS * scale),
                    Transform::from_translation(position).with_rotation(rotation),
                    Visibility::default(),
                    library.clone(),
                    StartClip {
                        name: FISH_SWIM_CLIP,
                        or_first: true,
                        speed: playback,
                    },
                ))
                .with_child((
                    SceneRoot(fish_assets.scene.clone()),
                    Transform::from_scale(Vec3::splat(scale)),
                ));
            count += 1;
        }
    }
    info!("Spawned {} fish across {} ponds", count, ponds.0.len());
}

/// Steers every fish against a snapshot of the whole school. A fish's entry
/// is refreshed as soon as it has moved, so later fish see the update.
pub fn fish_flock_system(
    clock: Res<FrameClock>,
    ponds: Res<Ponds>,
    surfaces: WorldSurfaces,
    mut school: Query<(&mut Fish, &mut Transform, &mut Velocity)>,
) {
    let mut flock: Vec<FlockMember> = school
        .iter()
        .map(|(fish, transform, _)| fish.member(transform.translation))
        .collect();

    for (index, (mut fish, mut transform, mut velocity)) in school.iter_mut().enumerate() {
        let Some(pond) = ponds.get(fish.pond) else {
            continue;
        };
        let step = fish.swim(transform.translation, pond, clock.elapsed, &flock, &surfaces);

        velocity.linvel = step.velocity;
        velocity.angvel = Vec3::ZERO;
        if let Some(yaw) = step.yaw {
            transform.rotation = yaw_rotation(yaw);
        }
        if let Some(clamped) = step.clamped_position {
            transform.translation = clamped;
        }
        flock[index] = fish.member(transform.translation);
    }
}

pub fn fish_plugin(app: &mut App) {
    app.register_type::<Fish>()
        .add_systems(Startup, load_fish_assets)
        .add_systems(
            Update,
            spawn_fish
                .in_set(GamePrepareSet::Activation)
                .run_if(in_state(LevelState::Ready)),
        )
        .add_systems(PostUpdate, fish_flock_system.in_set(GameUpdateSet::Flock));
}
