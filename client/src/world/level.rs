//! Level scene loading: colliders for every solid mesh and ponds for every
//! water surface.

use bevy::asset::LoadState;
use bevy::ecs::system::SystemParam;
use bevy::math::bounding::Aabb3d;
use bevy::math::Vec3A;
use bevy::prelude::*;
use bevy::render::mesh::MeshAabb;
use bevy::render::primitives::Aabb;
use bevy::scene::SceneInstance;
use bevy_rapier3d::prelude::*;
use shared::physics::collision_groups;
use shared::pond::{Pond, Ponds};

use super::surfaces::{PondGround, WalkableGround};
use crate::constants::LEVEL_ASSET;
use crate::LevelState;

#[derive(Component, Debug)]
pub struct LevelScene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelMeshKind {
    Water,
    /// Pond bed. Also walkable.
    Ground,
    Walkable,
}

pub fn classify_mesh(name: &str) -> LevelMeshKind {
    if name.starts_with("water") {
        LevelMeshKind::Water
    } else if name.to_lowercase().contains("ground") || name == "Plane" {
        LevelMeshKind::Ground
    } else {
        LevelMeshKind::Walkable
    }
}

/// glTF primitives carry generated names, so the owning node's name counts
/// too. Water wins over ground.
pub fn classify_names<'a>(names: impl IntoIterator<Item = &'a str>) -> LevelMeshKind {
    names
        .into_iter()
        .map(classify_mesh)
        .fold(LevelMeshKind::Walkable, |kind, next| match (kind, next) {
            (LevelMeshKind::Water, _) | (_, LevelMeshKind::Water) => LevelMeshKind::Water,
            (LevelMeshKind::Ground, _) | (_, LevelMeshKind::Ground) => LevelMeshKind::Ground,
            _ => LevelMeshKind::Walkable,
        })
}

/// Bounds of a mesh-local box after `transform`, axis aligned in world space.
pub fn world_aabb(local: &Aabb, transform: &GlobalTransform) -> Aabb3d {
    let center = Vec3::from(local.center);
    let half = Vec3::from(local.half_extents);
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for corner in 0..8 {
        let sign = Vec3::new(
            if corner & 1 == 0 { -1.0 } else { 1.0 },
            if corner & 2 == 0 { -1.0 } else { 1.0 },
            if corner & 4 == 0 { -1.0 } else { 1.0 },
        );
        let world = transform.transform_point(center + half * sign);
        min = min.min(world);
        max = max.max(world);
    }
    Aabb3d {
        min: Vec3A::from(min),
        max: Vec3A::from(max),
    }
}

fn merge(a: Aabb3d, b: Aabb3d) -> Aabb3d {
    Aabb3d {
        min: a.min.min(b.min),
        max: a.max.max(b.max),
    }
}

/// One pond per water surface, footprint cut down to the ground under it.
/// The surface height is the middle of the water mesh's bounds.
pub fn build_ponds(water: &[Aabb3d], ground: &[Aabb3d]) -> Ponds {
    let Some(ground) = ground.iter().copied().reduce(merge) else {
        return Ponds::default();
    };
    Ponds(
        water
            .iter()
            .map(|surface| {
                let surface_y = (surface.min.y + surface.max.y) / 2.0;
                Pond::from_bounds(surface, &ground, surface_y)
            })
            .collect(),
    )
}

pub fn setup_level(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn((
        Name::new("Level"),
        LevelScene,
        SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(LEVEL_ASSET))),
    ));

    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::default().looking_to(Vec3::new(-60.0, -100.0, -100.0), Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.89, 0.95, 0.99),
        brightness: 400.0,
        ..default()
    });
}

#[derive(SystemParam)]
pub struct LevelMeshQueries<'w, 's> {
    children: Query<'w, 's, &'static Children>,
    meshes: Query<'w, 's, (&'static Mesh3d, &'static GlobalTransform)>,
    names: Query<'w, 's, &'static Name>,
    parents: Query<'w, 's, &'static ChildOf>,
}

impl LevelMeshQueries<'_, '_> {
    fn kind(&self, entity: Entity) -> LevelMeshKind {
        let own = self.names.get(entity).ok();
        let node = self
            .parents
            .get(entity)
            .ok()
            .and_then(|parent| self.names.get(parent.parent()).ok());
        classify_names(own.into_iter().chain(node).map(Name::as_str))
    }
}

/// Waits for the level scene, then sets up its colliders and ponds.
pub fn activate_level(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    scene_spawner: Res<SceneSpawner>,
    levels: Query<(Entity, &SceneRoot, Option<&SceneInstance>), With<LevelScene>>,
    level_meshes: LevelMeshQueries,
    mesh_assets: Res<Assets<Mesh>>,
    mut next_state: ResMut<NextState<LevelState>>,
) {
    let Ok((level, scene, instance)) = levels.single() else {
        return;
    };

    if let LoadState::Failed(err) = asset_server.load_state(&scene.0) {
        error!("Failed to load level {}: {}", LEVEL_ASSET, err);
        next_state.set(LevelState::Failed);
        return;
    }
    let Some(instance) = instance else {
        return;
    };
    if !scene_spawner.instance_is_ready(**instance) {
        return;
    }

    let mut water = Vec::new();
    let mut ground = Vec::new();
    let mut colliders = 0;

    for entity in level_meshes.children.iter_descendants(level) {
        let Ok((mesh, transform)) = level_meshes.meshes.get(entity) else {
            continue;
        };
        let Some(mesh) = mesh_assets.get(&mesh.0) else {
            debug!("level mesh {:?} has no data", entity);
            continue;
        };
        let kind = level_meshes.kind(entity);

        if let Some(local) = mesh.compute_aabb() {
            match kind {
                LevelMeshKind::Water => water.push(world_aabb(&local, transform)),
                LevelMeshKind::Ground => ground.push(world_aabb(&local, transform)),
                LevelMeshKind::Walkable => {}
            }
        }
        if kind == LevelMeshKind::Water {
            continue;
        }

        let Some(collider) =
            Collider::from_bevy_mesh(mesh, &ComputedColliderShape::TriMesh(TriMeshFlags::default()))
        else {
            debug!("level mesh {:?} cannot be turned into a collider", entity);
            continue;
        };
        let mut entity_commands = commands.entity(entity);
        entity_commands.insert((
            collider,
            CollisionGroups::new(collision_groups::WORLD, Group::ALL),
            Friction::coefficient(0.5),
            Restitution::coefficient(0.2),
            WalkableGround,
        ));
        if kind == LevelMeshKind::Ground {
            entity_commands.insert(PondGround);
        }
        colliders += 1;
    }

    let ponds = build_ponds(&water, &ground);
    for (id, pond) in ponds.iter() {
        info!(
            "Pond {:?}: x {:.2}..{:.2}, z {:.2}..{:.2}, surface {:.2}{}",
            id,
            pond.min_x,
            pond.max_x,
            pond.min_z,
            pond.max_z,
            pond.surface_y,
            if pond.is_empty() { " (empty)" } else { "" }
        );
    }
    if ponds.is_empty() {
        warn!(
            "Level has {} water and {} ground meshes, no ponds built",
            water.len(),
            ground.len()
        );
    }
    info!("Level ready with {} colliders", colliders);

    commands.insert_resource(ponds);
    next_state.set(LevelState::Ready);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aabb(min: Vec3, max: Vec3) -> Aabb3d {
        Aabb3d {
            min: min.into(),
            max: max.into(),
        }
    }

    #[test]
    fn test_mesh_names_are_classified() {
        assert_eq!(classify_mesh("water"), LevelMeshKind::Water);
        assert_eq!(classify_mesh("water.001"), LevelMeshKind::Water);
        assert_eq!(classify_mesh("Ground_Rocks"), LevelMeshKind::Ground);
        assert_eq!(classify_mesh("Plane"), LevelMeshKind::Ground);
        assert_eq!(classify_mesh("Plane.002"), LevelMeshKind::Walkable);
        assert_eq!(classify_mesh("Tree"), LevelMeshKind::Walkable);
    }

    #[test]
    fn test_node_name_classifies_primitives() {
        assert_eq!(classify_names(["Mesh.0", "water"]), LevelMeshKind::Water);
        assert_eq!(classify_names(["ground.0", "water.001"]), LevelMeshKind::Water);
        assert_eq!(classify_names(["Plane"]), LevelMeshKind::Ground);
        assert_eq!(classify_names([]), LevelMeshKind::Walkable);
    }

    #[test]
    fn test_world_aabb_follows_transform() {
        let local = Aabb::from_min_max(Vec3::new(-1.0, 0.0, -1.0), Vec3::new(1.0, 0.0, 1.0));
        let transform = GlobalTransform::from(
            Transform::from_xyz(10.0, 2.0, 0.0).with_scale(Vec3::new(3.0, 1.0, 2.0)),
        );
        let world = world_aabb(&local, &transform);
        assert_eq!(Vec3::from(world.min), Vec3::new(7.0, 2.0, -2.0));
        assert_eq!(Vec3::from(world.max), Vec3::new(13.0, 2.0, 2.0));
    }

    #[test]
    fn test_one_pond_per_water_surface() {
        let ground = [
            aabb(Vec3::new(-20.0, -4.0, -20.0), Vec3::new(0.0, 0.0, 20.0)),
            aabb(Vec3::new(0.0, -4.0, -20.0), Vec3::new(20.0, 0.0, 20.0)),
        ];
        let water = [
            aabb(Vec3::new(-30.0, 1.0, -5.0), Vec3::new(-10.0, 1.0, 5.0)),
            aabb(Vec3::new(5.0, 0.0, 0.0), Vec3::new(10.0, 2.0, 10.0)),
        ];
        let ponds = build_ponds(&water, &ground);
        assert_eq!(ponds.0.len(), 2);
        assert_eq!(ponds.0[0].min_x, -20.0);
        assert_eq!(ponds.0[0].surface_y, 1.0);
        assert_eq!(ponds.0[1].surface_y, 1.0);
        assert_eq!(ponds.0[1].max_z, 10.0);
    }

    #[test]
    fn test_no_ground_means_no_ponds() {
        let water = [aabb(Vec3::ZERO, Vec3::ONE)];
        assert!(build_ponds(&water, &[]).is_empty());
    }
}
