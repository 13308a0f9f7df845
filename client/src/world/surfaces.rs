use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use shared::surfaces::{RayHit, SurfaceQuery, SurfaceSet};

/// Ground meshes, the floor and walls of the ponds.
#[derive(Component, Debug, Default)]
pub struct PondGround;

/// Any solid level mesh the character can stand on.
#[derive(Component, Debug, Default)]
pub struct WalkableGround;

/// Ray queries against the level colliders, one marker per surface set.
#[derive(SystemParam)]
pub struct WorldSurfaces<'w, 's> {
    rapier_context: Query<
        'w,
        's,
        (
            &'static RapierContextColliders,
            &'static RapierRigidBodySet,
            &'static RapierQueryPipeline,
        ),
    >,
    pond_ground: Query<'w, 's, (), With<PondGround>>,
    walkable: Query<'w, 's, (), With<WalkableGround>>,
}

impl WorldSurfaces<'_, '_> {
    fn in_set(&self, set: SurfaceSet, entity: Entity) -> bool {
        match set {
            SurfaceSet::PondGround => self.pond_ground.contains(entity),
            SurfaceSet::Walkable => self.walkable.contains(entity),
        }
    }

    pub fn has_walkable(&self) -> bool {
        !self.walkable.is_empty()
    }
}

impl SurfaceQuery for WorldSurfaces<'_, '_> {
    fn cast_ray(
        &self,
        set: SurfaceSet,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let Ok((colliders, rigidbody_set, query_pipeline)) = self.rapier_context.single() else {
            return None;
        };
        let direction = direction.try_normalize()?;

        let predicate = |entity: Entity| self.in_set(set, entity);
        let filter = QueryFilter::default().predicate(&predicate);

        let (_, hit) = query_pipeline.cast_ray_and_get_normal(
            colliders,
            rigidbody_set,
            origin,
            direction,
            max_distance,
            true,
            filter,
        )?;

        Some(RayHit {
            point: hit.point,
            distance: hit.time_of_impact,
            normal: hit.normal,
        })
    }
}
