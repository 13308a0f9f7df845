//! Geometry queries the gameplay core needs from the physics engine.
//!
//! The core never talks to Rapier directly. Fish probe the pond walls and the
//! character probes walkable ground through [`SurfaceQuery`], which the client
//! implements on top of the Rapier query pipeline.

use bevy::prelude::*;

/// Named collections of static colliders a ray can be cast against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceSet {
    /// Pond bed and walls, the obstacles fish steer around.
    PondGround,
    /// Every surface the character can stand on.
    Walkable,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    pub normal: Vec3,
}

pub trait SurfaceQuery {
    /// Nearest hit along `direction` within `max_distance`, if any.
    fn cast_ray(
        &self,
        set: SurfaceSet,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit>;
}

/// A world with no static geometry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSurfaces;

impl SurfaceQuery for NoSurfaces {
    fn cast_ray(&self, _: SurfaceSet, _: Vec3, _: Vec3, _: f32) -> Option<RayHit> {
        None
    }
}

/// Infinite horizontal planes, one list per surface set. Used by tests and by
/// tools that want deterministic ground without a physics world.
#[derive(Debug, Default, Clone)]
pub struct FlatSurfaces {
    pub pond_ground: Vec<Plane>,
    pub walkable: Vec<Plane>,
}

/// Plane through `point` with unit `normal`.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            point,
            normal: normal.normalize_or(Vec3::Y),
        }
    }

    pub fn horizontal(height: f32) -> Self {
        Self::new(Vec3::new(0.0, height, 0.0), Vec3::Y)
    }

    fn intersect(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let denom = self.normal.dot(direction);
        if denom.abs() < f32::EPSILON {
            return None;
        }
        let distance = self.normal.dot(self.point - origin) / denom;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }
        // Report the face the ray actually hit.
        let normal = if denom > 0.0 { -self.normal } else { self.normal };
        Some(RayHit {
            point: origin + direction * distance,
            distance,
            normal,
        })
    }
}

impl SurfaceQuery for FlatSurfaces {
    fn cast_ray(
        &self,
        set: SurfaceSet,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
    ) -> Option<RayHit> {
        let direction = direction.normalize_or_zero();
        if direction == Vec3::ZERO {
            return None;
        }
        let planes = match set {
            SurfaceSet::PondGround => &self.pond_ground,
            SurfaceSet::Walkable => &self.walkable,
        };
        planes
            .iter()
            .filter_map(|plane| plane.intersect(origin, direction, max_distance))
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_plane_wins() {
        let surfaces = FlatSurfaces {
            pond_ground: vec![],
            walkable: vec![Plane::horizontal(-3.0), Plane::horizontal(-1.0)],
        };
        let hit = surfaces
            .cast_ray(SurfaceSet::Walkable, Vec3::ZERO, Vec3::NEG_Y, 10.0)
            .unwrap();
        assert!((hit.distance - 1.0).abs() < 1e-6);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_out_of_range_misses() {
        let surfaces = FlatSurfaces {
            pond_ground: vec![Plane::horizontal(-10.0)],
            walkable: vec![],
        };
        assert!(surfaces
            .cast_ray(SurfaceSet::PondGround, Vec3::ZERO, Vec3::NEG_Y, 5.0)
            .is_none());
        assert!(surfaces
            .cast_ray(SurfaceSet::Walkable, Vec3::ZERO, Vec3::NEG_Y, 50.0)
            .is_none());
    }

    #[test]
    fn test_wall_normal_faces_the_ray() {
        let wall = Plane::new(Vec3::new(2.0, 0.0, 0.0), Vec3::X);
        let surfaces = FlatSurfaces {
            pond_ground: vec![wall],
            walkable: vec![],
        };
        let hit = surfaces
            .cast_ray(SurfaceSet::PondGround, Vec3::ZERO, Vec3::X, 5.0)
            .unwrap();
        assert_eq!(hit.normal, Vec3::NEG_X);
        assert!((hit.point.x - 2.0).abs() < 1e-6);
    }
}
