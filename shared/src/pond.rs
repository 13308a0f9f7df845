use bevy::math::{bounding::Aabb3d, Vec3};
use bevy::reflect::Reflect;
use bevy_ecs::resource::Resource;
use rand::Rng;

use crate::constants::{POND_DEPTH, SURFACE_CLEARANCE};

/// Index of a pond inside [`Ponds`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct PondId(pub usize);

/// Static volume of water fish live in. Built once from the water surface and
/// the ground it sits on; never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pond {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
    pub surface_y: f32,
}

impl Pond {
    /// The footprint is the XZ overlap of the two boxes. Boxes that do not
    /// overlap give an empty pond rather than an error.
    pub fn from_bounds(water: &Aabb3d, ground: &Aabb3d, surface_y: f32) -> Self {
        Self {
            min_x: water.min.x.max(ground.min.x),
            max_x: water.max.x.min(ground.max.x),
            min_z: water.min.z.max(ground.min.z),
            max_z: water.max.z.min(ground.max.z),
            surface_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min_x >= self.max_x || self.min_z >= self.max_z
    }

    /// Lowest and highest heights a fish may occupy.
    pub fn swim_band(&self) -> (f32, f32) {
        (
            self.surface_y - POND_DEPTH,
            self.surface_y - SURFACE_CLEARANCE,
        )
    }

    pub fn contains_xz(&self, p: Vec3) -> bool {
        !self.is_empty()
            && (self.min_x..=self.max_x).contains(&p.x)
            && (self.min_z..=self.max_z).contains(&p.z)
    }

    pub fn contains(&self, p: Vec3) -> bool {
        let (bottom, top) = self.swim_band();
        self.contains_xz(p) && (bottom..=top).contains(&p.y)
    }

    pub fn clamp(&self, p: Vec3) -> Vec3 {
        let (bottom, top) = self.swim_band();
        let x = if self.min_x < self.max_x {
            p.x.clamp(self.min_x, self.max_x)
        } else {
            p.x
        };
        let z = if self.min_z < self.max_z {
            p.z.clamp(self.min_z, self.max_z)
        } else {
            p.z
        };
        Vec3::new(x, p.y.clamp(bottom, top), z)
    }

    /// Middle of the footprint, halfway down the swim band.
    pub fn center(&self) -> Vec3 {
        let (bottom, top) = self.swim_band();
        Vec3::new(
            (self.min_x + self.max_x) / 2.0,
            (bottom + top) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    /// Positive below the surface, negative above it.
    pub fn depth_at(&self, y: f32) -> f32 {
        self.surface_y - y
    }

    /// Where to cast the downward ground probe used by [`Pond::spawn_point`].
    pub fn ground_probe_origin(&self) -> Vec3 {
        self.center().with_y(self.surface_y + 10.0)
    }

    /// Random spawn inside the central quarter of the footprint, halfway
    /// between the pond bed and the top of the swim band.
    pub fn spawn_point(&self, ground_height: Option<f32>, rng: &mut impl Rng) -> Vec3 {
        let (bottom, top) = self.swim_band();
        let center = self.center();
        let ground = ground_height.unwrap_or(bottom);
        let y = ((ground + 1.0 + top) / 2.0).clamp(bottom, top);

        let half_x = ((self.max_x - self.min_x) / 8.0).max(0.0);
        let half_z = ((self.max_z - self.min_z) / 8.0).max(0.0);
        let x = center.x + jitter(rng, half_x);
        let z = center.z + jitter(rng, half_z);

        Vec3::new(x, y, z)
    }
}

fn jitter(rng: &mut impl Rng, half_extent: f32) -> f32 {
    if half_extent > 0.0 {
        rng.gen_range(-half_extent..=half_extent)
    } else {
        0.0
    }
}

/// Every pond found in the loaded world.
#[derive(Resource, Debug, Default, Clone)]
pub struct Ponds(pub Vec<Pond>);

impl Ponds {
    pub fn get(&self, id: PondId) -> Option<&Pond> {
        self.0.get(id.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PondId, &Pond)> {
        self.0.iter().enumerate().map(|(i, pond)| (PondId(i), pond))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3A;
    use rand::{rngs::StdRng, SeedableRng};

    fn aabb(min: Vec3, max: Vec3) -> Aabb3d {
        Aabb3d {
            min: Vec3A::from(min),
            max: Vec3A::from(max),
        }
    }

    fn sample_pond() -> Pond {
        Pond::from_bounds(
            &aabb(Vec3::new(-10.0, 0.0, -10.0), Vec3::new(10.0, 0.0, 10.0)),
            &aabb(Vec3::new(-5.0, -8.0, -20.0), Vec3::new(20.0, 1.0, 4.0)),
            0.0,
        )
    }

    #[test]
    fn test_footprint_is_the_overlap() {
        let pond = sample_pond();
        assert_eq!(pond.min_x, -5.0);
        assert_eq!(pond.max_x, 10.0);
        assert_eq!(pond.min_z, -10.0);
        assert_eq!(pond.max_z, 4.0);
        assert_eq!(pond.swim_band(), (-5.0, -0.5));
        assert!(pond.swim_band().1 < pond.surface_y);
    }

    #[test]
    fn test_half_overlapping_squares() {
        let pond = Pond::from_bounds(
            &aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(10.0, 0.0, 10.0)),
            &aabb(Vec3::new(5.0, -3.0, 5.0), Vec3::new(15.0, 0.0, 15.0)),
            0.0,
        );
        assert_eq!(
            (pond.min_x, pond.max_x, pond.min_z, pond.max_z),
            (5.0, 10.0, 5.0, 10.0)
        );
    }

    #[test]
    fn test_containment_and_clamp() {
        let pond = sample_pond();
        assert!(pond.contains(Vec3::new(0.0, -2.0, 0.0)));
        assert!(!pond.contains(Vec3::new(0.0, -0.2, 0.0)));
        assert!(pond.contains_xz(Vec3::new(0.0, 30.0, 0.0)));
        assert!(!pond.contains_xz(Vec3::new(-6.0, -2.0, 0.0)));

        let clamped = pond.clamp(Vec3::new(50.0, 3.0, -50.0));
        assert_eq!(clamped, Vec3::new(10.0, -0.5, -10.0));
        assert_eq!(pond.depth_at(-2.0), 2.0);
    }

    #[test]
    fn test_disjoint_boxes_make_an_empty_pond() {
        let pond = Pond::from_bounds(
            &aabb(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0)),
            &aabb(Vec3::new(5.0, -1.0, 5.0), Vec3::new(6.0, 0.0, 6.0)),
            0.0,
        );
        assert!(pond.is_empty());
        assert!(!pond.contains_xz(Vec3::new(0.5, 0.0, 0.5)));
        assert!(!pond.contains(Vec3::new(5.5, -1.0, 5.5)));

        let p = Vec3::new(3.0, -2.0, 3.0);
        let clamped = pond.clamp(p);
        assert_eq!(clamped.x, p.x);
        assert_eq!(clamped.z, p.z);
    }

    #[test]
    fn test_spawn_points_stay_in_the_swim_band() {
        let pond = sample_pond();
        let mut rng = StdRng::seed_from_u64(7);
        for ground in [None, Some(-4.0), Some(-20.0), Some(3.0)] {
            for _ in 0..32 {
                let p = pond.spawn_point(ground, &mut rng);
                assert!(pond.contains(p), "{p:?} outside pond");
            }
        }
        let p = pond.spawn_point(Some(-4.0), &mut rng);
        assert!((p.y - (-4.0 + 1.0 - 0.5) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_ponds_lookup() {
        let ponds = Ponds(vec![sample_pond()]);
        assert!(ponds.get(PondId(0)).is_some());
        assert!(ponds.get(PondId(1)).is_none());
        assert_eq!(ponds.iter().count(), 1);
    }
}
