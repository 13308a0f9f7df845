use bevy::math::{Quat, Vec3};

use crate::constants::{FOOT_ALIGNMENT_BLEND, FOOT_PROBE_HEIGHT, FOOT_PROBE_LENGTH};
use crate::surfaces::{SurfaceQuery, SurfaceSet};

/// Below this the foot is already flat enough.
const MIN_ALIGNMENT_ANGLE: f32 = 1e-3;

/// Normal of the walkable ground under a foot joint.
pub fn ground_normal_below(foot: Vec3, surfaces: &impl SurfaceQuery) -> Option<Vec3> {
    surfaces
        .cast_ray(
            SurfaceSet::Walkable,
            foot + Vec3::Y * FOOT_PROBE_HEIGHT,
            Vec3::NEG_Y,
            FOOT_PROBE_LENGTH,
        )
        .map(|hit| hit.normal)
}

/// Next world rotation of a foot whose up axis should settle onto `normal`.
/// `None` when the foot is already aligned.
pub fn align_foot(current: Quat, normal: Vec3) -> Option<Quat> {
    let normal = normal.try_normalize()?;
    let up = current * Vec3::Y;
    let correction = Quat::from_rotation_arc(up, normal);
    if correction.angle_between(Quat::IDENTITY) < MIN_ALIGNMENT_ANGLE {
        return None;
    }
    Some(current.slerp(correction * current, FOOT_ALIGNMENT_BLEND))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::{FlatSurfaces, NoSurfaces, Plane};

    #[test]
    fn test_flat_foot_on_flat_ground_is_left_alone() {
        assert_eq!(align_foot(Quat::IDENTITY, Vec3::Y), None);
    }

    #[test]
    fn test_foot_tilts_partway_toward_slope() {
        let slope = Vec3::new(0.0, 1.0, 1.0).normalize();
        let next = align_foot(Quat::IDENTITY, slope).unwrap();
        let up = next * Vec3::Y;
        let full = Vec3::Y.angle_between(slope);
        let moved = Vec3::Y.angle_between(up);
        assert!((moved - full * FOOT_ALIGNMENT_BLEND).abs() < 1e-4);
    }

    #[test]
    fn test_probe_starts_above_the_joint() {
        let surfaces = FlatSurfaces {
            pond_ground: vec![],
            walkable: vec![Plane::horizontal(0.2)],
        };
        // Joint sunk slightly below the ground still finds it.
        assert_eq!(
            ground_normal_below(Vec3::new(0.0, 0.0, 0.0), &surfaces),
            Some(Vec3::Y)
        );
        assert_eq!(ground_normal_below(Vec3::new(0.0, 3.0, 0.0), &surfaces), None);
        assert_eq!(ground_normal_below(Vec3::ZERO, &NoSurfaces), None);
    }
}
