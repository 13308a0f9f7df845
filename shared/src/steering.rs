//! Vector steering primitives shared by the flock and the character.

use bevy::math::{EulerRot, Quat, Vec3};

use crate::constants::{
    ALIGNMENT_DISTANCE, COHESION_DISTANCE, LOOK_AHEAD_DISTANCE, PROBE_ANGLE, SEPARATION_DISTANCE,
};
use crate::surfaces::{SurfaceQuery, SurfaceSet};

/// What one agent can see of another during a steering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockMember {
    pub position: Vec3,
    pub direction: Vec3,
}

/// Neighbours strictly closer than `radius`, excluding anything at distance zero
/// (the agent itself, or a perfectly overlapping neighbour).
fn within<'a>(
    position: Vec3,
    flock: &'a [FlockMember],
    radius: f32,
) -> impl Iterator<Item = (&'a FlockMember, f32)> + 'a {
    flock.iter().filter_map(move |other| {
        let distance = position.distance(other.position);
        (distance > 0.0 && distance < radius).then_some((other, distance))
    })
}

pub fn separation(position: Vec3, flock: &[FlockMember]) -> Vec3 {
    let mut steer = Vec3::ZERO;
    let mut count = 0;
    for (other, distance) in within(position, flock, SEPARATION_DISTANCE) {
        steer += (position - other.position).normalize_or_zero() / distance;
        count += 1;
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    steer / count as f32
}

pub fn alignment(position: Vec3, flock: &[FlockMember]) -> Vec3 {
    let mut sum = Vec3::ZERO;
    let mut count = 0;
    for (other, _) in within(position, flock, ALIGNMENT_DISTANCE) {
        sum += other.direction;
        count += 1;
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    (sum / count as f32).normalize_or_zero()
}

pub fn cohesion(position: Vec3, flock: &[FlockMember]) -> Vec3 {
    let mut center = Vec3::ZERO;
    let mut count = 0;
    for (other, _) in within(position, flock, COHESION_DISTANCE) {
        center += other.position;
        count += 1;
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    (center / count as f32 - position).normalize_or_zero()
}

/// Probes straight ahead and 30 degrees to either side against the pond bed
/// and walls. Closer hits push harder; the summed push is normalized.
pub fn boundary_avoidance(
    position: Vec3,
    direction: Vec3,
    surfaces: &impl SurfaceQuery,
) -> Vec3 {
    let probes = [
        direction,
        rotate_about_y(direction, PROBE_ANGLE),
        rotate_about_y(direction, -PROBE_ANGLE),
    ];

    let mut steer = Vec3::ZERO;
    for probe in probes {
        let Some(hit) =
            surfaces.cast_ray(SurfaceSet::PondGround, position, probe, LOOK_AHEAD_DISTANCE)
        else {
            continue;
        };
        if hit.distance >= LOOK_AHEAD_DISTANCE {
            continue;
        }
        let away = (position - hit.point).normalize_or_zero();
        steer += away * (LOOK_AHEAD_DISTANCE - hit.distance) / LOOK_AHEAD_DISTANCE;
    }
    steer.normalize_or_zero()
}

pub fn rotate_about_y(v: Vec3, angle: f32) -> Vec3 {
    Quat::from_rotation_y(angle) * v
}

/// Yaw that looks along `v` on the horizontal plane, or `None` when `v` has no
/// horizontal component.
pub fn heading(v: Vec3) -> Option<f32> {
    if v.x == 0.0 && v.z == 0.0 {
        return None;
    }
    Some(v.x.atan2(v.z))
}

pub fn yaw_rotation(yaw: f32) -> Quat {
    Quat::from_rotation_y(yaw)
}

/// Strips pitch and roll, keeping only the rotation about the vertical axis.
pub fn upright(rotation: Quat) -> Quat {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surfaces::{FlatSurfaces, NoSurfaces, Plane};

    fn member(x: f32, z: f32, direction: Vec3) -> FlockMember {
        FlockMember {
            position: Vec3::new(x, 0.0, z),
            direction,
        }
    }

    #[test]
    fn test_lonely_fish_gets_no_steering() {
        let flock = [member(0.0, 0.0, Vec3::Z), member(50.0, 0.0, Vec3::X)];
        let position = flock[0].position;
        assert_eq!(separation(position, &flock), Vec3::ZERO);
        assert_eq!(alignment(position, &flock), Vec3::ZERO);
        assert_eq!(cohesion(position, &flock), Vec3::ZERO);
    }

    #[test]
    fn test_separation_pushes_away_and_scales_with_proximity() {
        let flock = [member(0.0, 0.0, Vec3::Z), member(2.0, 0.0, Vec3::Z)];
        let steer = separation(Vec3::ZERO, &flock);
        assert!((steer - Vec3::new(-0.5, 0.0, 0.0)).length() < 1e-6);

        let near = [member(0.0, 0.0, Vec3::Z), member(1.0, 0.0, Vec3::Z)];
        assert!(separation(Vec3::ZERO, &near).length() > steer.length());
    }

    #[test]
    fn test_pair_one_apart_push_each_other_away() {
        let flock = [member(0.0, 0.0, Vec3::Z), member(1.0, 0.0, Vec3::Z)];
        let left = separation(flock[0].position, &flock);
        let right = separation(flock[1].position, &flock);

        assert!(left.length() > 0.0 && right.length() > 0.0);
        assert!(left.dot(flock[1].position - flock[0].position) < 0.0);
        assert!(right.dot(flock[0].position - flock[1].position) < 0.0);
    }

    #[test]
    fn test_alignment_is_unit_average_heading() {
        let flock = [
            member(0.0, 0.0, Vec3::Z),
            member(1.0, 0.0, Vec3::X),
            member(-1.0, 0.0, Vec3::Z),
            member(0.0, 1.0, Vec3::Z),
        ];
        let steer = alignment(Vec3::ZERO, &flock);
        assert!((steer.length() - 1.0).abs() < 1e-6);
        assert!(steer.z > steer.x);
    }

    #[test]
    fn test_opposing_headings_cancel_without_nan() {
        let flock = [member(1.0, 0.0, Vec3::X), member(-1.0, 0.0, Vec3::NEG_X)];
        assert_eq!(alignment(Vec3::ZERO, &flock), Vec3::ZERO);
    }

    #[test]
    fn test_cohesion_points_at_the_local_center() {
        let flock = [member(4.0, 2.0, Vec3::Z), member(4.0, -2.0, Vec3::Z)];
        let steer = cohesion(Vec3::ZERO, &flock);
        assert!((steer - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_avoidance_steers_off_a_wall_ahead() {
        let surfaces = FlatSurfaces {
            pond_ground: vec![Plane::new(Vec3::new(0.0, 0.0, 2.0), Vec3::NEG_Z)],
            walkable: vec![],
        };
        let steer = boundary_avoidance(Vec3::ZERO, Vec3::Z, &surfaces);
        assert!((steer.length() - 1.0).abs() < 1e-5);
        assert!(steer.z < 0.0);
        assert_eq!(
            boundary_avoidance(Vec3::ZERO, Vec3::Z, &NoSurfaces),
            Vec3::ZERO
        );
    }

    #[test]
    fn test_upright_strips_pitch_and_roll() {
        let tilted = Quat::from_euler(EulerRot::YXZ, 1.2, 0.4, -0.3);
        let straight = upright(tilted);
        let (yaw, pitch, roll) = straight.to_euler(EulerRot::YXZ);
        assert!((yaw - 1.2).abs() < 1e-5);
        assert!(pitch.abs() < 1e-5);
        assert!(roll.abs() < 1e-5);
    }

    #[test]
    fn test_heading_of_vertical_vector_is_undefined() {
        assert_eq!(heading(Vec3::Y), None);
        let yaw = heading(Vec3::X).unwrap();
        assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        let turned = rotate_about_y(Vec3::Z, yaw);
        assert!((turned - Vec3::X).length() < 1e-6);
    }
}
