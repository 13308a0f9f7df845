use bevy::math::Vec3;

use crate::config::FishingTuning;
use crate::constants::POND_DEPTH;
use crate::pond::Ponds;

/// Force and damped velocity for a floating body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Buoyancy {
    pub force: Vec3,
    pub velocity: Vec3,
}

/// Upward force grows linearly with depth below the surface. Bodies at or
/// above the surface, deeper than the pond, or outside every pond get `None`.
pub fn bobber_buoyancy(
    position: Vec3,
    velocity: Vec3,
    ponds: &Ponds,
    tuning: &FishingTuning,
) -> Option<Buoyancy> {
    let pond = ponds.0.iter().find(|pond| {
        pond.contains_xz(position)
            && position.y < pond.surface_y
            && position.y >= pond.surface_y - POND_DEPTH
    })?;
    let depth = pond.depth_at(position.y);

    Some(Buoyancy {
        force: Vec3::Y * (tuning.buoyancy_base + depth * tuning.buoyancy_gain),
        velocity: Vec3::new(
            velocity.x * tuning.horizontal_water_damping,
            velocity.y * tuning.vertical_water_damping,
            velocity.z * tuning.horizontal_water_damping,
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pond::Pond;

    fn ponds() -> Ponds {
        Ponds(vec![Pond {
            min_x: 0.0,
            max_x: 10.0,
            min_z: 0.0,
            max_z: 10.0,
            surface_y: 1.0,
        }])
    }

    #[test]
    fn test_force_is_linear_in_depth() {
        let tuning = FishingTuning::default();
        let at = |y: f32| {
            bobber_buoyancy(Vec3::new(5.0, y, 5.0), Vec3::ZERO, &ponds(), &tuning)
                .unwrap()
                .force
                .y
        };
        let shallow = at(0.5);
        let deep = at(-1.0);
        assert!((shallow - (tuning.buoyancy_base + 0.5 * tuning.buoyancy_gain)).abs() < 1e-4);
        assert!((deep - shallow - 1.5 * tuning.buoyancy_gain).abs() < 1e-3);
    }

    #[test]
    fn test_no_force_out_of_water() {
        let tuning = FishingTuning::default();
        let ponds = ponds();
        assert!(bobber_buoyancy(Vec3::new(5.0, 1.0, 5.0), Vec3::ZERO, &ponds, &tuning).is_none());
        assert!(bobber_buoyancy(Vec3::new(5.0, 3.0, 5.0), Vec3::ZERO, &ponds, &tuning).is_none());
        assert!(bobber_buoyancy(Vec3::new(5.0, -4.5, 5.0), Vec3::ZERO, &ponds, &tuning).is_none());
        assert!(bobber_buoyancy(Vec3::new(-5.0, 0.0, 5.0), Vec3::ZERO, &ponds, &tuning).is_none());
    }

    #[test]
    fn test_water_damps_velocity() {
        let tuning = FishingTuning::default();
        let b = bobber_buoyancy(
            Vec3::new(5.0, 0.0, 5.0),
            Vec3::new(10.0, -10.0, 0.0),
            &ponds(),
            &tuning,
        )
        .unwrap();
        assert!((b.velocity.x - 9.0).abs() < 1e-5);
        assert!((b.velocity.y + 9.5).abs() < 1e-5);
    }
}
