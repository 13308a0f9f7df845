use bevy::prelude::*;
use shared::fishing::FishingApparatus;

use super::FishingRod;

const LINE_COLOR: Color = Color::srgb(0.95, 0.95, 0.9);

pub fn draw_fishing_line(apparatus: Query<&FishingApparatus<Entity>>, mut gizmos: Gizmos) {
    for apparatus in apparatus.iter() {
        if let Some(points) = apparatus.line_points() {
            gizmos.linestrip(points.iter().copied(), LINE_COLOR);
        }
    }
}

pub fn sync_rod_visibility(
    apparatus: Query<&FishingApparatus<Entity>, Changed<FishingApparatus<Entity>>>,
    mut rods: Query<&mut Visibility, With<FishingRod>>,
) {
    let Some(visible) = apparatus.iter().next().map(|apparatus| apparatus.rod_visible) else {
        return;
    };
    for mut visibility in rods.iter_mut() {
        visibility.set_if_neq(if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        });
    }
}
