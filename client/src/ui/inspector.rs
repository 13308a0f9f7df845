use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_inspector_egui::bevy_egui::EguiContext;
use bevy_inspector_egui::bevy_inspector;
use shared::character::CharacterController;
use shared::config::GameplayConfig;
use shared::fish::Fish;

/// Live tuning values plus the character and fish state.
pub fn inspector_ui(world: &mut World) {
    let Ok(egui_context) = world
        .query_filtered::<&mut EguiContext, With<PrimaryWindow>>()
        .single(world)
    else {
        return;
    };
    let mut egui_context = egui_context.clone();

    egui::Window::new("Tuning")
        .default_open(false)
        .show(egui_context.get_mut(), |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                bevy_inspector::ui_for_resource::<GameplayConfig>(world, ui);

                egui::CollapsingHeader::new("Character").show(ui, |ui| {
                    bevy_inspector::ui_for_world_entities_filtered::<With<CharacterController>>(
                        world, ui, false,
                    );
                });
                egui::CollapsingHeader::new("Fish").show(ui, |ui| {
                    bevy_inspector::ui_for_world_entities_filtered::<With<Fish>>(
                        world, ui, false,
                    );
                });
            });
        });
}
