pub mod inspector;

use bevy::prelude::*;
use bevy_inspector_egui::{bevy_egui::EguiPlugin, DefaultInspectorConfigPlugin};

pub fn add_inspector(app: &mut App) {
    app.add_plugins(EguiPlugin {
        enable_multipass_for_primary_context: false,
    })
    .add_plugins(DefaultInspectorConfigPlugin)
    .add_systems(Update, inspector::inspector_ui);
}
