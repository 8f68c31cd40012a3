//! UI module providing the egui-based playback interface.

mod dock;
pub mod icons;
mod info_panel;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

pub(crate) use dock::step_to;

/// Plugin that adds all UI systems.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiState>()
            .init_resource::<icons::FontsInitialized>()
            // Font initialization MUST run before any UI systems that use icons
            .add_systems(EguiPrimaryContextPass, icons::setup_fonts)
            .add_systems(
                EguiPrimaryContextPass,
                // Dock first so the side panel fills the space above it
                (dock::dock_system, info_panel::info_panel)
                    .chain()
                    .after(icons::setup_fonts)
                    .run_if(|init: Res<icons::FontsInitialized>| init.0),
            );
    }
}

/// Global UI state.
#[derive(Resource)]
pub struct UiState {
    /// Whether the info side panel is shown.
    pub info_panel_open: bool,
    /// Show angles wrapped into (-180°, 180°] instead of raw values.
    pub normalized_angles: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            info_panel_open: true,
            normalized_angles: false,
        }
    }
}
