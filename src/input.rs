//! Keyboard shortcuts for playback and camera zoom.

use bevy::prelude::*;

use crate::camera::{CameraState, MAX_ZOOM, MIN_ZOOM, MainCamera, ZOOM_SPEED};
use crate::simulation::SimulationRun;
use crate::time::{PLAYBACK_SCALES, PlaybackTime};
use crate::ui::{UiState, step_to};

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (playback_shortcuts, zoom_shortcuts));
    }
}

const SPEED_KEYS: [KeyCode; 5] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
];

/// Handle keyboard shortcuts for playback control.
fn playback_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut playback: ResMut<PlaybackTime>,
    mut ui_state: ResMut<UiState>,
    run: Res<SimulationRun>,
) {
    // Space: toggle pause
    if keys.just_pressed(KeyCode::Space) {
        playback.toggle_pause();
        info!("Playback {}", if playback.paused { "paused" } else { "running" });
    }

    if keys.just_pressed(KeyCode::KeyR) {
        playback.reset();
    }

    if keys.just_pressed(KeyCode::KeyL) {
        playback.looping = !playback.looping;
    }

    if keys.just_pressed(KeyCode::KeyI) {
        ui_state.info_panel_open = !ui_state.info_panel_open;
    }

    for (key, scale) in SPEED_KEYS.iter().zip(PLAYBACK_SCALES) {
        if keys.just_pressed(*key) {
            playback.scale = scale;
        }
    }

    let Some(trajectory) = run.trajectory() else {
        return;
    };
    let index = trajectory.index_at(playback.current);
    if keys.just_pressed(KeyCode::ArrowLeft) {
        step_to(&mut playback, trajectory, index.saturating_sub(1));
    }
    if keys.just_pressed(KeyCode::ArrowRight) {
        step_to(&mut playback, trajectory, index + 1);
    }
}

/// Plus/Minus: zoom in and out while held.
fn zoom_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
    mut camera_state: ResMut<CameraState>,
) {
    let zoom_in = keys.pressed(KeyCode::Equal) || keys.pressed(KeyCode::NumpadAdd);
    let zoom_out = keys.pressed(KeyCode::Minus) || keys.pressed(KeyCode::NumpadSubtract);
    if zoom_in == zoom_out {
        return;
    }

    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    let zoom_factor = if zoom_in { 1.0 - ZOOM_SPEED } else { 1.0 + ZOOM_SPEED };
    ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
    camera_state.zoom = ortho.scale;
}
