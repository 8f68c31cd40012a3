//! Playback dock (bottom bar).
//!
//! The dock provides a single horizontal strip with:
//! - Play/Pause toggle and single-sample stepping
//! - Time and step readout
//! - Timeline scrubber
//! - Playback speed selector
//! - Loop toggle, reset and info panel toggle

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::{UiState, icons};
use crate::simulation::SimulationRun;
use crate::time::{PLAYBACK_SCALES, PlaybackTime};
use crate::trajectory::Trajectory;

/// Colors for the dock UI.
mod colors {
    use bevy_egui::egui::Color32;

    pub const DOCK_BG: Color32 = Color32::from_rgba_premultiplied(26, 26, 36, 240);
    pub const ACTIVE: Color32 = Color32::from_rgb(85, 221, 136);
    pub const INACTIVE: Color32 = Color32::from_rgb(120, 120, 130);
    pub const PLAY_ICON: Color32 = Color32::from_rgb(85, 221, 136);
    pub const PAUSE_ICON: Color32 = Color32::from_rgb(221, 170, 85);
    pub const TEXT: Color32 = Color32::from_rgb(220, 220, 230);
}

/// System that renders the dock at the bottom.
pub fn dock_system(
    mut contexts: EguiContexts,
    mut playback: ResMut<PlaybackTime>,
    mut ui_state: ResMut<UiState>,
    run: Res<SimulationRun>,
) {
    let Some(trajectory) = run.trajectory() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::TopBottomPanel::bottom("dock")
        .exact_height(56.0)
        .frame(
            egui::Frame::new()
                .fill(colors::DOCK_BG)
                .inner_margin(egui::Margin::symmetric(20, 10)),
        )
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.spacing_mut().item_spacing.x = 12.0;

                render_transport(ui, &mut playback, trajectory);

                ui.separator();

                render_time_readout(ui, &playback, trajectory);

                ui.separator();

                render_scrubber(ui, &mut playback, trajectory);

                ui.separator();

                render_speed_selector(ui, &mut playback);

                // Push remaining buttons to the right
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.spacing_mut().item_spacing.x = 10.0;
                    render_toggles(ui, &mut playback, &mut ui_state);
                });
            });
        });
}

/// Play/pause plus single-sample step buttons.
fn render_transport(ui: &mut egui::Ui, playback: &mut PlaybackTime, trajectory: &Trajectory) {
    let index = trajectory.index_at(playback.current);

    let back = egui::Button::new(egui::RichText::new(icons::STEP_BACK).size(18.0).color(colors::TEXT));
    if ui.add(back).on_hover_text("Previous step (Left)").clicked() {
        step_to(playback, trajectory, index.saturating_sub(1));
    }

    let (icon, color, tooltip) = if playback.paused {
        (icons::PLAY, colors::PLAY_ICON, "Play (Space)")
    } else {
        (icons::PAUSE, colors::PAUSE_ICON, "Pause (Space)")
    };
    let button = egui::Button::new(egui::RichText::new(icon).size(22.0).color(color))
        .min_size(egui::vec2(40.0, 36.0));
    if ui.add(button).on_hover_text(tooltip).clicked() {
        playback.toggle_pause();
    }

    let forward =
        egui::Button::new(egui::RichText::new(icons::STEP_FORWARD).size(18.0).color(colors::TEXT));
    if ui.add(forward).on_hover_text("Next step (Right)").clicked() {
        step_to(playback, trajectory, index + 1);
    }
}

/// Pause on sample `index` (clamped to the run).
pub(crate) fn step_to(playback: &mut PlaybackTime, trajectory: &Trajectory, index: usize) {
    let index = index.min(trajectory.steps());
    playback.paused = true;
    playback.seek(trajectory.time_at(index), trajectory.duration());
}

fn render_time_readout(ui: &mut egui::Ui, playback: &PlaybackTime, trajectory: &Trajectory) {
    let text = format!(
        "t = {:6.2} / {:.2} s   step {:>4} / {}",
        playback.current,
        trajectory.duration(),
        trajectory.index_at(playback.current),
        trajectory.steps()
    );
    ui.label(egui::RichText::new(text).monospace().size(14.0).color(colors::TEXT));
}

/// Timeline slider; dragging it pauses playback.
fn render_scrubber(ui: &mut egui::Ui, playback: &mut PlaybackTime, trajectory: &Trajectory) {
    let duration = trajectory.duration();
    let mut t = playback.current;
    let slider = egui::Slider::new(&mut t, 0.0..=duration.max(f64::EPSILON)).show_value(false);
    if ui.add_sized([220.0, 20.0], slider).changed() {
        playback.paused = true;
        playback.seek(t, duration);
    }
}

fn render_speed_selector(ui: &mut egui::Ui, playback: &mut PlaybackTime) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;
        for (i, &scale) in PLAYBACK_SCALES.iter().enumerate() {
            let is_active = (playback.scale - scale).abs() < 1e-9;
            let color = if is_active { colors::ACTIVE } else { colors::INACTIVE };

            let text = egui::RichText::new(format!("{scale}x")).size(14.0).color(color);
            let text = if is_active { text.strong() } else { text };

            if ui
                .add(egui::Button::new(text).frame(is_active).min_size(egui::vec2(40.0, 28.0)))
                .on_hover_text(format!("{scale}x playback (press {})", i + 1))
                .clicked()
            {
                playback.scale = scale;
            }
        }
    });
}

/// Right-aligned toggles: info panel, reset, loop (drawn right to left).
fn render_toggles(ui: &mut egui::Ui, playback: &mut PlaybackTime, ui_state: &mut UiState) {
    let info_color = if ui_state.info_panel_open { colors::ACTIVE } else { colors::TEXT };
    if ui
        .add(egui::Button::new(egui::RichText::new(icons::INFO).size(18.0).color(info_color)).frame(false))
        .on_hover_text("Toggle info panel (I)")
        .clicked()
    {
        ui_state.info_panel_open = !ui_state.info_panel_open;
    }

    if ui
        .add(egui::Button::new(egui::RichText::new(icons::RESET).size(18.0).color(colors::TEXT)).frame(false))
        .on_hover_text("Back to start (R)")
        .clicked()
    {
        playback.reset();
    }

    let loop_color = if playback.looping { colors::ACTIVE } else { colors::INACTIVE };
    if ui
        .add(egui::Button::new(egui::RichText::new(icons::LOOP).size(18.0).color(loop_color)).frame(false))
        .on_hover_text("Loop playback (L)")
        .clicked()
    {
        playback.looping = !playback.looping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use crate::test_utils::fixtures;

    #[test]
    fn test_stepping_forward_reaches_every_sample() {
        let mut run = SimulationRun::new(SimulationConfig::with_defaults(fixtures::unit_geometry()));
        let trajectory = run.execute().unwrap().clone();
        let mut playback = PlaybackTime::default();

        for expected in 1..=trajectory.steps() {
            let index = trajectory.index_at(playback.current);
            step_to(&mut playback, &trajectory, index + 1);
            assert_eq!(trajectory.index_at(playback.current), expected);
        }
        assert!(playback.paused);
        assert_eq!(playback.current, trajectory.duration());
    }

    #[test]
    fn test_stepping_back_stops_at_start() {
        let mut run = SimulationRun::new(SimulationConfig::with_defaults(fixtures::unit_geometry()));
        let trajectory = run.execute().unwrap().clone();
        let mut playback = PlaybackTime::default();
        playback.seek(trajectory.duration(), trajectory.duration());

        for _ in 0..=trajectory.steps() + 2 {
            let index = trajectory.index_at(playback.current);
            step_to(&mut playback, &trajectory, index.saturating_sub(1));
        }
        assert_eq!(playback.current, 0.0);
    }
}
