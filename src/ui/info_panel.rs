//! Info panel showing geometry, control input and the current state.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::UiState;
use crate::simulation::SimulationRun;
use crate::time::PlaybackTime;
use crate::types::VehicleState;

/// System that renders the info panel.
pub fn info_panel(
    mut contexts: EguiContexts,
    mut ui_state: ResMut<UiState>,
    run: Res<SimulationRun>,
    playback: Res<PlaybackTime>,
) {
    if !ui_state.info_panel_open {
        return;
    }
    let Some(trajectory) = run.trajectory() else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let config = run.config();
    let index = trajectory.index_at(playback.current);
    // Show the stored sample, not the interpolated display pose
    let sample = trajectory.get(index).copied().unwrap_or_default();
    let sample = if ui_state.normalized_angles {
        sample.normalized()
    } else {
        sample
    };

    let panel_frame = egui::Frame::new()
        .fill(egui::Color32::from_rgba_unmultiplied(20, 20, 30, 220))
        .inner_margin(egui::Margin::same(12));

    egui::SidePanel::right("info_panel")
        .resizable(false)
        .default_width(220.0)
        .frame(panel_frame)
        .show(ctx, |ui| {
            ui.heading("Geometry");
            egui::Grid::new("geometry_grid").num_columns(2).show(ui, |ui| {
                row(ui, "Wheelbase L", format!("{:.3} m", config.geometry.wheelbase()));
                row(ui, "Hitch L1", format!("{:.3} m", config.geometry.hitch_length()));
                row(ui, "Trailer L2", format!("{:.3} m", config.geometry.trailer_length()));
            });

            ui.separator();

            ui.heading("Control");
            egui::Grid::new("control_grid").num_columns(2).show(ui, |ui| {
                row(ui, "Speed", format!("{:.3} m/s", config.control.speed));
                row(ui, "Steering", format!("{:.3} deg", config.control.steering_deg()));
                row(ui, "Step size", format!("{:.3} s", trajectory.step_size()));
                row(ui, "Steps", trajectory.steps().to_string());
            });

            ui.separator();

            ui.heading(format!("Step {index}"));
            render_state(ui, &sample);
            ui.checkbox(&mut ui_state.normalized_angles, "Wrap angles to (-180, 180]");
        });
}

fn row(ui: &mut egui::Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(egui::RichText::new(value).monospace());
    ui.end_row();
}

fn render_state(ui: &mut egui::Ui, state: &VehicleState) {
    egui::Grid::new("state_grid").num_columns(2).show(ui, |ui| {
        row(ui, "x", format!("{:.4} m", state.x));
        row(ui, "y", format!("{:.4} m", state.y));
        row(ui, "Heading", format!("{:.3} deg", state.heading_deg()));
        row(ui, "Hitch", format!("{:.3} deg", state.hitch_deg()));
        row(ui, "Trailer", format!("{:.3} deg", state.trailer_heading().to_degrees()));
    });
}
