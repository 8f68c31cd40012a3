//! Trailer Simulator
//!
//! Integrates a vehicle towing a single-axle trailer under constant speed
//! and steering, logs every step, then animates the result.

use std::io::{self, Write};

use bevy::prelude::*;
use bevy_egui::EguiPlugin;

use trailer_sim::camera::CameraPlugin;
use trailer_sim::config::{DEFAULT_CONFIG_PATH, SimulationConfig};
use trailer_sim::input::InputPlugin;
use trailer_sim::physics::IntegrationError;
use trailer_sim::render::RenderPlugin;
use trailer_sim::run_log::{DEFAULT_LOG_PATH, RunLogger};
use trailer_sim::simulation::SimulationRun;
use trailer_sim::time::PlaybackPlugin;
use trailer_sim::trajectory::Trajectory;
use trailer_sim::ui::UiPlugin;

fn main() -> AppExit {
    let mut app = App::new();
    // DefaultPlugins first so the log subscriber exists before the run
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Trailer Simulator".into(),
            ..default()
        }),
        ..default()
    }));

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = match SimulationConfig::load(&path) {
        Ok(config) => config,
        Err(err) => {
            error!("Failed to load configuration from {path}: {err}");
            return AppExit::error();
        }
    };
    info!(
        "Loaded {path}: L = {} m, L1 = {} m, L2 = {} m",
        config.geometry.wheelbase(),
        config.geometry.hitch_length(),
        config.geometry.trailer_length()
    );

    let mut run = SimulationRun::new(config);
    let result = run.execute();

    let logged = match RunLogger::append_to(DEFAULT_LOG_PATH) {
        Ok(logger) => write_run_log(logger, &config, &result),
        Err(err) => {
            warn!("Cannot open {DEFAULT_LOG_PATH}: {err}; logging to console only");
            write_run_log(RunLogger::new(io::sink()), &config, &result)
        }
    };
    if let Err(err) = logged {
        warn!("Failed to write run log: {err}");
    }
    if result.is_err() {
        return AppExit::error();
    }

    app.insert_resource(run)
        .add_plugins(EguiPlugin::default())
        .add_plugins((
            CameraPlugin,
            PlaybackPlugin,
            RenderPlugin,
            UiPlugin,
            InputPlugin,
        ))
        .run()
}

fn write_run_log<W: Write>(
    mut logger: RunLogger<W>,
    config: &SimulationConfig,
    result: &Result<&Trajectory, IntegrationError>,
) -> io::Result<()> {
    match result {
        Ok(trajectory) => logger.trajectory(&config.control, trajectory),
        Err(err) => logger.failure(&config.control, config.integrator.step_size, err),
    }
}
