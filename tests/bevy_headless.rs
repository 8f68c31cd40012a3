//! Headless Bevy integration tests.
//!
//! These tests verify Bevy resources and systems work correctly without GPU.

mod common;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use trailer_sim::config::SimulationConfig;
use trailer_sim::physics::RunPhase;
use trailer_sim::simulation::SimulationRun;
use trailer_sim::time::{PlaybackPlugin, PlaybackTime};

fn create_minimal_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
    app
}

fn completed_run() -> SimulationRun {
    let mut run = SimulationRun::new(SimulationConfig::with_defaults(common::unit_geometry()));
    run.execute().unwrap();
    run
}

#[test]
fn test_simulation_run_resource() {
    let mut app = create_minimal_app();
    app.insert_resource(completed_run());

    app.update();

    let run = app.world().resource::<SimulationRun>();
    assert_eq!(run.phase(), RunPhase::Completed);
    assert_eq!(run.trajectory().map(|t| t.len()), Some(51));
}

#[test]
fn test_playback_advances() {
    let mut app = create_minimal_app();
    app.insert_resource(completed_run());
    app.add_plugins(PlaybackPlugin);

    for _ in 0..5 {
        app.update();
    }

    let playback = app.world().resource::<PlaybackTime>();
    assert!(playback.current > 0.0, "Playback time should have advanced");
    assert!(playback.current <= 5.0);
}

#[test]
fn test_playback_pause() {
    let mut app = create_minimal_app();
    app.insert_resource(completed_run());
    app.insert_resource(PlaybackTime {
        paused: true,
        ..default()
    });
    app.add_plugins(PlaybackPlugin);

    for _ in 0..5 {
        app.update();
    }

    let playback = app.world().resource::<PlaybackTime>();
    assert_eq!(playback.current, 0.0, "Paused playback should not advance");
}

#[test]
fn test_playback_without_trajectory_stays_at_start() {
    let mut app = create_minimal_app();
    app.insert_resource(SimulationRun::new(SimulationConfig::with_defaults(
        common::unit_geometry(),
    )));
    app.add_plugins(PlaybackPlugin);

    for _ in 0..3 {
        app.update();
    }

    assert_eq!(app.world().resource::<PlaybackTime>().current, 0.0);
}
