//! Common test utilities for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use trailer_sim::physics::run;
use trailer_sim::trajectory::Trajectory;
use trailer_sim::types::{ControlInput, VehicleGeometry, VehicleState};

/// The reference combination: L = 1, L1 = 0, L2 = 1.
pub fn unit_geometry() -> VehicleGeometry {
    VehicleGeometry::new(1.0, 0.0, 1.0).unwrap()
}

/// A car towing a camper on an offset hitch.
pub fn car_and_camper() -> VehicleGeometry {
    VehicleGeometry::new(2.7, 1.1, 3.5).unwrap()
}

/// The reference run: v = 1 m/s, δ = 10°, Δt = 0.1 s, 50 steps from the origin.
pub fn reference_trajectory() -> Trajectory {
    run(
        &unit_geometry(),
        &ControlInput::default(),
        VehicleState::default(),
        0.1,
        50,
    )
    .unwrap()
}

/// One forward Euler step written out longhand.
pub fn manual_step(
    geometry: &VehicleGeometry,
    control: &ControlInput,
    state: &VehicleState,
    dt: f64,
) -> VehicleState {
    let (l, l1, l2) = (
        geometry.wheelbase(),
        geometry.hitch_length(),
        geometry.trailer_length(),
    );
    let v = control.speed;
    let heading_rate = v * control.steering_angle.tan() / l;
    let hitch_rate = (l2 + l1 * state.hitch.cos()) / l2 * heading_rate - state.hitch.sin() / l2 * v;

    VehicleState::new(
        state.x + dt * v * state.heading.cos(),
        state.y + dt * v * state.heading.sin(),
        state.heading + dt * heading_rate,
        state.hitch + dt * hitch_rate,
    )
}

/// A unique path under the system temp dir for a test file.
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("trailer_sim_{}_{name}", std::process::id()))
}
