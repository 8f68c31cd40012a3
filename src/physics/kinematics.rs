//! Kinematic bicycle + hitch model.
//!
//! Continuous-time rates for the four state variables:
//!
//! ```text
//! ẋ = v·cos θ
//! ẏ = v·sin θ
//! θ̇ = v·tan δ / L
//! φ̇ = ((L2 + L1·cos φ) / L2)·θ̇ − (sin φ / L2)·v
//! ```

use crate::types::{ControlInput, VehicleGeometry, VehicleState};

/// Time derivative of a [`VehicleState`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateDerivative {
    pub x_dot: f64,
    pub y_dot: f64,
    pub heading_dot: f64,
    pub hitch_dot: f64,
}

impl StateDerivative {
    pub fn is_finite(&self) -> bool {
        self.x_dot.is_finite()
            && self.y_dot.is_finite()
            && self.heading_dot.is_finite()
            && self.hitch_dot.is_finite()
    }
}

/// Evaluate the model rates at `state`.
pub fn derivative(
    geometry: &VehicleGeometry,
    control: &ControlInput,
    state: &VehicleState,
) -> StateDerivative {
    let v = control.speed;
    let l = geometry.wheelbase();
    let l1 = geometry.hitch_length();
    let l2 = geometry.trailer_length();

    let heading_dot = v * control.steering_angle.tan() / l;

    // Hitch rate: trailer swing induced by the vehicle's yaw, minus the
    // trailer's own alignment with the direction of travel.
    let yaw_coupling = (l2 + l1 * state.hitch.cos()) / l2;
    let trailer_alignment = (state.hitch.sin() / l2) * v;

    StateDerivative {
        x_dot: v * state.heading.cos(),
        y_dot: v * state.heading.sin(),
        heading_dot,
        hitch_dot: yaw_coupling * heading_dot - trailer_alignment,
    }
}

/// One forward Euler step of size `dt`.
///
/// All rates are evaluated at `state`; nothing from the new state feeds back.
pub fn euler_step(
    geometry: &VehicleGeometry,
    control: &ControlInput,
    state: &VehicleState,
    dt: f64,
) -> VehicleState {
    let d = derivative(geometry, control, state);
    VehicleState {
        x: state.x + d.x_dot * dt,
        y: state.y + d.y_dot * dt,
        heading: state.heading + d.heading_dot * dt,
        hitch: state.hitch + d.hitch_dot * dt,
    }
}
