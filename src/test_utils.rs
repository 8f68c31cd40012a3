//! Test utilities for the vehicle + trailer simulation tests.
//!
//! Provides fixtures for common geometries and assertions for comparing
//! states and trajectories.

use crate::types::{ControlInput, VehicleGeometry, VehicleState};

/// Fixtures for creating test geometries and inputs.
pub mod fixtures {
    use super::*;

    /// L = 1, L1 = 0, L2 = 1: the reference configuration.
    pub fn unit_geometry() -> VehicleGeometry {
        VehicleGeometry::new(1.0, 0.0, 1.0).expect("unit geometry is valid")
    }

    /// A car towing a small camper with an offset hitch.
    pub fn car_and_camper() -> VehicleGeometry {
        VehicleGeometry::new(2.7, 1.1, 3.5).expect("car geometry is valid")
    }

    /// The reference control input: 1 m/s, 10° steering.
    pub fn reference_control() -> ControlInput {
        ControlInput::default()
    }

    /// Vehicle at the origin facing +x with the trailer straight behind.
    pub fn origin() -> VehicleState {
        VehicleState::default()
    }
}

/// Assertions for comparing model states.
pub mod assertions {
    use super::*;

    /// Assert two states agree component-wise within `tolerance`.
    ///
    /// # Panics
    /// Panics naming the first component that differs.
    pub fn assert_state_close(actual: &VehicleState, expected: &VehicleState, tolerance: f64) {
        let pairs = [
            ("x", actual.x, expected.x),
            ("y", actual.y, expected.y),
            ("heading", actual.heading, expected.heading),
            ("hitch", actual.hitch, expected.hitch),
        ];
        for (name, a, e) in pairs {
            assert!(
                (a - e).abs() <= tolerance,
                "{name} differs: actual={a:.12e}, expected={e:.12e}, tolerance={tolerance:.3e}"
            );
        }
    }

    /// Bitwise equality, so `-0.0` and `0.0` or differing NaN payloads count as different.
    pub fn bitwise_eq(a: &VehicleState, b: &VehicleState) -> bool {
        a.x.to_bits() == b.x.to_bits()
            && a.y.to_bits() == b.y.to_bits()
            && a.heading.to_bits() == b.heading.to_bits()
            && a.hitch.to_bits() == b.hitch.to_bits()
    }
}

/// Utilities for creating headless Bevy apps for testing.
pub mod bevy_test {
    use bevy::prelude::*;

    /// Create a minimal Bevy app for testing without rendering.
    pub fn headless_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_state_close_accepts_equal_states() {
        let s = VehicleState::new(1.0, 2.0, 3.0, 4.0);
        assertions::assert_state_close(&s, &s, 0.0);
    }

    #[test]
    #[should_panic(expected = "hitch differs")]
    fn test_assert_state_close_names_component() {
        let a = VehicleState::new(1.0, 2.0, 3.0, 4.0);
        let b = VehicleState::new(1.0, 2.0, 3.0, 4.5);
        assertions::assert_state_close(&a, &b, 1e-3);
    }

    #[test]
    fn test_bitwise_eq_distinguishes_signed_zero() {
        let a = VehicleState::new(0.0, 0.0, 0.0, 0.0);
        let b = VehicleState::new(-0.0, 0.0, 0.0, 0.0);
        assert_eq!(a, b);
        assert!(!assertions::bitwise_eq(&a, &b));
    }

    #[test]
    fn test_fixtures_are_valid() {
        assert_eq!(fixtures::unit_geometry().trailer_length(), 1.0);
        assert!(fixtures::car_and_camper().hitch_length() > 0.0);
        assert!(fixtures::reference_control().is_finite());
        assert!(fixtures::origin().is_finite());
    }
}
