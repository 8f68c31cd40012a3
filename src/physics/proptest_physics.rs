//! Property-based tests for the integrator using proptest.
//!
//! These tests verify the model invariants across a wide range of
//! geometries, inputs and initial states.

use std::f64::consts::FRAC_PI_3;

use proptest::prelude::*;

use super::{TrajectoryIntegrator, IntegratorConfig, run};
use crate::test_utils::assertions;
use crate::types::{ControlInput, VehicleGeometry, VehicleState, wrap_angle};

fn geometry() -> impl Strategy<Value = VehicleGeometry> {
    (0.5f64..6.0, 0.0f64..2.0, 0.5f64..8.0)
        .prop_map(|(l, l1, l2)| VehicleGeometry::new(l, l1, l2).expect("strategy yields valid geometry"))
}

fn initial_state() -> impl Strategy<Value = VehicleState> {
    (-50.0f64..50.0, -50.0f64..50.0, -10.0f64..10.0, -1.5f64..1.5)
        .prop_map(|(x, y, heading, hitch)| VehicleState::new(x, y, heading, hitch))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Trajectory length is always step_count + 1 and starts at the initial state.
    #[test]
    fn prop_length_is_step_count_plus_one(
        geometry in geometry(),
        initial in initial_state(),
        speed in -5.0f64..5.0,
        steering in -FRAC_PI_3..FRAC_PI_3,
        step_size in 0.001f64..0.5,
        step_count in 0usize..300,
    ) {
        let control = ControlInput::new(speed, steering);
        let trajectory = run(&geometry, &control, initial, step_size, step_count).unwrap();
        prop_assert_eq!(trajectory.len(), step_count + 1);
        prop_assert_eq!(*trajectory.initial(), initial);
    }

    /// With zero speed every rate vanishes and the state never moves.
    #[test]
    fn prop_zero_speed_holds_state(
        geometry in geometry(),
        initial in initial_state(),
        steering in -FRAC_PI_3..FRAC_PI_3,
        step_count in 0usize..100,
    ) {
        let control = ControlInput::new(0.0, steering);
        let trajectory = run(&geometry, &control, initial, 0.1, step_count).unwrap();
        for state in &trajectory {
            prop_assert_eq!(state.x, initial.x);
            prop_assert_eq!(state.y, initial.y);
            prop_assert_eq!(state.heading, initial.heading);
            prop_assert_eq!(state.hitch, initial.hitch);
        }
    }

    /// Without steering the heading never changes and the hitch angle
    /// follows φ̇ = −(sin φ / L2)·v.
    #[test]
    fn prop_straight_line_keeps_heading(
        geometry in geometry(),
        initial in initial_state(),
        speed in -5.0f64..5.0,
        step_count in 1usize..100,
    ) {
        let dt = 0.05;
        let control = ControlInput::new(speed, 0.0);
        let trajectory = run(&geometry, &control, initial, dt, step_count).unwrap();

        for pair in trajectory.states().windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            prop_assert_eq!(next.heading, initial.heading);
            let expected_hitch = prev.hitch - (prev.hitch.sin() / geometry.trailer_length()) * speed * dt;
            prop_assert!((next.hitch - expected_hitch).abs() <= 1e-12);
        }
    }

    /// Forward motion without steering pulls the trailer into line.
    #[test]
    fn prop_straight_forward_motion_reduces_hitch(
        geometry in geometry(),
        hitch in -1.2f64..1.2,
        speed in 0.1f64..3.0,
    ) {
        prop_assume!(hitch.abs() > 1e-3);
        let control = ControlInput::new(speed, 0.0);
        let initial = VehicleState::new(0.0, 0.0, 0.0, hitch);
        let trajectory = run(&geometry, &control, initial, 0.01, 200).unwrap();
        prop_assert!(trajectory.last().hitch.abs() < hitch.abs());
    }

    /// Two runs with identical inputs agree bit for bit.
    #[test]
    fn prop_runs_are_deterministic(
        geometry in geometry(),
        initial in initial_state(),
        speed in -5.0f64..5.0,
        steering in -FRAC_PI_3..FRAC_PI_3,
        step_count in 0usize..200,
    ) {
        let integrator = TrajectoryIntegrator::new(
            geometry,
            ControlInput::new(speed, steering),
            IntegratorConfig::new(0.1, step_count),
        );
        let a = integrator.run(initial).unwrap();
        let b = integrator.run(initial).unwrap();
        for (sa, sb) in a.iter().zip(b.iter()) {
            prop_assert!(assertions::bitwise_eq(sa, sb));
        }
    }

    /// The normalized view stays in (-π, π] and differs from the raw
    /// angle by a whole number of turns.
    #[test]
    fn prop_normalized_view_is_bounded(
        geometry in geometry(),
        steering in 0.3f64..FRAC_PI_3,
        step_count in 100usize..400,
    ) {
        let control = ControlInput::new(3.0, steering);
        let trajectory = run(&geometry, &control, VehicleState::default(), 0.1, step_count).unwrap();

        for (raw, wrapped) in trajectory.iter().zip(trajectory.normalized_states()) {
            prop_assert!(wrapped.heading > -std::f64::consts::PI);
            prop_assert!(wrapped.heading <= std::f64::consts::PI);
            let turns = (raw.heading - wrapped.heading) / std::f64::consts::TAU;
            prop_assert!((turns - turns.round()).abs() < 1e-9);
            prop_assert_eq!(wrapped.heading, wrap_angle(raw.heading));
        }
    }
}
