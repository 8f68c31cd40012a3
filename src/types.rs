//! Core model types for the vehicle + trailer kinematic simulation.
//!
//! All physics quantities are SI: meters, seconds, radians. Degrees only
//! appear at the configuration and display boundaries.

use std::f64::consts::{PI, TAU};

use bevy::math::DVec2;
use thiserror::Error;

/// Degrees to radians conversion factor
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor
pub const RAD_TO_DEG: f64 = 180.0 / PI;

/// Reference forward speed (m/s).
pub const DEFAULT_SPEED_MPS: f64 = 1.0;

/// Reference steering angle (degrees).
pub const DEFAULT_STEERING_DEG: f64 = 10.0;

/// Reference integration step (seconds).
pub const DEFAULT_STEP_SIZE_S: f64 = 0.1;

/// Reference number of integration steps.
pub const DEFAULT_STEP_COUNT: usize = 50;

/// Largest accepted step count (about 320 MB of states).
pub const MAX_STEP_COUNT: usize = 10_000_000;

/// Rejected geometry parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{field} must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
}

/// Immutable physical parameters of the vehicle and trailer.
///
/// Fields are private so a value of this type always satisfies the
/// positivity constraints; in particular the trailer length, which the
/// hitch-rate equation divides by, is never zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VehicleGeometry {
    wheelbase: f64,
    hitch_length: f64,
    trailer_length: f64,
}

impl VehicleGeometry {
    /// Validate and build a geometry.
    ///
    /// * `wheelbase` (L) - distance between the vehicle axles, > 0
    /// * `hitch_length` (L1) - rear axle to hitch point, >= 0
    /// * `trailer_length` (L2) - hitch point to trailer axle, > 0
    pub fn new(wheelbase: f64, hitch_length: f64, trailer_length: f64) -> Result<Self, GeometryError> {
        positive("vehicle_wheelbase_m", wheelbase)?;
        non_negative("hitch_length_m", hitch_length)?;
        positive("trailer_length_m", trailer_length)?;

        Ok(Self {
            wheelbase,
            hitch_length,
            trailer_length,
        })
    }

    /// Wheelbase L (m).
    pub fn wheelbase(&self) -> f64 {
        self.wheelbase
    }

    /// Hitch length L1 (m).
    pub fn hitch_length(&self) -> f64 {
        self.hitch_length
    }

    /// Trailer length L2 (m).
    pub fn trailer_length(&self) -> f64 {
        self.trailer_length
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), GeometryError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), GeometryError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(GeometryError::Negative { field, value })
    }
}

/// Constant control input held for the whole run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlInput {
    /// Forward speed v (m/s).
    pub speed: f64,
    /// Steering angle δ (rad).
    pub steering_angle: f64,
}

impl ControlInput {
    pub fn new(speed: f64, steering_angle: f64) -> Self {
        Self {
            speed,
            steering_angle,
        }
    }

    /// Build from a steering angle given in degrees.
    pub fn from_degrees(speed: f64, steering_deg: f64) -> Self {
        Self::new(speed, steering_deg * DEG_TO_RAD)
    }

    /// Steering angle in degrees.
    pub fn steering_deg(&self) -> f64 {
        self.steering_angle * RAD_TO_DEG
    }

    pub fn is_finite(&self) -> bool {
        self.speed.is_finite() && self.steering_angle.is_finite()
    }
}

impl Default for ControlInput {
    fn default() -> Self {
        Self::from_degrees(DEFAULT_SPEED_MPS, DEFAULT_STEERING_DEG)
    }
}

/// Kinematic state of the vehicle-trailer combination at one instant.
///
/// Angles are not wrapped; see [`VehicleState::normalized`] for a bounded view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VehicleState {
    /// Rear axle x position (m)
    pub x: f64,
    /// Rear axle y position (m)
    pub y: f64,
    /// Vehicle heading θ (rad)
    pub heading: f64,
    /// Hitch articulation angle φ (rad), vehicle heading minus trailer heading
    pub hitch: f64,
}

impl VehicleState {
    pub fn new(x: f64, y: f64, heading: f64, hitch: f64) -> Self {
        Self {
            x,
            y,
            heading,
            hitch,
        }
    }

    /// Rear axle position as a vector.
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Heading in degrees
    pub fn heading_deg(&self) -> f64 {
        self.heading * RAD_TO_DEG
    }

    /// Hitch angle in degrees
    pub fn hitch_deg(&self) -> f64 {
        self.hitch * RAD_TO_DEG
    }

    /// Absolute trailer heading (θ - φ).
    pub fn trailer_heading(&self) -> f64 {
        self.heading - self.hitch
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.heading.is_finite() && self.hitch.is_finite()
    }

    /// Copy of this state with both angles wrapped into (-π, π].
    ///
    /// Display helper only. The integrator always works on unbounded angles.
    pub fn normalized(&self) -> Self {
        Self {
            heading: wrap_angle(self.heading),
            hitch: wrap_angle(self.hitch),
            ..*self
        }
    }
}

/// Wrap an angle into (-π, π].
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}
