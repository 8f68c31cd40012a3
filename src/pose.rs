//! Rigid-body poses of the vehicle and trailer derived from a model state.
//!
//! The state tracks the vehicle rear axle. The hitch sits `L1` behind the
//! rear axle along the vehicle heading, and the trailer axle sits `L2`
//! behind the hitch along the trailer heading `θ - φ`.

use bevy::math::DVec2;

use crate::types::{VehicleGeometry, VehicleState};

/// World-frame points of interest for drawing one state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CombinationPose {
    pub rear_axle: DVec2,
    pub front_axle: DVec2,
    pub hitch: DVec2,
    pub trailer_axle: DVec2,
    /// Vehicle heading θ (rad).
    pub vehicle_heading: f64,
    /// Trailer heading θ - φ (rad).
    pub trailer_heading: f64,
}

impl CombinationPose {
    pub fn new(geometry: &VehicleGeometry, state: &VehicleState) -> Self {
        let vehicle_dir = DVec2::from_angle(state.heading);
        let trailer_heading = state.trailer_heading();
        let trailer_dir = DVec2::from_angle(trailer_heading);

        let rear_axle = state.position();
        let hitch = rear_axle - vehicle_dir * geometry.hitch_length();

        Self {
            rear_axle,
            front_axle: rear_axle + vehicle_dir * geometry.wheelbase(),
            hitch,
            trailer_axle: hitch - trailer_dir * geometry.trailer_length(),
            vehicle_heading: state.heading,
            trailer_heading,
        }
    }

    /// Midpoint between the vehicle axles.
    pub fn vehicle_center(&self) -> DVec2 {
        (self.rear_axle + self.front_axle) * 0.5
    }

    /// Midpoint between the hitch and the trailer axle.
    pub fn trailer_center(&self) -> DVec2 {
        (self.hitch + self.trailer_axle) * 0.5
    }
}
