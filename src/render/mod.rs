//! Rendering systems for the trailer visualizer.
//!
//! This module provides the vehicle and trailer bodies and the traced
//! path lines. Rendering only reads the finished trajectory.

mod path;
pub mod vehicle;

use bevy::prelude::*;

use self::path::{PathPlugin, draw_traced_paths};
use self::vehicle::{VehicleBodyPlugin, sync_body_transforms};

pub use self::path::{PathSettings, TracedPaths};
pub use self::vehicle::BodyKind;

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.07, 0.08, 0.1)))
            .add_plugins((VehicleBodyPlugin, PathPlugin))
            // Pose bodies first, then draw paths and hitch on top of the final pose
            .add_systems(Update, (sync_body_transforms, draw_traced_paths).chain());
    }
}

/// Z-layer constants for rendering order.
pub mod z_layers {
    /// Trailer body (drawn under the vehicle where they overlap).
    pub const TRAILER: f32 = 1.0;
    /// Vehicle body.
    pub const VEHICLE: f32 = 2.0;
}
