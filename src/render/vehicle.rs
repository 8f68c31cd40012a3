//! Vehicle and trailer body rendering.
//!
//! Both bodies are plain colored rectangles posed from the trajectory
//! state sampled at the current playback time.

use bevy::{math::DVec2, prelude::*};

use crate::camera::{RENDER_SCALE, to_render};
use crate::pose::CombinationPose;
use crate::render::z_layers;
use crate::simulation::SimulationRun;
use crate::time::PlaybackTime;
use crate::types::VehicleGeometry;

/// Which rigid body a sprite represents.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Vehicle,
    Trailer,
}

/// Plugin providing vehicle and trailer sprites.
pub struct VehicleBodyPlugin;

impl Plugin for VehicleBodyPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_bodies);
    }
}

/// Body overhang past each axle, as a fraction of the wheelbase.
const OVERHANG_FRACTION: f64 = 0.2;

/// Body width as a fraction of the wheelbase.
const WIDTH_FRACTION: f64 = 0.5;

/// Size in meters of the rectangle drawn for `kind`.
///
/// The vehicle spans both axles plus overhang. The trailer spans the tow
/// bar from hitch to axle; it shares the vehicle's width so the two read
/// as one combination.
pub fn body_size(geometry: &VehicleGeometry, kind: BodyKind) -> DVec2 {
    let width = geometry.wheelbase() * WIDTH_FRACTION;
    match kind {
        BodyKind::Vehicle => DVec2::new(
            geometry.wheelbase() * (1.0 + 2.0 * OVERHANG_FRACTION),
            width,
        ),
        BodyKind::Trailer => DVec2::new(geometry.trailer_length(), width),
    }
}

/// Render transform for `kind` at `pose`.
pub fn body_transform(pose: &CombinationPose, kind: BodyKind) -> Transform {
    let (center, heading, z) = match kind {
        BodyKind::Vehicle => (pose.vehicle_center(), pose.vehicle_heading, z_layers::VEHICLE),
        BodyKind::Trailer => (pose.trailer_center(), pose.trailer_heading, z_layers::TRAILER),
    };
    Transform::from_translation(to_render(center).extend(z))
        .with_rotation(Quat::from_rotation_z(heading as f32))
}

fn body_color(kind: BodyKind) -> Color {
    match kind {
        BodyKind::Vehicle => Color::srgba(0.2, 0.55, 0.9, 0.85),
        BodyKind::Trailer => Color::srgba(0.9, 0.55, 0.2, 0.85),
    }
}

/// Spawn one sprite per body at the initial pose.
fn spawn_bodies(mut commands: Commands, run: Res<SimulationRun>) {
    let Some(trajectory) = run.trajectory() else {
        warn!("No completed trajectory; nothing to draw");
        return;
    };
    let geometry = run.config().geometry;
    let pose = CombinationPose::new(&geometry, trajectory.initial());

    for kind in [BodyKind::Vehicle, BodyKind::Trailer] {
        let size = (body_size(&geometry, kind) * RENDER_SCALE).as_vec2();
        commands.spawn((
            Sprite::from_color(body_color(kind), size),
            body_transform(&pose, kind),
            kind,
        ));
    }

    info!("Spawned vehicle and trailer bodies");
}

/// Pose the body sprites from the trajectory at the playback time.
pub fn sync_body_transforms(
    mut bodies: Query<(&mut Transform, &BodyKind)>,
    run: Res<SimulationRun>,
    playback: Res<PlaybackTime>,
) {
    let Some(trajectory) = run.trajectory() else {
        return;
    };
    let state = trajectory.sample_at(playback.current);
    let pose = CombinationPose::new(&run.config().geometry, &state);

    for (mut transform, kind) in bodies.iter_mut() {
        *transform = body_transform(&pose, *kind);
    }
}
