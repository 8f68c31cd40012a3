//! Traced path rendering using Bevy Gizmos.
//!
//! Draws the rear axle path of the vehicle and the axle path of the
//! trailer. The part already covered by playback is drawn solid, the rest
//! dashed. The hitch point and the tow bar are marked at the current pose.

use bevy::math::Isometry2d;
use bevy::prelude::*;

use crate::camera::to_render;
use crate::pose::CombinationPose;
use crate::simulation::SimulationRun;
use crate::time::PlaybackTime;

/// Plugin providing traced path visualization.
pub struct PathPlugin;

impl Plugin for PathPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PathSettings>()
            .init_resource::<TracedPaths>()
            .add_systems(Startup, build_traced_paths);
    }
}

/// Settings for path rendering.
#[derive(Resource)]
pub struct PathSettings {
    /// Whether to show the traced paths.
    pub visible: bool,
    /// Alpha value for the part not yet reached by playback.
    pub upcoming_alpha: f32,
    /// Dash pattern for the upcoming part: draw N segments, then skip M.
    ///
    /// Set to (1, 0) for a solid line.
    pub dash_on: u32,
    pub dash_off: u32,
    /// Radius of the hitch marker in render units.
    pub hitch_marker_radius: f32,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            visible: true,
            upcoming_alpha: 0.35,
            dash_on: 1,
            dash_off: 1,
            hitch_marker_radius: 6.0,
        }
    }
}

/// Render-space polylines precomputed from the trajectory.
#[derive(Resource, Default)]
pub struct TracedPaths {
    /// Vehicle rear axle, one point per trajectory sample.
    pub vehicle: Vec<Vec2>,
    /// Trailer axle, one point per trajectory sample.
    pub trailer: Vec<Vec2>,
}

const VEHICLE_PATH_COLOR: Color = Color::srgb(0.35, 0.75, 1.0);
const TRAILER_PATH_COLOR: Color = Color::srgb(1.0, 0.65, 0.3);
const HITCH_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);

/// Compute the render-space paths once the run has completed.
fn build_traced_paths(run: Res<SimulationRun>, mut paths: ResMut<TracedPaths>) {
    let Some(trajectory) = run.trajectory() else {
        return;
    };
    let geometry = run.config().geometry;

    let (vehicle, trailer) = trajectory
        .iter()
        .map(|state| {
            let pose = CombinationPose::new(&geometry, state);
            (to_render(pose.rear_axle), to_render(pose.trailer_axle))
        })
        .unzip();

    *paths = TracedPaths { vehicle, trailer };
}

/// Draw one polyline, solid up to `split` points and dashed after.
fn draw_split_polyline(
    gizmos: &mut Gizmos,
    points: &[Vec2],
    split: usize,
    color: Color,
    settings: &PathSettings,
) {
    let split = split.min(points.len());
    if split >= 2 {
        gizmos.linestrip_2d(points[..split].iter().copied(), color);
    }

    let upcoming = color.with_alpha(settings.upcoming_alpha);
    let on = settings.dash_on.max(1) as usize;
    let period = on + settings.dash_off as usize;

    // Pattern is keyed on the segment index so dashes don't crawl during playback
    for i in split.saturating_sub(1)..points.len().saturating_sub(1) {
        if i % period < on {
            gizmos.line_2d(points[i], points[i + 1], upcoming);
        }
    }
}

/// Draw the traced paths and the hitch at the current playback time.
pub fn draw_traced_paths(
    mut gizmos: Gizmos,
    settings: Res<PathSettings>,
    paths: Res<TracedPaths>,
    run: Res<SimulationRun>,
    playback: Res<PlaybackTime>,
) {
    if !settings.visible {
        return;
    }
    let Some(trajectory) = run.trajectory() else {
        return;
    };

    // Points up to and including the last sample at or before playback time
    let split = trajectory.index_at(playback.current) + 1;
    draw_split_polyline(&mut gizmos, &paths.vehicle, split, VEHICLE_PATH_COLOR, &settings);
    draw_split_polyline(&mut gizmos, &paths.trailer, split, TRAILER_PATH_COLOR, &settings);

    let pose = CombinationPose::new(&run.config().geometry, &trajectory.sample_at(playback.current));
    let hitch = to_render(pose.hitch);
    gizmos.line_2d(to_render(pose.rear_axle), hitch, HITCH_COLOR);
    gizmos.line_2d(hitch, to_render(pose.trailer_axle), HITCH_COLOR);
    gizmos.circle_2d(
        Isometry2d::from_translation(hitch),
        settings.hitch_marker_radius,
        HITCH_COLOR,
    );
}
