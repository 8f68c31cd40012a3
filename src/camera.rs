//! Camera system for the trailer visualizer.
//!
//! Provides zoom and pan controls and frames the whole traced path on startup.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    math::DVec2,
    prelude::*,
};

use crate::simulation::SimulationRun;

/// Render scale: 1 meter = 100 render units.
pub const RENDER_SCALE: f64 = 100.0;

/// Minimum zoom level (closest zoom).
pub const MIN_ZOOM: f32 = 0.01;

/// Maximum zoom level (furthest zoom).
pub const MAX_ZOOM: f32 = 50.0;

/// Zoom used when there is nothing to frame.
pub const DEFAULT_ZOOM: f32 = 1.0;

/// World height in render units that fits on screen at zoom 1.0 (roughly
/// the primary window height in logical pixels).
pub const VIEWPORT_HEIGHT: f32 = 600.0;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Pan speed multiplier.
pub const PAN_SPEED: f32 = 1.0;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking camera state.
#[derive(Resource)]
pub struct CameraState {
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraState>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_pan));
    }
}

/// Convert a model-frame position (meters) to render units.
pub fn to_render(pos: DVec2) -> Vec2 {
    (pos * RENDER_SCALE).as_vec2()
}

/// Zoom that fits a region of `size` meters on screen with `margin` (fraction) spare.
pub fn fit_zoom(size: DVec2, margin: f32) -> f32 {
    let extent = (size.max_element() * RENDER_SCALE) as f32 * (1.0 + margin);
    if extent.is_finite() && extent > 0.0 {
        (extent / VIEWPORT_HEIGHT).clamp(MIN_ZOOM, MAX_ZOOM)
    } else {
        DEFAULT_ZOOM
    }
}

/// Spawn the 2D camera centered on the traced path.
fn setup_camera(mut commands: Commands, run: Res<SimulationRun>, mut camera_state: ResMut<CameraState>) {
    let (center, zoom) = match run.trajectory() {
        Some(trajectory) => {
            let bounds = trajectory.bounds();
            // Leave room for the vehicle and trailer bodies around the path
            let geometry = &run.config().geometry;
            let reach = geometry.wheelbase() + geometry.hitch_length() + geometry.trailer_length();
            let size = bounds.size() + DVec2::splat(2.0 * reach);
            (to_render(bounds.center()), fit_zoom(size, 0.2))
        }
        None => (Vec2::ZERO, DEFAULT_ZOOM),
    };
    camera_state.zoom = zoom;

    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection {
            scale: zoom,
            ..OrthographicProjection::default_2d()
        }),
        Transform::from_xyz(center.x, center.y, 0.0),
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut camera_query: Query<&mut Projection, With<MainCamera>>,
    mut camera_state: ResMut<CameraState>,
) {
    // Skip if no scroll input
    if mouse_scroll.delta.y == 0.0 {
        return;
    }

    let Ok(mut projection) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ref mut ortho) = *projection else {
        return;
    };

    // Logarithmic zoom: multiply scale by factor based on scroll direction
    let zoom_factor = 1.0 - mouse_scroll.delta.y * ZOOM_SPEED;
    ortho.scale = (ortho.scale * zoom_factor).clamp(MIN_ZOOM, MAX_ZOOM);
    camera_state.zoom = ortho.scale;
}

/// Handle middle mouse button drag for panning.
fn camera_pan(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut camera_query: Query<(&mut Transform, &Projection), With<MainCamera>>,
) {
    if !mouse_buttons.pressed(MouseButton::Middle) {
        return;
    }

    let Ok((mut transform, projection)) = camera_query.single_mut() else {
        return;
    };

    let Projection::Orthographic(ortho) = projection else {
        return;
    };

    // Screen motion is in pixels; scale by current zoom level
    let delta = mouse_motion.delta * ortho.scale * PAN_SPEED;

    transform.translation.x -= delta.x;
    transform.translation.y += delta.y; // Invert Y for natural feel
}
