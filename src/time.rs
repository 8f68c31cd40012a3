//! Playback clock for animating a finished trajectory.
//!
//! The clock only selects which part of the trajectory is shown; it never
//! drives integration.

use bevy::prelude::*;

use crate::simulation::SimulationRun;

/// Available playback speeds (simulated seconds per real second).
pub const PLAYBACK_SCALES: [f64; 5] = [0.25, 0.5, 1.0, 2.0, 4.0];

/// Plugin providing playback advancement.
pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlaybackTime>()
            .add_systems(Update, advance_playback);
    }
}

/// Playback position within the trajectory.
#[derive(Resource, Clone, Debug)]
pub struct PlaybackTime {
    /// Current simulated time shown (seconds from the initial state)
    pub current: f64,
    /// Simulated seconds per real second
    pub scale: f64,
    /// Whether playback is paused
    pub paused: bool,
    /// Restart from the beginning when the end is reached
    pub looping: bool,
}

impl Default for PlaybackTime {
    fn default() -> Self {
        Self {
            current: 0.0,
            scale: 1.0,
            paused: false,
            looping: true,
        }
    }
}

impl PlaybackTime {
    /// Advance by `real_dt` seconds of wall time over a run of `duration`.
    ///
    /// Non-looping playback stops and pauses at the end.
    pub fn advance(&mut self, real_dt: f64, duration: f64) {
        if self.paused {
            return;
        }
        if duration <= 0.0 {
            self.current = 0.0;
            return;
        }

        self.current += real_dt * self.scale;

        if self.current >= duration {
            if self.looping {
                self.current %= duration;
            } else {
                self.current = duration;
                self.paused = true;
            }
        }
    }

    /// Jump back to the initial state and pause.
    pub fn reset(&mut self) {
        self.current = 0.0;
        self.paused = true;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Jump to time `t`, clamped to a run of `duration`.
    pub fn seek(&mut self, t: f64, duration: f64) {
        self.current = if t.is_nan() { 0.0 } else { t.clamp(0.0, duration.max(0.0)) };
    }
}

/// Advance playback based on real elapsed time.
fn advance_playback(mut playback: ResMut<PlaybackTime>, time: Res<Time>, run: Res<SimulationRun>) {
    let Some(trajectory) = run.trajectory() else {
        return;
    };
    playback.advance(time.delta_secs_f64(), trajectory.duration());
}
