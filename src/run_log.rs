//! Run log: timestamped text lines describing a run.
//!
//! Lines carry the simulated time of the state they describe, go to the
//! tracing logger via `info!`, and are appended to a file sink. The log
//! only reads finished states and has no way to influence integration.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use bevy::prelude::*;

use crate::physics::IntegrationError;
use crate::trajectory::Trajectory;
use crate::types::{ControlInput, VehicleState};

/// Default run log file, appended to on every run.
pub const DEFAULT_LOG_PATH: &str = "log.txt";

/// Prefix a message with its simulated timestamp.
pub fn stamp(time: f64, message: &str) -> String {
    format!("{time:8.3} s > {message}")
}

/// `[Control]` line body.
pub fn control_message(control: &ControlInput) -> String {
    format!(
        "[Control]\t v: {} m/s, steering: {} deg",
        control.speed,
        control.steering_deg()
    )
}

/// State line body with angles in degrees, e.g. `[Step 3]\t x: ..`.
pub fn state_message(label: &str, state: &VehicleState) -> String {
    format!(
        "[{label}]\t x: {}, y: {}, heading: {} deg, hitch: {} deg",
        state.x,
        state.y,
        state.heading_deg(),
        state.hitch_deg()
    )
}

/// Writes run log lines to `info!` and to a sink.
pub struct RunLogger<W: Write> {
    sink: W,
}

impl RunLogger<BufWriter<File>> {
    /// Append to the log file at `path`, creating it if needed.
    pub fn append_to(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> RunLogger<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    fn line(&mut self, time: f64, message: &str) -> io::Result<()> {
        let line = stamp(time, message);
        info!("{line}");
        writeln!(self.sink, "{line}")
    }

    pub fn control(&mut self, control: &ControlInput) -> io::Result<()> {
        self.line(0.0, &control_message(control))
    }

    /// Log sample `index` of a run with step size `step_size`.
    pub fn state(&mut self, index: usize, step_size: f64, state: &VehicleState) -> io::Result<()> {
        let label = if index == 0 {
            "Initial".to_string()
        } else {
            format!("Step {index}")
        };
        self.line(index as f64 * step_size, &state_message(&label, state))
    }

    /// Log a completed run: control, initial state, every step, completion.
    pub fn trajectory(&mut self, control: &ControlInput, trajectory: &Trajectory) -> io::Result<()> {
        self.control(control)?;
        for (index, state) in trajectory.iter().enumerate() {
            self.state(index, trajectory.step_size(), state)?;
        }
        self.line(trajectory.duration(), "Completed")?;
        self.sink.flush()
    }

    /// Log the partial states of a failed run followed by the failure.
    pub fn failure(
        &mut self,
        control: &ControlInput,
        step_size: f64,
        error: &IntegrationError,
    ) -> io::Result<()> {
        self.control(control)?;
        let partial = error.partial();
        for (index, state) in partial.iter().enumerate() {
            self.state(index, step_size, state)?;
        }
        let line = stamp(partial.len() as f64 * step_size, &format!("Failed: {error}"));
        error!("{line}");
        writeln!(self.sink, "{line}")?;
        self.sink.flush()
    }
}
