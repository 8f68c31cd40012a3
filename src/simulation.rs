//! Application-side ownership of a single run.
//!
//! Holds the validated configuration, tracks the run phase, and keeps the
//! finished trajectory for the log and the visualizer to read.

use bevy::prelude::*;

use crate::config::SimulationConfig;
use crate::physics::{IntegrationError, RunPhase};
use crate::trajectory::Trajectory;

/// Resource holding the configuration and result of the run.
#[derive(Resource, Clone, Debug)]
pub struct SimulationRun {
    config: SimulationConfig,
    phase: RunPhase,
    trajectory: Option<Trajectory>,
}

impl SimulationRun {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            phase: RunPhase::NotStarted,
            trajectory: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The trajectory, available only once the run completed.
    pub fn trajectory(&self) -> Option<&Trajectory> {
        self.trajectory.as_ref()
    }

    /// Run the integrator to completion.
    ///
    /// On failure the phase becomes [`RunPhase::Failed`] and no trajectory
    /// is stored; the partial states travel inside the returned error.
    pub fn execute(&mut self) -> Result<&Trajectory, IntegrationError> {
        match self.config.integrator().run(self.config.initial) {
            Ok(trajectory) => {
                self.phase = RunPhase::Completed;
                Ok(self.trajectory.insert(trajectory))
            }
            Err(err) => {
                self.phase = RunPhase::Failed;
                self.trajectory = None;
                Err(err)
            }
        }
    }
}
