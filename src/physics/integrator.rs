//! Fixed-step explicit Euler integrator for the vehicle + trailer model.
//!
//! The integrator is a pure function of its inputs: it performs no I/O,
//! logging or rendering, and identical inputs give bit-identical output.

use std::ops::ControlFlow;

use thiserror::Error;

use super::kinematics::euler_step;
use crate::trajectory::Trajectory;
use crate::types::{
    ControlInput, DEFAULT_STEP_COUNT, DEFAULT_STEP_SIZE_S, MAX_STEP_COUNT, VehicleGeometry,
    VehicleState,
};

// =============================================================================
// Configuration
// =============================================================================

/// Step size and step count for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorConfig {
    /// Fixed timestep in seconds. Default: 0.1.
    pub step_size: f64,
    /// Number of steps to take. Default: 50.
    pub step_count: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_STEP_SIZE_S,
            step_count: DEFAULT_STEP_COUNT,
        }
    }
}

impl IntegratorConfig {
    pub fn new(step_size: f64, step_count: usize) -> Self {
        Self {
            step_size,
            step_count,
        }
    }

    /// Total simulated time in seconds.
    pub fn duration(&self) -> f64 {
        self.step_size * self.step_count as f64
    }
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntegrationError {
    #[error("invalid step size: {0} (must be positive and finite)")]
    InvalidStepSize(f64),

    #[error("too many steps: {0} (at most {MAX_STEP_COUNT})")]
    TooManySteps(usize),

    /// A non-finite value appeared. `partial` holds every finite state
    /// produced before `step` (empty when the inputs were already non-finite).
    #[error("non-finite state at step {step} ({count} finite states before it)", count = .partial.len())]
    NonFinite {
        step: usize,
        partial: Vec<VehicleState>,
    },

    #[error("run cancelled before step {step}")]
    Cancelled {
        step: usize,
        partial: Vec<VehicleState>,
    },
}

impl IntegrationError {
    /// States produced before the run stopped, for diagnosis.
    pub fn partial(&self) -> &[VehicleState] {
        match self {
            IntegrationError::InvalidStepSize(_) | IntegrationError::TooManySteps(_) => &[],
            IntegrationError::NonFinite { partial, .. }
            | IntegrationError::Cancelled { partial, .. } => partial,
        }
    }
}

// =============================================================================
// Run phase
// =============================================================================

/// Externally observable lifecycle of a run.
///
/// Running happens inside one synchronous call, so callers only ever see
/// the run before it starts or after it ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunPhase {
    #[default]
    NotStarted,
    Completed,
    Failed,
}

// =============================================================================
// Integrator
// =============================================================================

/// Immutable run parameters bundled with the stepping algorithm.
///
/// Geometry and control input are captured at construction and never
/// change, so one integrator can be run repeatedly without stale state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrajectoryIntegrator {
    geometry: VehicleGeometry,
    control: ControlInput,
    config: IntegratorConfig,
}

impl TrajectoryIntegrator {
    pub fn new(geometry: VehicleGeometry, control: ControlInput, config: IntegratorConfig) -> Self {
        Self {
            geometry,
            control,
            config,
        }
    }

    pub fn geometry(&self) -> &VehicleGeometry {
        &self.geometry
    }

    pub fn control(&self) -> &ControlInput {
        &self.control
    }

    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Integrate from `initial` for the configured number of steps.
    pub fn run(&self, initial: VehicleState) -> Result<Trajectory, IntegrationError> {
        self.run_observed(initial, |_, _| ControlFlow::Continue(()))
    }

    /// Integrate, handing each finalized state to `observer` as it is appended.
    ///
    /// The observer sees `(index, state)` starting with the initial state at
    /// index 0. Returning `ControlFlow::Break` stops the run before the next
    /// step with [`IntegrationError::Cancelled`].
    pub fn run_observed<F>(
        &self,
        initial: VehicleState,
        mut observer: F,
    ) -> Result<Trajectory, IntegrationError>
    where
        F: FnMut(usize, &VehicleState) -> ControlFlow<()>,
    {
        let dt = self.config.step_size;
        if !(dt.is_finite() && dt > 0.0) {
            return Err(IntegrationError::InvalidStepSize(dt));
        }
        if self.config.step_count > MAX_STEP_COUNT {
            return Err(IntegrationError::TooManySteps(self.config.step_count));
        }

        if !initial.is_finite() || !self.control.is_finite() {
            return Err(IntegrationError::NonFinite {
                step: 0,
                partial: Vec::new(),
            });
        }

        let mut trajectory = Trajectory::start(initial, dt, self.config.step_count);
        let mut state = initial;

        for step in 1..=self.config.step_count {
            if observer(step - 1, &state).is_break() {
                return Err(IntegrationError::Cancelled {
                    step,
                    partial: trajectory.into_states(),
                });
            }

            let next = euler_step(&self.geometry, &self.control, &state, dt);
            if !next.is_finite() {
                return Err(IntegrationError::NonFinite {
                    step,
                    partial: trajectory.into_states(),
                });
            }

            trajectory.push(next);
            state = next;
        }

        // Final state is observed too; the run is already complete so a
        // Break here has nothing left to cancel.
        let _ = observer(self.config.step_count, &state);

        Ok(trajectory)
    }
}

/// Integrate the model for `step_count` steps of `step_size` seconds.
///
/// Returns `step_count + 1` states: `initial` followed by each step.
pub fn run(
    geometry: &VehicleGeometry,
    control: &ControlInput,
    initial: VehicleState,
    step_size: f64,
    step_count: usize,
) -> Result<Trajectory, IntegrationError> {
    TrajectoryIntegrator::new(
        *geometry,
        *control,
        IntegratorConfig::new(step_size, step_count),
    )
    .run(initial)
}

// =============================================================================
// Tests
// =============================================================================
