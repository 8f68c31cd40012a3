//! State-space integration engine for the vehicle + trailer model.
//!
//! [`kinematics`] holds the continuous-time rates, [`integrator`] the
//! fixed-step forward Euler loop that turns them into a [`Trajectory`].
//! Nothing in here logs or renders; collaborators read the finished
//! trajectory.
//!
//! [`Trajectory`]: crate::trajectory::Trajectory

mod integrator;
mod kinematics;

#[cfg(test)]
mod proptest_physics;

pub use integrator::{IntegrationError, IntegratorConfig, RunPhase, TrajectoryIntegrator, run};
pub use kinematics::{StateDerivative, derivative, euler_step};
