//! Trailer Simulator - vehicle and trailer kinematics
//!
//! A library crate providing the kinematic model, the fixed-step
//! integrator, configuration, run logging and visualization components
//! for testing and integration purposes.

pub mod camera;
pub mod config;
pub mod input;
pub mod physics;
pub mod pose;
pub mod render;
pub mod run_log;
pub mod simulation;
pub mod time;
pub mod trajectory;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
