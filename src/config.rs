//! Simulation configuration loading.
//!
//! The configuration is a JSON object with three required geometry fields
//! and an optional `"simulation"` section holding the run parameters:
//!
//! ```json
//! {
//!   "vehicle_wheelbase_m": 1.0,
//!   "hitch_length_m": 0.0,
//!   "trailer_length_m": 1.0,
//!   "simulation": {
//!     "speed_mps": 1.0,
//!     "steering_deg": 10.0,
//!     "step_size_s": 0.1,
//!     "step_count": 50,
//!     "initial": { "x_m": 0.0, "y_m": 0.0, "heading_deg": 0.0, "hitch_deg": 0.0 }
//!   }
//! }
//! ```
//!
//! Everything under `"simulation"` defaults to the reference run.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::physics::{IntegratorConfig, TrajectoryIntegrator};
use crate::types::{
    ControlInput, DEFAULT_SPEED_MPS, DEFAULT_STEERING_DEG, DEFAULT_STEP_COUNT,
    DEFAULT_STEP_SIZE_S, DEG_TO_RAD, GeometryError, MAX_STEP_COUNT, VehicleGeometry,
    VehicleState,
};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "vehicle_config.json";

pub const WHEELBASE_FIELD: &str = "vehicle_wheelbase_m";
pub const HITCH_LENGTH_FIELD: &str = "hitch_length_m";
pub const TRAILER_LENGTH_FIELD: &str = "trailer_length_m";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration root must be a JSON object")]
    NotAnObject,

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` is not a number")]
    NotNumeric(&'static str),

    #[error("invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("invalid simulation section: {0}")]
    InvalidSection(String),

    #[error("simulation parameter `{field}` must be finite (got {value})")]
    NonFinite { field: &'static str, value: f64 },

    #[error("invalid step size: {0} (must be positive)")]
    InvalidStepSize(f64),

    #[error("step_count {0} exceeds the maximum of {MAX_STEP_COUNT}")]
    TooManySteps(usize),
}

impl VehicleGeometry {
    /// Read and validate geometry from a JSON object.
    ///
    /// Only the three geometry fields are inspected; anything else in the
    /// object is ignored.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let object = value.as_object().ok_or(ConfigError::NotAnObject)?;
        let field = |name: &'static str| -> Result<f64, ConfigError> {
            object
                .get(name)
                .ok_or(ConfigError::MissingField(name))?
                .as_f64()
                .ok_or(ConfigError::NotNumeric(name))
        };

        let geometry = VehicleGeometry::new(
            field(WHEELBASE_FIELD)?,
            field(HITCH_LENGTH_FIELD)?,
            field(TRAILER_LENGTH_FIELD)?,
        )?;
        Ok(geometry)
    }
}

/// Initial state as written in the configuration file (degrees).
#[derive(Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InitialStateConfig {
    pub x_m: f64,
    pub y_m: f64,
    pub heading_deg: f64,
    pub hitch_deg: f64,
}

impl InitialStateConfig {
    pub fn to_state(&self) -> VehicleState {
        VehicleState::new(
            self.x_m,
            self.y_m,
            self.heading_deg * DEG_TO_RAD,
            self.hitch_deg * DEG_TO_RAD,
        )
    }
}

/// Run parameters from the `"simulation"` section.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RunParameters {
    pub speed_mps: f64,
    pub steering_deg: f64,
    pub step_size_s: f64,
    pub step_count: usize,
    pub initial: InitialStateConfig,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            speed_mps: DEFAULT_SPEED_MPS,
            steering_deg: DEFAULT_STEERING_DEG,
            step_size_s: DEFAULT_STEP_SIZE_S,
            step_count: DEFAULT_STEP_COUNT,
            initial: InitialStateConfig::default(),
        }
    }
}

impl RunParameters {
    fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("speed_mps", self.speed_mps),
            ("steering_deg", self.steering_deg),
            ("step_size_s", self.step_size_s),
            ("initial.x_m", self.initial.x_m),
            ("initial.y_m", self.initial.y_m),
            ("initial.heading_deg", self.initial.heading_deg),
            ("initial.hitch_deg", self.initial.hitch_deg),
        ];
        for (field, value) in checks {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        if self.step_size_s <= 0.0 {
            return Err(ConfigError::InvalidStepSize(self.step_size_s));
        }
        if self.step_count > MAX_STEP_COUNT {
            return Err(ConfigError::TooManySteps(self.step_count));
        }

        Ok(())
    }
}

/// Everything needed for one run, validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationConfig {
    pub geometry: VehicleGeometry,
    pub control: ControlInput,
    pub integrator: IntegratorConfig,
    pub initial: VehicleState,
}

impl SimulationConfig {
    /// Reference run parameters applied to the given geometry.
    pub fn with_defaults(geometry: VehicleGeometry) -> Self {
        Self::from_parts(geometry, RunParameters::default())
    }

    fn from_parts(geometry: VehicleGeometry, params: RunParameters) -> Self {
        Self {
            geometry,
            control: ControlInput::from_degrees(params.speed_mps, params.steering_deg),
            integrator: IntegratorConfig::new(params.step_size_s, params.step_count),
            initial: params.initial.to_state(),
        }
    }

    /// Load and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let reader = BufReader::new(File::open(path)?);
        let value: Value = serde_json::from_reader(reader)?;
        Self::from_json(&value)
    }

    /// Parse and validate a configuration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_json(&value)
    }

    /// Validate a configuration from an already-parsed JSON value.
    pub fn from_json(value: &Value) -> Result<Self, ConfigError> {
        let geometry = VehicleGeometry::from_json(value)?;

        let params = match value.get("simulation") {
            None | Some(Value::Null) => RunParameters::default(),
            Some(section) => RunParameters::deserialize(section)
                .map_err(|e| ConfigError::InvalidSection(e.to_string()))?,
        };
        params.validate()?;

        Ok(Self::from_parts(geometry, params))
    }

    /// Integrator for this configuration.
    pub fn integrator(&self) -> TrajectoryIntegrator {
        TrajectoryIntegrator::new(self.geometry, self.control, self.integrator)
    }
}
