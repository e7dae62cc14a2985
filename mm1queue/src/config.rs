use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::process::ProcessConfig;

/// Parameters of a simulation run, loadable from JSON.
///
/// Missing fields, at any nesting level, take the reference values: arrival
/// 0.25, departure 0.30, truncation to 2 every 10 steps, 10000 steps, 100
/// trials, seed 1234 and a 20-slot buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub process: ProcessConfig,
    pub steps: usize,
    pub trials: usize,
    pub seed: u64,
    /// Slot count of the buffer-backed run.
    pub capacity: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            process: ProcessConfig::default(),
            steps: 10_000,
            trials: 100,
            seed: 1234,
            capacity: 20,
        }
    }
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.process.validate()?;
        if self.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.trials == 0 {
            return Err(ConfigError::ZeroTrials);
        }
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}
