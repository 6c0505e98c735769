//! Configuration types for the simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable naming a JSON configuration file for the runner
pub const CONFIG_ENV_VAR: &str = "LIFE_CONFIG";

/// Simulation configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Width of the grid in cells
    pub width: u32,
    /// Height of the grid in cells
    pub height: u32,
    /// Interval between generations during continuous play (milliseconds)
    pub delay_ms: u64,
    /// Probability of a cell being alive after randomization (0.0 to 1.0)
    pub randomize_probability: f64,
    /// Random seed for reproducibility, OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 25,
            delay_ms: 100,
            randomize_probability: 0.2,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Config for a grid of the given size, everything else defaulted
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn validate(&self) -> Result<()> {
        validate_dimensions(self.width, self.height)?;

        if !(0.0..=1.0).contains(&self.randomize_probability) {
            return Err(Error::InvalidConfig(format!(
                "randomize_probability must be within [0, 1], got {}",
                self.randomize_probability
            )));
        }

        if self.delay_ms == 0 {
            return Err(Error::InvalidConfig("delay_ms must be non-zero".to_string()));
        }

        Ok(())
    }
}

/// Largest number of cells a grid may hold
pub const MAX_CELLS: u64 = i32::MAX as u64;

/// Reject grid sizes with a zero side, a side outside the signed coordinate
/// space, or more than [`MAX_CELLS`] cells
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(Error::InvalidConfig(format!(
            "grid dimensions {}x{} exceed the coordinate range",
            width, height
        )));
    }

    let cells = width as u64 * height as u64;
    if cells > MAX_CELLS {
        return Err(Error::InvalidConfig(format!(
            "grid dimensions {}x{} give {} cells, more than the maximum of {}",
            width, height, cells, MAX_CELLS
        )));
    }

    Ok(())
}

/// Continuous-play runner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Engine configuration
    pub simulation: SimulationConfig,
    /// Randomize the grid before playing
    pub start_randomized: bool,
    /// Switch to running immediately after startup
    pub start_running: bool,
    /// Stop after this many generations, run until interrupted when absent
    pub max_generations: Option<u64>,
    /// Log a population summary every N generations
    pub report_every: u64,
    /// OpenTelemetry endpoint
    pub otel_endpoint: Option<String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            start_randomized: true,
            start_running: true,
            max_generations: None,
            report_every: 100,
            otel_endpoint: None,
        }
    }
}

impl RunnerConfig {
    /// Load from the file named by `LIFE_CONFIG`, falling back to defaults
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        debug!("Loaded runner configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;

        if self.report_every == 0 {
            return Err(Error::InvalidConfig("report_every must be non-zero".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimulationConfig::default();
        assert_eq!(config.width, 40);
        assert_eq!(config.height, 25);
        assert_eq!(config.delay(), Duration::from_millis(100));
        assert_eq!(config.randomize_probability, 0.2);
        assert!(config.validate().is_ok());

        let runner = RunnerConfig::default();
        assert!(runner.start_randomized);
        assert!(runner.start_running);
        assert_eq!(runner.max_generations, None);
        assert!(runner.validate().is_ok());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = SimulationConfig::with_size(0, 10).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 10 }));

        let err = SimulationConfig::with_size(10, 0).validate().unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 10, height: 0 }));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        let err = validate_dimensions(u32::MAX, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_cell_count_limit() {
        // 65536 * 32767 is just under i32::MAX, one more row goes over.
        assert!(validate_dimensions(65536, 32767).is_ok());
        assert!(matches!(
            validate_dimensions(65536, 32769),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SimulationConfig::with_size(65536, 32769).validate(),
            Err(Error::InvalidConfig(_))
        ));
        assert!(validate_dimensions(i32::MAX as u32, 1).is_ok());
        assert!(validate_dimensions(i32::MAX as u32, 2).is_err());
    }

    #[test]
    fn test_probability_range() {
        let mut config = SimulationConfig::default();
        config.randomize_probability = 1.5;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.randomize_probability = f64::NAN;
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.randomize_probability = 0.0;
        assert!(config.validate().is_ok());
        config.randomize_probability = 1.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_report_interval_rejected() {
        let config = RunnerConfig {
            report_every: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
        assert!(RunnerConfig::from_json(r#"{"report_every": 0}"#).is_err());
    }

    #[test]
    fn test_zero_delay_rejected() {
        let config = SimulationConfig {
            delay_ms: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = RunnerConfig::from_json(
            r#"{"simulation": {"width": 100, "seed": 7}, "max_generations": 50}"#,
        )
        .unwrap();
        assert_eq!(config.simulation.width, 100);
        assert_eq!(config.simulation.height, 25);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.max_generations, Some(50));
        assert!(config.start_running);
    }

    #[test]
    fn test_invalid_json_config_rejected() {
        let err = RunnerConfig::from_json(r#"{"simulation": {"height": 0}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));

        let err = RunnerConfig::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_missing_config_file() {
        let err = RunnerConfig::from_file("/nonexistent/life.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
