//! Simulation settings
//!
//! All values are plain numeric seconds; any unit conversion (hours,
//! per-minute rate constants) is expected to have happened already, see
//! [`crate::core::units`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, SimError};
use crate::core::units::hours;

/// Configuration of a single simulation run.
///
/// The defaults reproduce the canonical mammalian cell-cycle run: 96 hours
/// of simulated time at a 5 s step, sampled every 5 minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimSettings {
    /// Simulated time at which the run starts (seconds)
    #[serde(default)]
    pub start_time: f64,

    /// Simulated time at which the run ends (seconds)
    pub target_time: f64,

    /// Coarse step size (seconds)
    ///
    /// Every tick advances simulated time by exactly this much. Stiff
    /// sub-reactions refine it internally (see `sim::FineStepper`), but the
    /// driver itself never subdivides a step.
    pub step: f64,

    /// Sampling interval (seconds)
    ///
    /// A marking snapshot is appended to the recording whenever elapsed
    /// time crosses a multiple of this interval.
    pub sampling: f64,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            start_time: 0.0,
            target_time: hours(96.0),
            step: 5.0,
            sampling: 300.0,
        }
    }
}

impl SimSettings {
    /// Settings starting at t = 0 with the given target, step and sampling.
    pub fn new(target_time: f64, step: f64, sampling: f64) -> Self {
        Self {
            start_time: 0.0,
            target_time,
            step,
            sampling,
        }
    }

    /// Validate internal consistency before a run is constructed.
    pub fn validate(&self) -> Result<()> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(SimError::Config(format!(
                "step must be positive and finite, got {}",
                self.step
            )));
        }
        if !self.target_time.is_finite() || self.target_time <= self.start_time {
            return Err(SimError::Config(format!(
                "target_time ({}) must lie after start_time ({})",
                self.target_time, self.start_time
            )));
        }
        if !self.sampling.is_finite() || self.sampling <= 0.0 {
            return Err(SimError::Config(format!(
                "sampling must be positive and finite, got {}",
                self.sampling
            )));
        }
        if self.sampling < self.step {
            return Err(SimError::Config(format!(
                "sampling ({}) must not be finer than the step size ({})",
                self.sampling, self.step
            )));
        }
        Ok(())
    }

    /// Load settings from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let settings: SimSettings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }
}
