use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ScError};

/// Per-invocation compression settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Desired fractional decrease in character count.
    pub target_reduction: f64,
    /// Minimum acceptable preservation score. Advisory only.
    pub preservation_threshold: f64,
    /// Budget for the pipeline's own per-strategy elapsed-time check.
    pub max_time_secs: u64,
    pub aggressive_mode: bool,
}

impl EngineConfig {
    pub fn max_time(&self) -> Duration {
        Duration::from_secs(self.max_time_secs)
    }

    pub fn validate(&self) -> Result<()> {
        check_fraction("target_reduction", self.target_reduction)?;
        check_fraction("preservation_threshold", self.preservation_threshold)?;
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_reduction: 0.25,
            preservation_threshold: 0.98,
            max_time_secs: 30,
            aggressive_mode: false,
        }
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ScError::InvalidConfig(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

/// Process-level ceilings applied by the resource governor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GovernorConfig {
    pub memory_limit_mib: u64,
    pub cpu_limit_secs: u64,
    pub default_timeout_secs: u64,
    /// Environment variable that caps the wall-clock deadline.
    pub timeout_env_var: String,
}

impl GovernorConfig {
    pub fn memory_limit_bytes(&self) -> u64 {
        self.memory_limit_mib * 1024 * 1024
    }

    /// Deadline ceiling: the environment override when it parses, otherwise
    /// the configured default.
    pub fn timeout_ceiling(&self) -> Duration {
        let secs = std::env::var(&self.timeout_env_var)
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(self.default_timeout_secs);
        Duration::from_secs(secs)
    }
}

impl Default for GovernorConfig {
    fn default() -> Self {
        Self {
            memory_limit_mib: 256,
            cpu_limit_secs: 60,
            default_timeout_secs: 60,
            timeout_env_var: "SEMCOMPRESS_TIMEOUT".into(),
        }
    }
}
