use thiserror::Error;

use crate::types::StrategyKind;

#[derive(Error, Debug)]
pub enum ScError {
    #[error("No input content provided")]
    EmptyInput,
    #[error("Strategy {strategy} failed: {reason}")]
    StrategyFailure { strategy: StrategyKind, reason: String },
    #[error("Semantic compression timed out after {elapsed_secs:.2}s (deadline {deadline_secs:.2}s)")]
    OperationTimeout { elapsed_secs: f64, deadline_secs: f64 },
    #[error("Resource limit exceeded: {0}")]
    ResourceExhausted(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScError {
    pub fn strategy(strategy: StrategyKind, reason: impl Into<String>) -> Self {
        Self::StrategyFailure { strategy, reason: reason.into() }
    }

    /// Stable machine-readable tag reported to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "empty_input",
            Self::StrategyFailure { .. } => "strategy_failure",
            Self::OperationTimeout { .. } => "timeout",
            Self::ResourceExhausted(_) => "out_of_memory",
            Self::InvalidConfig(_) => "invalid_config",
            Self::Io(_) => "io",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "internal",
        }
    }

    /// Whether the error aborts the whole operation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::StrategyFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, ScError>;
