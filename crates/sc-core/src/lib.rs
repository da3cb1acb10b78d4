//! Shared types for the semantic compressor: errors, configuration and the
//! analysis/compression result records.

pub mod config;
pub mod error;
pub mod types;

pub use config::{EngineConfig, GovernorConfig};
pub use error::{Result, ScError};
pub use types::{
    CompressibleSection, CompressionResult, ContentAnalysis, PipelineOutcome, SectionKind,
    StrategyKind,
};
