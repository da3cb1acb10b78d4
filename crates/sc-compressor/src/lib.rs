//! Semantic compressor — bounded-loss text compression for LLM context.
//!
//! Strategies:
//! 1. Whitespace optimization — line endings, blank-line runs, spaces
//! 2. Redundancy elimination — repeated lines become `[REF_n]` references
//! 3. Semantic condensation — verbose phrases and filler words
//! 4. Pattern abstraction — large functions/JSON become dictionary tokens
//! 5. Context deduplication — near-duplicate paragraphs via Jaccard similarity
//! 6. Aggressive compression — comments, surplus examples, abbreviations
//!
//! The pipeline multiplies each strategy's measured preservation factor and
//! stops once the target reduction is met.

pub mod analyzer;
pub mod cache;
pub mod catalog;
pub mod engine;
pub mod governor;
pub mod pipeline;
pub mod selector;
pub mod strategy;
pub mod strategy_abstraction;
pub mod strategy_aggressive;
pub mod strategy_condensation;
pub mod strategy_dedup;
pub mod strategy_redundancy;
pub mod strategy_whitespace;

pub use analyzer::analyze;
pub use cache::{content_fingerprint, CacheKey, ResultCache};
pub use engine::SemanticCompressor;
pub use governor::{Deadline, ResourceGovernor};
pub use pipeline::{CompressionPipeline, PipelineState, Rejection};
pub use selector::select_strategies;
pub use strategy::{StrategyDescriptor, StrategyOutput, STRATEGY_CATALOG};

pub use sc_core::{
    CompressionResult, ContentAnalysis, EngineConfig, GovernorConfig, PipelineOutcome, ScError,
    StrategyKind,
};

#[cfg(test)]
mod tests;
