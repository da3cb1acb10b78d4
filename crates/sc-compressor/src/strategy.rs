//! Strategy catalog and dispatch.

use sc_core::{Result, StrategyKind};

use crate::{
    strategy_abstraction, strategy_aggressive, strategy_condensation, strategy_dedup,
    strategy_redundancy, strategy_whitespace,
};

/// Planning estimates for a strategy. The pipeline scores with the measured
/// factor each strategy reports, never with these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyDescriptor {
    pub kind: StrategyKind,
    pub declared_preservation: f64,
    pub declared_compression: f64,
}

impl StrategyDescriptor {
    pub fn name(&self) -> &'static str {
        self.kind.as_str()
    }
}

pub const STRATEGY_CATALOG: [StrategyDescriptor; 6] = [
    StrategyDescriptor {
        kind: StrategyKind::WhitespaceOptimization,
        declared_preservation: 1.00,
        declared_compression: 0.05,
    },
    StrategyDescriptor {
        kind: StrategyKind::RedundancyElimination,
        declared_preservation: 0.99,
        declared_compression: 0.15,
    },
    StrategyDescriptor {
        kind: StrategyKind::SemanticCondensation,
        declared_preservation: 0.95,
        declared_compression: 0.25,
    },
    StrategyDescriptor {
        kind: StrategyKind::PatternAbstraction,
        declared_preservation: 0.98,
        declared_compression: 0.20,
    },
    StrategyDescriptor {
        kind: StrategyKind::ContextDeduplication,
        declared_preservation: 0.99,
        declared_compression: 0.30,
    },
    StrategyDescriptor {
        kind: StrategyKind::AggressiveCompression,
        declared_preservation: 0.90,
        declared_compression: 0.40,
    },
];

pub fn descriptor(kind: StrategyKind) -> &'static StrategyDescriptor {
    // Catalog order matches `StrategyKind::ALL`.
    &STRATEGY_CATALOG[StrategyKind::ALL.iter().position(|k| *k == kind).unwrap_or(0)]
}

/// Transformed content plus the measured preservation factor.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyOutput {
    pub content: String,
    pub preservation: f64,
}

impl StrategyOutput {
    pub fn new(content: String, preservation: f64) -> Self {
        Self { content, preservation: preservation.clamp(0.0, 1.0) }
    }
}

/// Run one strategy over `content`.
pub fn apply(kind: StrategyKind, content: &str) -> Result<StrategyOutput> {
    match kind {
        StrategyKind::WhitespaceOptimization => Ok(strategy_whitespace::compress(content)),
        StrategyKind::RedundancyElimination => strategy_redundancy::compress(content),
        StrategyKind::SemanticCondensation => Ok(strategy_condensation::compress(content)),
        StrategyKind::PatternAbstraction => strategy_abstraction::compress(content),
        StrategyKind::ContextDeduplication => Ok(strategy_dedup::compress(content)),
        StrategyKind::AggressiveCompression => Ok(strategy_aggressive::compress(content)),
    }
}
