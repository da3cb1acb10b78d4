use serde::{Deserialize, Serialize};
use std::fmt;

/// The six compression strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    WhitespaceOptimization,
    RedundancyElimination,
    SemanticCondensation,
    PatternAbstraction,
    ContextDeduplication,
    AggressiveCompression,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 6] = [
        Self::WhitespaceOptimization,
        Self::RedundancyElimination,
        Self::SemanticCondensation,
        Self::PatternAbstraction,
        Self::ContextDeduplication,
        Self::AggressiveCompression,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WhitespaceOptimization => "whitespace_optimization",
            Self::RedundancyElimination => "redundancy_elimination",
            Self::SemanticCondensation => "semantic_condensation",
            Self::PatternAbstraction => "pattern_abstraction",
            Self::ContextDeduplication => "context_deduplication",
            Self::AggressiveCompression => "aggressive_compression",
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of compressible section found by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    RepetitiveLine,
    LargeCodeBlock,
}

/// A region of content the analyzer expects to shrink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressibleSection {
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// The repeated line, or an excerpt of a large block.
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    pub savings_potential: f64,
}

/// Diagnostic view of a content blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    pub total_tokens: usize,
    pub redundant_patterns: Vec<String>,
    pub compressible_sections: Vec<CompressibleSection>,
    pub semantic_density: f64,
    pub optimization_potential: f64,
}

impl ContentAnalysis {
    pub fn empty() -> Self {
        Self {
            total_tokens: 0,
            redundant_patterns: Vec::new(),
            compressible_sections: Vec::new(),
            semantic_density: 0.0,
            optimization_potential: 0.0,
        }
    }

    /// Tokens the analyzer expects compression to recover.
    pub fn estimated_savings(&self) -> usize {
        (self.total_tokens as f64 * self.optimization_potential) as usize
    }
}

/// How the pipeline finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every selected strategy ran, or the target was reached.
    Completed,
    /// The elapsed-time budget truncated the remaining strategies.
    TimedOut,
    /// At least one strategy failed and was skipped.
    PartiallyCompleted,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompressionResult {
    pub original_size: usize,
    pub compressed_size: usize,
    pub tokens_saved: i64,
    pub compression_ratio: f64,
    pub preservation_score: f64,
    /// Seconds.
    pub processing_time: f64,
    pub method_used: Vec<StrategyKind>,
    pub content_hash: String,
    pub output: String,
    pub outcome: PipelineOutcome,
    pub skipped: Vec<StrategyKind>,
}

impl CompressionResult {
    /// Fractional size decrease, `1 - ratio`.
    pub fn reduction(&self) -> f64 {
        1.0 - self.compression_ratio
    }

    pub fn meets_threshold(&self, threshold: f64) -> bool {
        self.preservation_score >= threshold
    }

    pub fn methods_joined(&self) -> String {
        self.method_used
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
