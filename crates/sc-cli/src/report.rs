//! JSON reports printed by the CLI.

use sc_core::{CompressionResult, ContentAnalysis, ScError, StrategyKind};
use serde::Serialize;

pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeReport {
    pub total_tokens: usize,
    pub semantic_density: f64,
    pub optimization_potential: f64,
    pub redundant_patterns_count: usize,
    pub compressible_sections: usize,
    pub estimated_savings: usize,
}

impl From<&ContentAnalysis> for AnalyzeReport {
    fn from(a: &ContentAnalysis) -> Self {
        Self {
            total_tokens: a.total_tokens,
            semantic_density: round_to(a.semantic_density, 4),
            optimization_potential: round_to(a.optimization_potential, 3),
            redundant_patterns_count: a.redundant_patterns.len(),
            compressible_sections: a.compressible_sections.len(),
            estimated_savings: a.estimated_savings(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressReport {
    pub status: &'static str,
    pub original_size: usize,
    pub compressed_size: usize,
    pub tokens_saved: i64,
    pub compression_ratio: f64,
    pub reduction_percentage: f64,
    pub preservation_score: f64,
    pub processing_time: f64,
    pub methods_used: Vec<StrategyKind>,
    pub meets_preservation_threshold: bool,
}

impl CompressReport {
    pub fn new(r: &CompressionResult, preservation_threshold: f64) -> Self {
        Self {
            status: "success",
            original_size: r.original_size,
            compressed_size: r.compressed_size,
            tokens_saved: r.tokens_saved,
            compression_ratio: round_to(r.compression_ratio, 3),
            reduction_percentage: round_to(r.reduction() * 100.0, 1),
            preservation_score: round_to(r.preservation_score, 3),
            processing_time: round_to(r.processing_time, 2),
            methods_used: r.method_used.clone(),
            meets_preservation_threshold: r.meets_threshold(preservation_threshold),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub status: &'static str,
    pub error: &'static str,
}

impl ErrorReport {
    pub fn new(err: &anyhow::Error) -> Self {
        Self { status: "error", error: error_kind(err) }
    }
}

/// Machine-readable tag for an error that reached the CLI edge.
pub fn error_kind(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<ScError>() {
        e.kind()
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        "io"
    } else {
        "internal"
    }
}
