//! Strategy selection from target reduction and mode.

use sc_core::StrategyKind;

use StrategyKind::*;

const AGGRESSIVE_PLAN: [StrategyKind; 4] = [
    AggressiveCompression,
    ContextDeduplication,
    SemanticCondensation,
    WhitespaceOptimization,
];

/// Conservative tiers, each a prefix extension of the previous one.
const CONSERVATIVE_PLAN: [StrategyKind; 4] = [
    WhitespaceOptimization,
    RedundancyElimination,
    SemanticCondensation,
    PatternAbstraction,
];

/// Upper bound of target reduction served by each conservative tier.
const TIER_BOUNDARIES: [f64; 3] = [0.10, 0.20, 0.30];

/// Ordered strategies to try.
pub fn select_strategies(target_reduction: f64, aggressive_mode: bool) -> Vec<StrategyKind> {
    if aggressive_mode {
        return AGGRESSIVE_PLAN.to_vec();
    }
    let tier = TIER_BOUNDARIES
        .iter()
        .position(|&bound| target_reduction <= bound)
        .unwrap_or(TIER_BOUNDARIES.len());
    CONSERVATIVE_PLAN[..=tier].to_vec()
}
