//! Compression pipeline — applies selected strategies in order.

use sc_core::{CompressionResult, EngineConfig, PipelineOutcome, Result, StrategyKind};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

use crate::analyzer::estimate_tokens;
use crate::cache::content_fingerprint;
use crate::governor::Deadline;
use crate::selector::select_strategies;
use crate::strategy;

/// Where a pipeline run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Ready,
    Running(StrategyKind),
    Finished(PipelineOutcome),
}

fn transition(state: &mut PipelineState, next: PipelineState) {
    debug!(from = ?state, to = ?next, "pipeline transition");
    *state = next;
}

/// Why a strategy's output was discarded although the strategy succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Longer than its input.
    Grew,
    /// Non-empty input came back empty.
    Emptied,
}

impl Rejection {
    pub fn check(input: &str, output: &str) -> Option<Self> {
        if output.is_empty() && !input.is_empty() {
            Some(Self::Emptied)
        } else if output.chars().count() > input.chars().count() {
            Some(Self::Grew)
        } else {
            None
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Grew => write!(f, "output grew"),
            Self::Emptied => write!(f, "output was empty"),
        }
    }
}

fn reduction(original_chars: usize, current: &str) -> f64 {
    if original_chars == 0 {
        return 0.0;
    }
    1.0 - current.chars().count() as f64 / original_chars as f64
}

/// The main compression pipeline.
#[derive(Debug, Clone)]
pub struct CompressionPipeline {
    strategies: Vec<StrategyKind>,
    target_reduction: f64,
    max_time: Duration,
}

impl CompressionPipeline {
    pub fn new(strategies: Vec<StrategyKind>, target_reduction: f64, max_time: Duration) -> Self {
        Self { strategies, target_reduction, max_time }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            select_strategies(config.target_reduction, config.aggressive_mode),
            config.target_reduction,
            config.max_time(),
        )
    }

    pub fn strategies(&self) -> &[StrategyKind] {
        &self.strategies
    }

    /// Compress `content`. Elapsed time past `max_time` truncates the
    /// remaining strategies; an expired `deadline` aborts with a timeout and
    /// discards the partial output.
    pub fn run(&self, content: &str, deadline: &Deadline) -> Result<CompressionResult> {
        let started = Instant::now();
        let original_size = content.chars().count();
        let mut state = PipelineState::Ready;

        let mut working = content.to_string();
        let mut preservation = 1.0;
        let mut method_used = Vec::new();
        let mut skipped = Vec::new();
        let mut timed_out = false;

        for &kind in &self.strategies {
            deadline.check()?;
            if started.elapsed() >= self.max_time {
                warn!("Compression timeout reached after {}s", self.max_time.as_secs());
                timed_out = true;
                break;
            }

            transition(&mut state, PipelineState::Running(kind));
            match strategy::apply(kind, &working) {
                Ok(out) => {
                    if let Some(rejection) = Rejection::check(&working, &out.content) {
                        warn!("Discarding {kind} output: {rejection}");
                        skipped.push(kind);
                        continue;
                    }
                    working = out.content;
                    preservation *= out.preservation;
                    method_used.push(kind);
                    if reduction(original_size, &working) >= self.target_reduction {
                        debug!(strategy = %kind, "target reduction reached");
                        break;
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    error!("Error in {kind}: {e}");
                    skipped.push(kind);
                }
            }
        }
        deadline.check()?;

        let outcome = if timed_out {
            PipelineOutcome::TimedOut
        } else if !skipped.is_empty() {
            PipelineOutcome::PartiallyCompleted
        } else {
            PipelineOutcome::Completed
        };
        transition(&mut state, PipelineState::Finished(outcome));

        let compressed_size = working.chars().count();
        let tokens_saved = estimate_tokens(content) as i64 - estimate_tokens(&working) as i64;
        let compression_ratio = if original_size > 0 {
            compressed_size as f64 / original_size as f64
        } else {
            1.0
        };

        Ok(CompressionResult {
            original_size,
            compressed_size,
            tokens_saved,
            compression_ratio,
            preservation_score: preservation,
            processing_time: started.elapsed().as_secs_f64(),
            method_used,
            content_hash: content_fingerprint(content),
            output: working,
            outcome,
            skipped,
        })
    }
}
