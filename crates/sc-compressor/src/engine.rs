//! Semantic compressor — analyzer, cached pipeline and governance behind one
//! owned object.

use sc_core::{CompressionResult, ContentAnalysis, EngineConfig, Result, ScError};
use tracing::{debug, info, warn};

use crate::analyzer;
use crate::cache::{CacheKey, ResultCache};
use crate::governor::{Deadline, ResourceGovernor};
use crate::pipeline::CompressionPipeline;

pub struct SemanticCompressor {
    config: EngineConfig,
    cache: ResultCache,
}

impl SemanticCompressor {
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, cache: ResultCache::new() })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn analyze(&self, content: &str) -> ContentAnalysis {
        analyzer::analyze(content)
    }

    /// Compress with the engine's own configuration and no deadline.
    pub fn compress(&self, content: &str) -> Result<CompressionResult> {
        self.compress_with(content, &self.config, &Deadline::none())
    }

    /// Compress with an explicit configuration and deadline. Cached results
    /// are returned as stored, without re-checking the threshold.
    pub fn compress_with(
        &self,
        content: &str,
        config: &EngineConfig,
        deadline: &Deadline,
    ) -> Result<CompressionResult> {
        if content.trim().is_empty() {
            return Err(ScError::EmptyInput);
        }
        config.validate()?;

        let key = CacheKey::new(content, config.target_reduction, config.aggressive_mode);
        let result = self.cache.get_or_compute(key, || {
            let result = CompressionPipeline::from_config(config).run(content, deadline)?;
            info!(
                "Compression completed: {} tokens saved ({:.1}% reduction), preservation: {:.1}%, time: {:.1}s",
                result.tokens_saved,
                result.reduction() * 100.0,
                result.preservation_score * 100.0,
                result.processing_time
            );
            debug!("Strategies applied: {}", result.methods_joined());
            Ok(result)
        })?;

        if !result.meets_threshold(config.preservation_threshold) {
            warn!(
                "Preservation score {:.3} below threshold {}",
                result.preservation_score, config.preservation_threshold
            );
        }
        Ok(result)
    }

    /// Compress under the governor: memory pre-check, then the wall-clock
    /// deadline around the whole cached pipeline call.
    pub fn compress_governed(
        &self,
        content: &str,
        governor: &ResourceGovernor,
    ) -> Result<CompressionResult> {
        governor.check_memory(content)?;
        governor.run(self.config.max_time(), |deadline| {
            self.compress_with(content, &self.config, deadline)
        })
    }
}

impl Default for SemanticCompressor {
    fn default() -> Self {
        Self { config: EngineConfig::default(), cache: ResultCache::new() }
    }
}
