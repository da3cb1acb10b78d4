//! Result cache — memoized compression outcomes keyed by content
//! fingerprint and configuration. Entries live as long as the cache; there
//! is no eviction.

use parking_lot::Mutex;
use sc_core::{CompressionResult, Result};
use std::collections::HashMap;
use tracing::info;

/// md5 hex digest of the content.
pub fn content_fingerprint(content: &str) -> String {
    format!("{:x}", md5::compute(content.as_bytes()))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub content_hash: String,
    target_reduction_bits: u64,
    pub aggressive_mode: bool,
}

impl CacheKey {
    pub fn new(content: &str, target_reduction: f64, aggressive_mode: bool) -> Self {
        // -0.0 and 0.0 share a key.
        let target = if target_reduction == 0.0 { 0.0 } else { target_reduction };
        Self {
            content_hash: content_fingerprint(content),
            target_reduction_bits: target.to_bits(),
            aggressive_mode,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<CacheKey, CompressionResult>,
    hits: usize,
    misses: usize,
}

/// Owned, mutex-guarded result cache.
#[derive(Default)]
pub struct ResultCache {
    inner: Mutex<CacheInner>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the stored result for `key`, or run `compute` and store what
    /// it returns. The lookup, computation and insert hold the lock
    /// throughout. Errors are not cached.
    pub fn get_or_compute(
        &self,
        key: CacheKey,
        compute: impl FnOnce() -> Result<CompressionResult>,
    ) -> Result<CompressionResult> {
        let mut inner = self.inner.lock();
        if let Some(hit) = inner.entries.get(&key).cloned() {
            inner.hits += 1;
            info!("Using cached compression result");
            return Ok(hit);
        }
        inner.misses += 1;
        let result = compute()?;
        inner.entries.insert(key, result.clone());
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats { entries: inner.entries.len(), hits: inner.hits, misses: inner.misses }
    }
}
