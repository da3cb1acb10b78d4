//! Context deduplication: near-duplicate paragraphs are dropped by word-set
//! Jaccard similarity.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use crate::catalog::ProtectedSpans;
use crate::strategy::StrategyOutput;

const SIMILARITY_THRESHOLD: f64 = 0.8;
const MAX_PRESERVATION: f64 = 0.99;

static RE_BLOCK_SEP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

/// Lowercase word set.
pub fn word_set(text: &str) -> HashSet<String> {
    RE_WORD.find_iter(text).map(|m| m.as_str().to_lowercase()).collect()
}

/// Jaccard similarity between two word sets; 0 when either is empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    intersection as f64 / union as f64
}

pub fn similarity(a: &str, b: &str) -> f64 {
    jaccard(&word_set(a), &word_set(b))
}

/// Split on blank lines that sit outside protected spans. Blocks are
/// trimmed and empty blocks dropped.
pub fn split_blocks(content: &str) -> Vec<&str> {
    let spans = ProtectedSpans::find(content);
    let mut blocks = Vec::new();
    let mut cursor = 0;
    for sep in RE_BLOCK_SEP.find_iter(content) {
        if spans.overlaps(&sep.range()) {
            continue;
        }
        blocks.push(&content[cursor..sep.start()]);
        cursor = sep.end();
    }
    blocks.push(&content[cursor..]);
    blocks.into_iter().map(str::trim).filter(|b| !b.is_empty()).collect()
}

struct KeptBlock<'a> {
    text: &'a str,
    words: HashSet<String>,
}

/// A block duplicates a kept block when their word sets are close enough
/// and every protected substring of the block survives in the kept one.
fn duplicates(block: &str, words: &HashSet<String>, kept: &KeptBlock<'_>) -> bool {
    if jaccard(words, &kept.words) <= SIMILARITY_THRESHOLD {
        return false;
    }
    let spans = ProtectedSpans::find(block);
    let survives = spans.texts(block).all(|t| kept.text.contains(t));
    survives
}

pub fn compress(content: &str) -> StrategyOutput {
    let blocks = split_blocks(content);
    if blocks.is_empty() {
        return StrategyOutput::new(String::new(), 1.0);
    }

    let mut kept: Vec<KeptBlock<'_>> = Vec::new();
    for block in &blocks {
        let words = word_set(block);
        if kept.iter().any(|k| duplicates(block, &words, k)) {
            continue;
        }
        kept.push(KeptBlock { text: block, words });
    }

    let preservation = (kept.len() as f64 / blocks.len() as f64).min(MAX_PRESERVATION);
    let result = kept.iter().map(|k| k.text).collect::<Vec<_>>().join("\n\n");
    StrategyOutput::new(result, preservation)
}
