//! Content analyzer — diagnostic scoring of a content blob.

use regex::Regex;
use sc_core::{CompressibleSection, ContentAnalysis, SectionKind};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use crate::catalog::{fenced_code, redundancy_patterns};

/// Characters per token for the size heuristic.
const CHARS_PER_TOKEN: usize = 4;
const MIN_LINE_CHARS: usize = 20;
const MIN_LINE_REPEATS: usize = 2;
const LARGE_BLOCK_CHARS: usize = 1000;
const LARGE_BLOCK_SAVINGS: f64 = 0.2;
const EXCERPT_CHARS: usize = 100;
const MAX_POTENTIAL: f64 = 0.5;

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").unwrap());

pub fn estimate_tokens(content: &str) -> usize {
    content.chars().count() / CHARS_PER_TOKEN
}

/// Every redundancy-catalog match, pattern by pattern.
pub fn find_redundant_patterns(content: &str) -> Vec<String> {
    redundancy_patterns()
        .iter()
        .flat_map(|p| p.find_ranges(content))
        .map(|r| content[r].to_string())
        .collect()
}

/// Lines repeated more than twice, then oversized fenced blocks.
pub fn find_compressible_sections(content: &str) -> Vec<CompressibleSection> {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for line in content.split('\n') {
        let clean = line.trim();
        if clean.chars().count() > MIN_LINE_CHARS {
            let count = counts.entry(clean).or_insert(0);
            if *count == 0 {
                order.push(clean);
            }
            *count += 1;
        }
    }

    let mut sections: Vec<CompressibleSection> = order
        .into_iter()
        .filter_map(|line| {
            let count = counts[line];
            (count > MIN_LINE_REPEATS).then(|| CompressibleSection {
                kind: SectionKind::RepetitiveLine,
                content: line.to_string(),
                count: Some(count),
                size: None,
                savings_potential: (line.chars().count() * (count - 1)) as f64,
            })
        })
        .collect();

    for block in fenced_code().find_iter(content) {
        let size = block.as_str().chars().count();
        if size > LARGE_BLOCK_CHARS {
            let excerpt: String = block.as_str().chars().take(EXCERPT_CHARS).collect();
            sections.push(CompressibleSection {
                kind: SectionKind::LargeCodeBlock,
                content: format!("{excerpt}..."),
                count: None,
                size: Some(size),
                savings_potential: size as f64 * LARGE_BLOCK_SAVINGS,
            });
        }
    }
    sections
}

/// Unique lowercase words per character.
pub fn semantic_density(content: &str) -> f64 {
    let chars = content.chars().count();
    if chars == 0 {
        return 0.0;
    }
    let unique: HashSet<String> = RE_WORD.find_iter(content).map(|m| m.as_str().to_lowercase()).collect();
    unique.len() as f64 / chars as f64
}

/// Analyze content for optimization opportunities. Never fails.
pub fn analyze(content: &str) -> ContentAnalysis {
    let chars = content.chars().count();
    if chars == 0 {
        return ContentAnalysis::empty();
    }

    let redundant_patterns = find_redundant_patterns(content);
    let compressible_sections = find_compressible_sections(content);

    let redundant_chars: usize = redundant_patterns.iter().map(|p| p.chars().count()).sum();
    let savings: f64 = compressible_sections.iter().map(|s| s.savings_potential).sum();
    let redundancy_score = redundant_chars as f64 / chars as f64;
    let repetition_score = savings / chars as f64;

    ContentAnalysis {
        total_tokens: estimate_tokens(content),
        redundant_patterns,
        compressible_sections,
        semantic_density: semantic_density(content),
        optimization_potential: (redundancy_score + repetition_score).clamp(0.0, MAX_POTENTIAL),
    }
}
