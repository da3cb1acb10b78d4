//! Redundancy elimination: repeated lines become `[REF_n]` references and
//! phrase-level repeats collapse to a single occurrence.

use regex::Regex;
use sc_core::{Result, ScError, StrategyKind};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::catalog::{redundancy_patterns, CompiledPattern, Matcher, PatternCategory, ProtectedSpans};
use crate::strategy::StrategyOutput;

const PRESERVATION: f64 = 0.99;
/// A line must occur more often than this to become a reference.
const MIN_REPEATS: usize = 2;

static RE_REF_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[REF_\d+\]").unwrap());

/// Replace lines seen more than twice with numbered references. Lines inside
/// a protected span that crosses line breaks, such as a fenced block, are
/// left alone. The first occurrence keeps the line verbatim.
pub fn reference_repeated_lines(content: &str) -> String {
    let spans = ProtectedSpans::find(content);

    let mut lines = Vec::new();
    let mut offset = 0;
    for line in content.split('\n') {
        let range = offset..offset + line.len();
        offset = range.end + 1;
        lines.push((line, !spans.straddles(&range)));
    }

    let mut frequency: HashMap<&str, usize> = HashMap::new();
    for (line, eligible) in &lines {
        let clean = line.trim();
        if *eligible && !clean.is_empty() {
            *frequency.entry(clean).or_insert(0) += 1;
        }
    }

    let mut refs: HashMap<&str, usize> = HashMap::new();
    let mut processed = Vec::with_capacity(lines.len());
    for (line, eligible) in &lines {
        let clean = line.trim();
        let repeated = *eligible && frequency.get(clean).is_some_and(|&n| n > MIN_REPEATS);
        if !repeated {
            processed.push(line.to_string());
            continue;
        }
        match refs.get(clean) {
            Some(n) => {
                let indent = &line[..line.len() - line.trim_start().len()];
                processed.push(format!("{indent}[REF_{n}]"));
            }
            None => {
                let n = refs.len() + 1;
                refs.insert(clean, n);
                processed.push(format!("[REF_{n}]: {line}"));
            }
        }
    }
    processed.join("\n")
}

/// Collapse every match of one phrase-repeat pattern to its single
/// occurrence, skipping matches that would drop protected text. A duplicate
/// fenced block is itself protected, but its text survives in the kept copy,
/// so only the gap between the two blocks is checked.
pub fn collapse_repeats(content: &str, pattern: &CompiledPattern) -> String {
    let matches = pattern.find_collapsible(content);
    if matches.is_empty() {
        return content.to_string();
    }
    let spans = ProtectedSpans::find(content);

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for m in matches {
        let removed = match pattern.spec.matcher {
            Matcher::DuplicateFence => m.span.start + m.keep.len()..m.span.end - m.keep.len(),
            _ => m.span.clone(),
        };
        if spans.overlaps(&removed) {
            continue;
        }
        out.push_str(&content[cursor..m.span.start]);
        out.push_str(&m.keep);
        cursor = m.span.end;
    }
    out.push_str(&content[cursor..]);
    out
}

pub fn compress(content: &str) -> Result<StrategyOutput> {
    if RE_REF_TAG.is_match(content) {
        return Err(ScError::strategy(
            StrategyKind::RedundancyElimination,
            "content already contains [REF_n] tags",
        ));
    }

    let mut result = reference_repeated_lines(content);
    for pattern in redundancy_patterns()
        .iter()
        .filter(|p| p.spec.category == PatternCategory::PhraseRepeat)
    {
        result = collapse_repeats(&result, pattern);
    }
    Ok(StrategyOutput::new(result, PRESERVATION))
}
