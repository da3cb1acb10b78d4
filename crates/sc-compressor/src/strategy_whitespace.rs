//! Whitespace optimization: line endings, blank-line runs, trailing and
//! repeated spaces. Protected spans are copied through untouched.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::ProtectedSpans;
use crate::strategy::StrategyOutput;

static RE_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r\n|\r").unwrap());
static RE_BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());
static RE_TRAILING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\S\n]+\n").unwrap());
static RE_SPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

/// Normalize one unprotected segment.
pub fn normalize_segment(segment: &str, at_end: bool) -> String {
    let result = RE_LINE_BREAK.replace_all(segment, "\n");
    let result = RE_BLANK_RUN.replace_all(&result, "\n\n");
    let result = RE_TRAILING.replace_all(&result, "\n");
    let trimmed: &str = if at_end {
        result.trim_end_matches(|c: char| c.is_whitespace() && c != '\n')
    } else {
        &result
    };
    RE_SPACE_RUN.replace_all(trimmed, " ").into_owned()
}

pub fn compress(content: &str) -> StrategyOutput {
    if content.is_empty() {
        return StrategyOutput::new(String::new(), 1.0);
    }
    let spans = ProtectedSpans::find(content);
    let result = spans.map_unprotected(content, normalize_segment);
    StrategyOutput::new(result, 1.0)
}
