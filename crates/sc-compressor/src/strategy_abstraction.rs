//! Pattern abstraction: large function bodies and JSON-like blocks are
//! replaced by short tokens, with an appended dictionary for recovery.

use regex::Regex;
use sc_core::{Result, ScError, StrategyKind};
use std::sync::LazyLock;

use crate::strategy::StrategyOutput;

const PRESERVATION: f64 = 0.98;
pub const DICTIONARY_HEADER: &str = "--- Pattern Abstractions ---";
const MIN_FUNC_CHARS: usize = 200;
const MIN_JSON_CHARS: usize = 300;
const EXCERPT_CHARS: usize = 100;

static RE_FUNC_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:pub\s+)?(?:async\s+)?(?:def|fn|function)\s+\w+\s*\(").unwrap()
});

/// One abstracted block and its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abstraction {
    pub token: String,
    pub original: String,
}

impl Abstraction {
    fn dictionary_line(&self) -> String {
        let excerpt: String = self.original.chars().take(EXCERPT_CHARS).collect();
        let ellipsis = if self.original.chars().count() > EXCERPT_CHARS { "..." } else { "" };
        format!("{}: {}{}\n", self.token, excerpt, ellipsis)
    }
}

/// Function-like blocks: a column-0 header followed by indented or blank
/// lines, plus a closing brace line when present.
pub fn function_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut search_from = 0;
    while let Some(m) = RE_FUNC_HEADER.find_at(content, search_from) {
        let start = m.start();
        let mut end = content[start..].find('\n').map_or(content.len(), |i| start + i);
        let mut last_content_end = end;

        while end < content.len() {
            let line_start = end + 1;
            let line_end = content[line_start..].find('\n').map_or(content.len(), |i| line_start + i);
            let line = &content[line_start..line_end];
            if line.trim().is_empty() {
                end = line_end;
            } else if line.starts_with(char::is_whitespace) {
                end = line_end;
                last_content_end = line_end;
            } else if line.starts_with('}') {
                last_content_end = line_end;
                break;
            } else {
                break;
            }
        }

        blocks.push(&content[start..last_content_end]);
        search_from = last_content_end.max(m.end());
    }
    blocks
}

/// Outermost brace-balanced blocks.
pub fn json_blocks(content: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in content.char_indices() {
        match c {
            '{' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    blocks.push(&content[start..=i]);
                }
            }
            _ => {}
        }
    }
    blocks
}

fn abstract_blocks(
    content: &str,
    blocks: Vec<&str>,
    min_chars: usize,
    prefix: &str,
    out: &mut Vec<Abstraction>,
) -> String {
    let mut result = content.to_string();
    let mut next = 0;
    for block in blocks {
        if block.chars().count() <= min_chars || out.iter().any(|a| a.original == block) {
            continue;
        }
        let token = format!("[{prefix}_{next}]");
        next += 1;
        result = result.replace(block, &token);
        out.push(Abstraction { token, original: block.to_string() });
    }
    result
}

pub fn compress(content: &str) -> Result<StrategyOutput> {
    if content.contains(DICTIONARY_HEADER) {
        return Err(ScError::strategy(
            StrategyKind::PatternAbstraction,
            "content already carries an abstraction dictionary",
        ));
    }

    let mut abstractions = Vec::new();
    let result = abstract_blocks(content, function_blocks(content), MIN_FUNC_CHARS, "FUNC", &mut abstractions);
    let json = json_blocks(&result);
    let mut result = abstract_blocks(&result, json, MIN_JSON_CHARS, "JSON", &mut abstractions);

    if !abstractions.is_empty() {
        result.push_str("\n\n");
        result.push_str(DICTIONARY_HEADER);
        result.push('\n');
        for a in &abstractions {
            result.push_str(&a.dictionary_line());
        }
    }
    Ok(StrategyOutput::new(result, PRESERVATION))
}
