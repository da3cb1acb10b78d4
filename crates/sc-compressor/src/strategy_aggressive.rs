//! Aggressive compression: comments, surplus examples and long technical
//! words go. Lowest preservation of all strategies.

use regex::Regex;
use std::sync::LazyLock;

use crate::strategy::StrategyOutput;

const PRESERVATION: f64 = 0.90;
const MAX_EXAMPLES: usize = 2;

pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("function", "fn"),
    ("parameter", "param"),
    ("argument", "arg"),
    ("variable", "var"),
    ("configuration", "config"),
    ("environment", "env"),
    ("directory", "dir"),
    ("execute", "exec"),
    ("initialization", "init"),
    ("optimization", "opt"),
];

static RE_HASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[ \t])#[^\n]*").unwrap());
// `://` is a URL scheme, not a comment.
static RE_SLASH_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(^|[^:])//[^\n]*").unwrap());
static RE_BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
static RE_EXAMPLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:example|for instance|such as)\b|\be\.g\.").unwrap()
});

static ABBREVIATION_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    ABBREVIATIONS
        .iter()
        .map(|(long, short)| {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(long));
            (Regex::new(&pattern).unwrap(), *short)
        })
        .collect()
});

/// Strip `#` and `//` line comments and `/* */` block comments.
pub fn strip_comments(content: &str) -> String {
    let result = RE_HASH_COMMENT.replace_all(content, "${1}");
    let result = RE_SLASH_COMMENT.replace_all(&result, "${1}");
    RE_BLOCK_COMMENT.replace_all(&result, "").into_owned()
}

/// Keep only the first lines that mention an example.
pub fn limit_examples(content: &str) -> String {
    let mut seen = 0;
    content
        .split('\n')
        .filter(|line| {
            if !RE_EXAMPLE.is_match(line) {
                return true;
            }
            seen += 1;
            seen <= MAX_EXAMPLES
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn abbreviate(content: &str) -> String {
    let mut result = content.to_string();
    for (re, short) in ABBREVIATION_RULES.iter() {
        result = re.replace_all(&result, *short).into_owned();
    }
    result
}

pub fn compress(content: &str) -> StrategyOutput {
    let result = strip_comments(content);
    let result = limit_examples(&result);
    StrategyOutput::new(abbreviate(&result), PRESERVATION)
}
