//! Semantic condensation: verbose phrases become concise ones and filler
//! words are dropped from prose lines.

use regex::Regex;
use std::sync::LazyLock;

use crate::catalog::{matches_preserve, ProtectedSpans};
use crate::strategy::StrategyOutput;

/// Lower bound of the measured preservation factor.
const MIN_PRESERVATION: f64 = 0.95;

/// Applied in order, case-insensitively.
pub const CONDENSATIONS: &[(&str, &str)] = &[
    (r"\b(?:in order to|so as to)\b", "to"),
    (r"\b(?:due to the fact that|because of the fact that)\b", "because"),
    (r"\b(?:at this point in time|at the present time)\b", "now"),
    (r"\bfor the purpose of\b", "for"),
    (r"\b(?:with regard to|with respect to|in relation to)\b", "regarding"),
    (r"\b(?:it should be noted that|it is important to note that)\b", "note:"),
    (r"\bas a result of\b", "from"),
    (r"\bin the event that\b", "if"),
    (r"\bmake use of\b", "use"),
    (r"\bprovide assistance to\b", "help"),
];

pub const FILLER_WORDS: &[&str] = &[
    "actually", "basically", "essentially", "literally", "obviously", "really", "very",
    "quite", "rather", "pretty", "just", "simply", "merely", "only",
];

static CONDENSATION_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CONDENSATIONS
        .iter()
        .map(|(pattern, short)| (Regex::new(&format!("(?i){pattern}")).unwrap(), *short))
        .collect()
});

static RE_FILLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", FILLER_WORDS.join("|"))).unwrap()
});
static RE_LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:[*-]|\d+\.)").unwrap());
static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]{2,}").unwrap());

/// Apply the verbose→concise table outside protected spans.
pub fn condense_phrases(content: &str) -> String {
    let spans = ProtectedSpans::find(content);
    spans.map_unprotected(content, |segment, _| {
        let mut result = segment.to_string();
        for (re, short) in CONDENSATION_RULES.iter() {
            result = re.replace_all(&result, *short).into_owned();
        }
        result
    })
}

fn is_list_item(line: &str) -> bool {
    RE_LIST_ITEM.is_match(line.trim_start())
}

/// Drop filler words from one prose line.
pub fn strip_fillers(line: &str) -> String {
    let stripped = RE_FILLER.replace_all(line, "");
    if stripped == line {
        return line.to_string();
    }
    let collapsed = RE_MULTI_SPACE.replace_all(&stripped, " ");
    let collapsed = collapsed.trim_end();
    if line.starts_with(char::is_whitespace) {
        collapsed.to_string()
    } else {
        collapsed.trim_start().to_string()
    }
}

pub fn compress(content: &str) -> StrategyOutput {
    let original_chars = content.chars().count();
    if original_chars == 0 {
        return StrategyOutput::new(String::new(), 1.0);
    }

    let condensed = condense_phrases(content);
    let spans = ProtectedSpans::find(&condensed);

    let mut offset = 0;
    let mut lines = Vec::new();
    for line in condensed.split('\n') {
        let range = offset..offset + line.len();
        offset = range.end + 1;
        let technical = spans.overlaps(&range) || matches_preserve(line);
        if technical || is_list_item(line) {
            lines.push(line.to_string());
        } else {
            lines.push(strip_fillers(line));
        }
    }
    let result = lines.join("\n");

    let removed = original_chars as f64 - result.chars().count() as f64;
    let preservation = (1.0 - 2.0 * removed / original_chars as f64).clamp(MIN_PRESERVATION, 1.0);
    StrategyOutput::new(result, preservation)
}
