//! Preserve and redundancy pattern catalogs.
//!
//! Both catalogs are static tables of `(name, matcher, purpose, category)`.
//! Preserve patterns mark spans no lossless strategy may touch. Redundancy
//! patterns drive the analyzer and, for the phrase-repeat category, the
//! redundancy elimination strategy.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternCategory {
    /// Content that must survive verbatim.
    Preserve,
    /// Runs of blank lines.
    BlankLines,
    /// Runs of whitespace characters.
    Whitespace,
    /// Repeated phrases, words or blocks. Collapsible to one occurrence.
    PhraseRepeat,
}

/// How a pattern finds its matches.
///
/// The `regex` crate has no back-references, so the two self-repeat
/// patterns are hand-written detectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    Regex(&'static str),
    /// A regex searched only in the text between fenced code blocks.
    OutsideFences(&'static str),
    /// A run of three or more words ending in an immediately doubled word.
    WordSelfRepeat,
    /// A fenced code block directly followed by an identical block.
    DuplicateFence,
}

#[derive(Debug, Clone, Copy)]
pub struct PatternSpec {
    pub name: &'static str,
    pub matcher: Matcher,
    pub purpose: &'static str,
    pub category: PatternCategory,
}

const FENCED_CODE: &str = r"```[^`]*```";
const SAME_PHRASE_UNIT: &str = r"The\s+same\s+\w+\s+";
const WORD_TOKEN: &str = r"\w+\s+";

pub const PRESERVE_PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        name: "fenced_code",
        matcher: Matcher::Regex(FENCED_CODE),
        purpose: "Code blocks",
        category: PatternCategory::Preserve,
    },
    PatternSpec {
        name: "inline_code",
        matcher: Matcher::OutsideFences(r"`[^`]+`"),
        purpose: "Inline code",
        category: PatternCategory::Preserve,
    },
    PatternSpec {
        name: "url",
        matcher: Matcher::Regex(r"https?://[^\s]+"),
        purpose: "URLs",
        category: PatternCategory::Preserve,
    },
    PatternSpec {
        name: "constant",
        matcher: Matcher::Regex(r"[A-Z][A-Z_]+[A-Z]"),
        purpose: "Constants",
        category: PatternCategory::Preserve,
    },
    PatternSpec {
        name: "camel_case",
        matcher: Matcher::Regex(r"\b[A-Z][a-z]+[A-Z][A-Za-z]*\b"),
        purpose: "CamelCase identifiers",
        category: PatternCategory::Preserve,
    },
    PatternSpec {
        name: "variable_substitution",
        matcher: Matcher::Regex(r"\$\{[^}]+\}"),
        purpose: "Variable substitutions",
        category: PatternCategory::Preserve,
    },
];

pub const REDUNDANCY_PATTERNS: &[PatternSpec] = &[
    PatternSpec {
        name: "blank_line_run",
        matcher: Matcher::Regex(r"\n\s*\n\s*\n+"),
        purpose: "Multiple empty lines",
        category: PatternCategory::BlankLines,
    },
    PatternSpec {
        name: "whitespace_run",
        matcher: Matcher::Regex(r"\s\s+"),
        purpose: "Multiple consecutive spaces",
        category: PatternCategory::Whitespace,
    },
    PatternSpec {
        name: "repeated_phrase",
        matcher: Matcher::Regex(r"(?:The\s+same\s+\w+\s+){2,}"),
        purpose: "Repetitive phrases",
        category: PatternCategory::PhraseRepeat,
    },
    PatternSpec {
        name: "word_self_repeat",
        matcher: Matcher::WordSelfRepeat,
        purpose: "Word repetitions",
        category: PatternCategory::PhraseRepeat,
    },
    PatternSpec {
        name: "duplicate_code_block",
        matcher: Matcher::DuplicateFence,
        purpose: "Duplicate code blocks",
        category: PatternCategory::PhraseRepeat,
    },
];

/// A catalog entry with its regex compiled.
pub struct CompiledPattern {
    pub spec: &'static PatternSpec,
    regex: Option<Regex>,
}

fn compile(specs: &'static [PatternSpec]) -> Vec<CompiledPattern> {
    specs
        .iter()
        .map(|spec| CompiledPattern {
            spec,
            regex: match spec.matcher {
                Matcher::Regex(p) | Matcher::OutsideFences(p) => Some(Regex::new(p).unwrap()),
                _ => None,
            },
        })
        .collect()
}

static PRESERVE: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| compile(PRESERVE_PATTERNS));
static REDUNDANCY: LazyLock<Vec<CompiledPattern>> = LazyLock::new(|| compile(REDUNDANCY_PATTERNS));

static RE_FENCED: LazyLock<Regex> = LazyLock::new(|| Regex::new(FENCED_CODE).unwrap());
static RE_SAME_UNIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(SAME_PHRASE_UNIT).unwrap());
static RE_WORD_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(WORD_TOKEN).unwrap());

pub fn preserve_patterns() -> &'static [CompiledPattern] {
    &PRESERVE
}

pub fn redundancy_patterns() -> &'static [CompiledPattern] {
    &REDUNDANCY
}

/// The fenced code block regex shared by several strategies.
pub fn fenced_code() -> &'static Regex {
    &RE_FENCED
}

impl CompiledPattern {
    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// Byte ranges of every non-overlapping match, in order.
    pub fn find_ranges(&self, text: &str) -> Vec<Range<usize>> {
        match (&self.regex, self.spec.matcher) {
            (Some(re), Matcher::Regex(_)) => re.find_iter(text).map(|m| m.range()).collect(),
            (Some(re), Matcher::OutsideFences(_)) => find_outside_fences(re, text),
            (_, Matcher::WordSelfRepeat) => {
                word_self_repeats(text).into_iter().map(|r| r.span).collect()
            }
            (_, Matcher::DuplicateFence) => {
                duplicate_fences(text).into_iter().map(|r| r.span).collect()
            }
            (None, _) => Vec::new(),
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        match (&self.regex, self.spec.matcher) {
            (Some(re), Matcher::Regex(_)) => re.is_match(text),
            _ => !self.find_ranges(text).is_empty(),
        }
    }

    /// Matches paired with their single-occurrence rewrite. Only the
    /// phrase-repeat category has one; every other entry yields nothing.
    pub fn find_collapsible(&self, text: &str) -> Vec<RepeatMatch> {
        match self.spec.matcher {
            Matcher::WordSelfRepeat => word_self_repeats(text),
            Matcher::DuplicateFence => duplicate_fences(text),
            Matcher::Regex(_) if self.spec.category == PatternCategory::PhraseRepeat => {
                let Some(re) = &self.regex else { return Vec::new() };
                re.find_iter(text)
                    .filter_map(|m| {
                        let first = RE_SAME_UNIT.find(m.as_str())?;
                        Some(RepeatMatch { span: m.range(), keep: first.as_str().to_string() })
                    })
                    .collect()
            }
            Matcher::Regex(_) | Matcher::OutsideFences(_) => Vec::new(),
        }
    }
}

/// Matches of `re` in the gaps around fenced blocks, so a backtick pair can
/// never open in one fence and close in the next.
fn find_outside_fences(re: &Regex, text: &str) -> Vec<Range<usize>> {
    let fences = RE_FENCED
        .find_iter(text)
        .map(|m| m.range())
        .chain(std::iter::once(text.len()..text.len()));

    let mut out = Vec::new();
    let mut cursor = 0;
    for fence in fences {
        let gap = &text[cursor..fence.start];
        out.extend(re.find_iter(gap).map(|m| cursor + m.start()..cursor + m.end()));
        cursor = fence.end;
    }
    out
}

/// A repeated span and the text that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatMatch {
    pub span: Range<usize>,
    pub keep: String,
}

struct WordToken {
    start: usize,
    word_end: usize,
    end: usize,
}

fn same_token(text: &str, a: &WordToken, b: &WordToken) -> bool {
    text[a.start..a.word_end] == text[b.start..b.word_end]
        && text[b.word_end..b.end].starts_with(&text[a.word_end..a.end])
}

/// Chains of adjacent `word whitespace` tokens; a chain of at least three
/// tokens whose last pair is doubled collapses by dropping the copy.
fn word_self_repeats(text: &str) -> Vec<RepeatMatch> {
    let tokens: Vec<WordToken> = RE_WORD_TOKEN
        .find_iter(text)
        .map(|m| {
            let word_len = m.as_str().trim_end().len();
            WordToken { start: m.start(), word_end: m.start() + word_len, end: m.end() }
        })
        .collect();

    let mut out = Vec::new();
    let mut chain_start = 0;
    while chain_start < tokens.len() {
        let mut chain_end = chain_start;
        while chain_end + 1 < tokens.len() && tokens[chain_end + 1].start == tokens[chain_end].end {
            chain_end += 1;
        }

        let doubled = (chain_start + 2..chain_end)
            .rev()
            .find(|&k| same_token(text, &tokens[k], &tokens[k + 1]));
        if let Some(k) = doubled {
            let first = &tokens[k];
            let copy = &tokens[k + 1];
            let copy_end = copy.word_end + (first.end - first.word_end);
            out.push(RepeatMatch {
                span: tokens[chain_start].start..copy_end,
                keep: text[tokens[chain_start].start..copy.start].to_string(),
            });
        }
        chain_start = chain_end + 1;
    }
    out
}

fn duplicate_fences(text: &str) -> Vec<RepeatMatch> {
    let fences: Vec<Range<usize>> = RE_FENCED.find_iter(text).map(|m| m.range()).collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i + 1 < fences.len() {
        let (a, b) = (&fences[i], &fences[i + 1]);
        let gap_is_blank = text[a.end..b.start].chars().all(char::is_whitespace);
        if gap_is_blank && text[a.clone()] == text[b.clone()] {
            out.push(RepeatMatch { span: a.start..b.end, keep: text[a.clone()].to_string() });
            i += 2;
        } else {
            i += 1;
        }
    }
    out
}

/// Merged byte ranges covered by any preserve pattern.
#[derive(Debug, Clone, Default)]
pub struct ProtectedSpans {
    spans: Vec<Range<usize>>,
}

impl ProtectedSpans {
    pub fn find(text: &str) -> Self {
        let mut all: Vec<Range<usize>> = preserve_patterns()
            .iter()
            .flat_map(|p| p.find_ranges(text))
            .collect();
        all.sort_by_key(|r| (r.start, r.end));

        let mut spans: Vec<Range<usize>> = Vec::with_capacity(all.len());
        for r in all {
            match spans.last_mut() {
                Some(last) if r.start < last.end => last.end = last.end.max(r.end),
                _ => spans.push(r),
            }
        }
        Self { spans }
    }

    pub fn ranges(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.spans.iter().any(|s| s.start < range.end && range.start < s.end)
    }

    /// Whether a span overlaps `range` and also reaches outside it, such as
    /// a fenced block running across several lines.
    pub fn straddles(&self, range: &Range<usize>) -> bool {
        self.spans.iter().any(|s| {
            s.start < range.end && range.start < s.end && (s.start < range.start || s.end > range.end)
        })
    }

    /// The protected substrings themselves.
    pub fn texts<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.spans.iter().map(move |r| &text[r.clone()])
    }

    /// Rebuild `text`, passing every unprotected segment through `f` and
    /// copying protected spans verbatim. `f` also learns whether the segment
    /// runs to the end of the text.
    pub fn map_unprotected(&self, text: &str, mut f: impl FnMut(&str, bool) -> String) -> String {
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for span in &self.spans {
            if span.start > cursor {
                out.push_str(&f(&text[cursor..span.start], false));
            }
            out.push_str(&text[span.clone()]);
            cursor = span.end;
        }
        if cursor < text.len() {
            out.push_str(&f(&text[cursor..], true));
        }
        out
    }
}

/// Whether any preserve pattern matches the line.
pub fn matches_preserve(line: &str) -> bool {
    preserve_patterns().iter().any(|p| p.is_match(line))
}
