use crate::*;
use crate::catalog::ProtectedSpans;
use crate::strategy_abstraction::DICTIONARY_HEADER;
use std::time::Duration;

fn redundancy_pattern(name: &str) -> &'static catalog::CompiledPattern {
    catalog::redundancy_patterns().iter().find(|p| p.name() == name).unwrap()
}

// ========== Catalog ==========

#[test]
fn test_catalog_sizes() {
    assert_eq!(catalog::preserve_patterns().len(), 6);
    assert_eq!(catalog::redundancy_patterns().len(), 5);
}

#[test]
fn test_preserve_patterns_match() {
    assert!(catalog::matches_preserve("run `cargo test` now"));
    assert!(catalog::matches_preserve("see https://example.com/docs"));
    assert!(catalog::matches_preserve("set MAX_RETRIES first"));
    assert!(catalog::matches_preserve("the ContentAnalyzer type"));
    assert!(catalog::matches_preserve("path is ${HOME}/bin"));
    assert!(!catalog::matches_preserve("plain lowercase prose"));
}

#[test]
fn test_protected_spans_merge() {
    // The constant inside the fence folds into the fence span.
    let text = "a ```X_Y  y``` b";
    let spans = ProtectedSpans::find(text);
    assert_eq!(spans.ranges().len(), 1);
    assert_eq!(spans.texts(text).next(), Some("```X_Y  y```"));
}

#[test]
fn test_inline_code_not_paired_across_fences() {
    let text = "```
a
```

```
b
```";
    let p = &catalog::preserve_patterns()[1];
    assert_eq!(p.name(), "inline_code");
    assert!(p.find_ranges(text).is_empty());
    assert!(!p.is_match(text));
    let spans = ProtectedSpans::find(text);
    assert_eq!(spans.texts(text).collect::<Vec<_>>(), vec!["```\na\n```", "```\nb\n```"]);
}

#[test]
fn test_inline_code_found_between_fences() {
    let text = "```a```
use `x` here
```b``` and `y`";
    let p = &catalog::preserve_patterns()[1];
    let found: Vec<&str> = p.find_ranges(text).into_iter().map(|r| &text[r]).collect();
    assert_eq!(found, vec!["`x`", "`y`"]);
}

#[test]
fn test_protected_spans_straddles() {
    let text = "intro
```
code
```
run `make` now";
    let spans = ProtectedSpans::find(text);
    // "code" sits inside the fence, the inline span fits within its line.
    assert!(spans.straddles(&(10..14)));
    assert!(!spans.straddles(&(19..33)));
    assert!(!spans.straddles(&(0..5)));
}

#[test]
fn test_protected_spans_map_unprotected() {
    let text = "a  `b  c`  d";
    let spans = ProtectedSpans::find(text);
    let out = spans.map_unprotected(text, |seg, _| seg.replace("  ", " "));
    assert_eq!(out, "a `b  c` d");
}

#[test]
fn test_word_self_repeat_detected() {
    let p = redundancy_pattern("word_self_repeat");
    let text = "one two three three four";
    let ranges = p.find_ranges(text);
    assert_eq!(ranges.len(), 1);
    assert_eq!(&text[ranges[0].clone()], "one two three three ");
    let found = p.find_collapsible(text);
    assert_eq!(found[0].keep, "one two three ");
}

#[test]
fn test_word_self_repeat_needs_three_words() {
    let p = redundancy_pattern("word_self_repeat");
    assert!(p.find_ranges("the the cat sat").is_empty());
}

#[test]
fn test_duplicate_fence_detected() {
    let p = redundancy_pattern("duplicate_code_block");
    let text = "```a```\n```a```";
    let found = p.find_collapsible(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].keep, "```a```");
    assert!(p.find_ranges("```a```\n```b```").is_empty());
}

#[test]
fn test_repeated_phrase_keeps_first() {
    let p = redundancy_pattern("repeated_phrase");
    let text = "The same thing The same thing done";
    let out = strategy_redundancy::collapse_repeats(text, p);
    assert_eq!(out, "The same thing done");
}

// ========== Analyzer ==========

#[test]
fn test_analyze_empty() {
    let a = analyze("");
    assert_eq!(a.total_tokens, 0);
    assert_eq!(a.semantic_density, 0.0);
    assert_eq!(a.optimization_potential, 0.0);
    assert!(a.redundant_patterns.is_empty());
}

#[test]
fn test_analyze_token_estimate() {
    assert_eq!(analyze("abcdefghi").total_tokens, 2);
}

#[test]
fn test_analyze_density() {
    assert!((analyzer::semantic_density("a b a") - 0.4).abs() < 1e-9);
}

#[test]
fn test_analyze_repetitive_lines() {
    let line = "This line is definitely long enough";
    let text = format!("{line}\nshort\n{line}\n{line}");
    let a = analyze(&text);
    assert_eq!(a.compressible_sections.len(), 1);
    let s = &a.compressible_sections[0];
    assert_eq!(s.kind, sc_core::SectionKind::RepetitiveLine);
    assert_eq!(s.count, Some(3));
    assert_eq!(s.savings_potential, (line.len() * 2) as f64);
}

#[test]
fn test_analyze_twice_repeated_line_ignored() {
    let line = "This line is definitely long enough";
    let a = analyze(&format!("{line}\n{line}"));
    assert!(a.compressible_sections.is_empty());
}

#[test]
fn test_analyze_large_code_block() {
    let block = format!("```{}```", "x".repeat(1200));
    let a = analyze(&block);
    let s = a
        .compressible_sections
        .iter()
        .find(|s| s.kind == sc_core::SectionKind::LargeCodeBlock)
        .unwrap();
    assert_eq!(s.size, Some(1206));
    assert!((s.savings_potential - 241.2).abs() < 1e-9);
    assert!(s.content.ends_with("..."));
}

#[test]
fn test_analyze_redundant_patterns() {
    let a = analyze("a\n\n\nb");
    assert_eq!(a.redundant_patterns, vec!["\n\n\n".to_string(), "\n\n\n".to_string()]);
}

#[test]
fn test_analyze_potential_capped() {
    let line = "The same words repeated on every single line";
    let text = vec![line; 40].join("\n\n\n\n");
    let a = analyze(&text);
    assert_eq!(a.optimization_potential, 0.5);
}

// ========== Whitespace ==========

#[test]
fn test_ws_blank_lines() {
    let out = strategy_whitespace::compress("a\n\n\n\nb");
    assert_eq!(out.content, "a\n\nb");
    assert_eq!(out.preservation, 1.0);
}

#[test]
fn test_ws_line_endings() {
    assert_eq!(strategy_whitespace::compress("a\r\nb\rc").content, "a\nb\nc");
}

#[test]
fn test_ws_trailing() {
    assert_eq!(strategy_whitespace::compress("a   \nb\t\n").content, "a\nb\n");
}

#[test]
fn test_ws_code_block_untouched() {
    let text = "x    y\n```\na    b   \n```";
    assert_eq!(strategy_whitespace::compress(text).content, "x y\n```\na    b   \n```");
}

#[test]
fn test_ws_inline_code_untouched() {
    let out = strategy_whitespace::compress("use `a   b` here  now");
    assert_eq!(out.content, "use `a   b` here now");
}

#[test]
fn test_ws_idempotent() {
    let samples = [
        "a\n\n\n\nb",
        "  lead\t\ttabs  \r\n\r\n\r\n  more   words   \n",
        "text  ```\ncode   \n\n\n\n```   after  \n\n\n",
        "x \n \n \n y",
        "",
    ];
    for s in samples {
        let once = strategy_whitespace::compress(s).content;
        let twice = strategy_whitespace::compress(&once).content;
        assert_eq!(once, twice, "not idempotent for {s:?}");
    }
}

// ========== Redundancy ==========

#[test]
fn test_redundancy_references() {
    let line = "This configuration value must be set correctly";
    let text = format!(
        "{line}\nalpha one\n{line}\nbeta two\n{line}\ngamma three\n{line}\ndelta four\n{line}"
    );
    let out = strategy_redundancy::compress(&text).unwrap();
    let expected = format!(
        "[REF_1]: {line}\nalpha one\n[REF_1]\nbeta two\n[REF_1]\ngamma three\n[REF_1]\ndelta four\n[REF_1]"
    );
    assert_eq!(out.content, expected);
    assert_eq!(out.preservation, 0.99);
}

#[test]
fn test_redundancy_keeps_indent() {
    let text = "repeat me\n  repeat me\nrepeat me";
    let out = strategy_redundancy::compress(text).unwrap();
    assert_eq!(out.content, "[REF_1]: repeat me\n  [REF_1]\n[REF_1]");
}

#[test]
fn test_redundancy_twice_is_not_enough() {
    let text = "same line\nsame line\nother";
    assert_eq!(strategy_redundancy::compress(text).unwrap().content, text);
}

#[test]
fn test_redundancy_references_lines_with_inline_code() {
    let text = "run `make` now\nrun `make` now\nrun `make` now";
    let out = strategy_redundancy::compress(text).unwrap();
    assert_eq!(out.content, "[REF_1]: run `make` now\n[REF_1]\n[REF_1]");
}

#[test]
fn test_redundancy_references_lines_with_acronyms() {
    let line = "Check the HTTP status code before retrying";
    let text = format!("{line}\nfirst step\n{line}\nsecond step\n{line}\nthird step\n{line}");
    let out = strategy_redundancy::compress(&text).unwrap();
    assert_eq!(
        out.content,
        format!("[REF_1]: {line}\nfirst step\n[REF_1]\nsecond step\n[REF_1]\nthird step\n[REF_1]")
    );
}

#[test]
fn test_redundancy_skips_lines_inside_fences() {
    let text = "```\nrepeat\nrepeat\nrepeat\n```";
    assert_eq!(strategy_redundancy::compress(text).unwrap().content, text);
}

#[test]
fn test_redundancy_duplicate_fences() {
    let text = "```\nx = 1\n```\n```\nx = 1\n```\n```\nx = 1\n```";
    let out = strategy_redundancy::compress(text).unwrap();
    assert_eq!(out.content, "```\nx = 1\n```\n```\nx = 1\n```");
}

#[test]
fn test_redundancy_duplicate_fences_keep_protected_gap() {
    let p = redundancy_pattern("duplicate_code_block");
    let text = "```a```\n```a```";
    assert_eq!(strategy_redundancy::collapse_repeats(text, p), "```a```");

    // The substitution runs from the kept block through the copy.
    let text = "```${a```\n```${a```}";
    assert_eq!(strategy_redundancy::collapse_repeats(text, p), text);
}

#[test]
fn test_redundancy_blank_gap_between_fences_survives() {
    let text = "```\nfn a() {}\n```\n\n```\nfn a() {}\n```\n\n```\nfn b() {}\n```";
    let out = strategy_redundancy::compress(text).unwrap();
    assert_eq!(out.content, "```\nfn a() {}\n```\n\n```\nfn b() {}\n```");
}

#[test]
fn test_redundancy_existing_tags_fail() {
    let err = strategy_redundancy::compress("see [REF_3] above").unwrap_err();
    assert_eq!(err.kind(), "strategy_failure");
}

// ========== Condensation ==========

#[test]
fn test_condense_due_to() {
    let out = strategy_condensation::compress("It stopped due to the fact that it failed.");
    assert!(out.content.contains("because it failed"));
    assert_eq!(out.preservation, 0.95);
}

#[test]
fn test_condense_case_insensitive() {
    let out = strategy_condensation::compress("In order to win, make use of tools.");
    assert_eq!(out.content, "to win, use tools.");
}

#[test]
fn test_condense_fillers() {
    let out = strategy_condensation::compress("This is really very simple.");
    assert_eq!(out.content, "This is simple.");
}

#[test]
fn test_condense_list_items_untouched() {
    let text = "- really important\n* just this\n1. basically that";
    assert_eq!(strategy_condensation::compress(text).content, text);
}

#[test]
fn test_condense_technical_lines_untouched() {
    let text = "Set `really` flag basically";
    assert_eq!(strategy_condensation::compress(text).content, text);
}

#[test]
fn test_condense_code_block_untouched() {
    let text = "```\nreally do it\n```\nreally fine";
    assert_eq!(strategy_condensation::compress(text).content, "```\nreally do it\n```\nfine");
}

#[test]
fn test_condense_no_change_full_preservation() {
    let out = strategy_condensation::compress("nothing to trim here");
    assert_eq!(out.content, "nothing to trim here");
    assert_eq!(out.preservation, 1.0);
}

#[test]
fn test_condense_small_removal_scored() {
    let text = format!("{} just", "word ".repeat(60).trim_end());
    let out = strategy_condensation::compress(&text);
    let removed = text.len() - out.content.len();
    let expected = 1.0 - 2.0 * removed as f64 / text.len() as f64;
    assert!((out.preservation - expected).abs() < 1e-9);
    assert!(out.preservation > 0.95 && out.preservation < 1.0);
}

// ========== Abstraction ==========

fn big_function() -> String {
    let mut f = String::from("def big(x):\n");
    for i in 0..8 {
        f.push_str(&format!("    total_{i} = compute_value(x) + {i}\n"));
    }
    f.push_str("print(\"done\")");
    f
}

fn big_json() -> String {
    let fields: Vec<String> = (0..20).map(|i| format!("\"key_{i:02}\": \"value_{i:02}\"")).collect();
    format!("config = {{{}}}", fields.join(", "))
}

#[test]
fn test_function_blocks() {
    let text = "fn main() {\n    x\n}\nrest";
    assert_eq!(strategy_abstraction::function_blocks(text), vec!["fn main() {\n    x\n}"]);
}

#[test]
fn test_json_blocks_outermost() {
    assert_eq!(strategy_abstraction::json_blocks("a {b {c} d} e {f}"), vec!["{b {c} d}", "{f}"]);
}

#[test]
fn test_abstract_large_function() {
    let text = big_function();
    let out = strategy_abstraction::compress(&text).unwrap();
    assert!(out.content.starts_with("[FUNC_0]\nprint(\"done\")"));
    assert!(out.content.contains(DICTIONARY_HEADER));
    assert!(out.content.contains("[FUNC_0]: def big(x):"));
    assert!(out.content.len() < text.len());
    assert_eq!(out.preservation, 0.98);
}

#[test]
fn test_abstract_small_function_kept() {
    let text = "def small(x):\n    return x\n";
    let out = strategy_abstraction::compress(text).unwrap();
    assert_eq!(out.content, text);
}

#[test]
fn test_abstract_large_json() {
    let text = big_json();
    let out = strategy_abstraction::compress(&text).unwrap();
    assert!(out.content.starts_with("config = [JSON_0]"));
    assert!(out.content.contains("[JSON_0]: {\"key_00\""));
}

#[test]
fn test_abstract_existing_dictionary_fails() {
    let text = format!("body\n\n{DICTIONARY_HEADER}\n");
    assert!(strategy_abstraction::compress(&text).is_err());
}

// ========== Dedup ==========

const PARA_A: &str =
    "The deployment pipeline builds the image and pushes it to the registry before release";
const PARA_B: &str =
    "The deployment pipeline builds the image and pushes it to the registry before launch";

#[test]
fn test_dedup_near_duplicates() {
    let text = format!("{PARA_A}\n\n{PARA_B}\n\nCompletely unrelated closing words here.");
    let out = strategy_dedup::compress(&text);
    assert_eq!(out.content, format!("{PARA_A}\n\nCompletely unrelated closing words here."));
    assert!((out.preservation - 2.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_dedup_similarity() {
    assert!(strategy_dedup::similarity(PARA_A, PARA_B) > 0.8);
    assert_eq!(strategy_dedup::similarity("", "words"), 0.0);
}

#[test]
fn test_dedup_distinct_blocks_kept() {
    let text = "first paragraph here\n\nsecond one differs";
    let out = strategy_dedup::compress(text);
    assert_eq!(out.content, text);
    assert_eq!(out.preservation, 0.99);
}

#[test]
fn test_dedup_empty() {
    let out = strategy_dedup::compress("");
    assert_eq!(out.content, "");
    assert_eq!(out.preservation, 1.0);
}

#[test]
fn test_dedup_does_not_split_code_blocks() {
    let text = "```\na\n\nb\n```\n\nnext";
    assert_eq!(strategy_dedup::split_blocks(text).len(), 2);
}

#[test]
fn test_dedup_keeps_block_with_unique_protected_text() {
    let a = "install the command line tool from the vendor site then run it with the default flags and check the output carefully";
    let b = format!("{a} https://example.com/tool");
    assert!(strategy_dedup::similarity(a, &b) > 0.8);
    let text = format!("{a}\n\n{b}");
    assert_eq!(strategy_dedup::compress(&text).content, text);
}

// ========== Aggressive ==========

#[test]
fn test_aggressive_comments() {
    let out = strategy_aggressive::compress("let x = 1; // set x\n# heading\ncode /* block */ end");
    assert!(out.content.contains("let x = 1;"));
    assert!(!out.content.contains("set x"));
    assert!(!out.content.contains("heading"));
    assert!(!out.content.contains("block"));
    assert_eq!(out.preservation, 0.90);
}

#[test]
fn test_aggressive_keeps_urls() {
    let out = strategy_aggressive::compress("see https://docs.rs/regex for docs");
    assert!(out.content.contains("https://docs.rs/regex"));
}

#[test]
fn test_aggressive_examples_capped() {
    let text = "For example one\nfor instance two\nsuch as three\ne.g. four\nplain";
    let out = strategy_aggressive::compress(text);
    assert_eq!(out.content, "For example one\nfor instance two\nplain");
}

#[test]
fn test_aggressive_abbreviations() {
    let out = strategy_aggressive::compress("The Function takes a parameter");
    assert_eq!(out.content, "The fn takes a param");
}

// ========== Selector ==========

#[test]
fn test_selector_tiers() {
    use StrategyKind::*;
    assert_eq!(select_strategies(0.05, false), vec![WhitespaceOptimization]);
    assert_eq!(select_strategies(0.10, false), vec![WhitespaceOptimization]);
    assert_eq!(select_strategies(0.15, false), vec![WhitespaceOptimization, RedundancyElimination]);
    assert_eq!(select_strategies(0.20, false).len(), 2);
    assert_eq!(
        select_strategies(0.25, false),
        vec![WhitespaceOptimization, RedundancyElimination, SemanticCondensation]
    );
    assert_eq!(select_strategies(0.30, false).len(), 3);
    assert_eq!(select_strategies(0.5, false).last(), Some(&PatternAbstraction));
}

#[test]
fn test_selector_tiers_are_prefixes() {
    let full = select_strategies(1.0, false);
    for t in [0.0, 0.1, 0.2, 0.3] {
        let plan = select_strategies(t, false);
        assert_eq!(plan[..], full[..plan.len()]);
    }
}

#[test]
fn test_selector_aggressive() {
    use StrategyKind::*;
    assert_eq!(
        select_strategies(0.05, true),
        vec![AggressiveCompression, ContextDeduplication, SemanticCondensation, WhitespaceOptimization]
    );
}

#[test]
fn test_strategy_catalog() {
    assert_eq!(STRATEGY_CATALOG.len(), 6);
    let d = strategy::descriptor(StrategyKind::ContextDeduplication);
    assert_eq!(d.name(), "context_deduplication");
    assert_eq!(d.declared_preservation, 0.99);
    assert_eq!(d.declared_compression, 0.30);
    for (d, kind) in STRATEGY_CATALOG.iter().zip(StrategyKind::ALL) {
        assert_eq!(d.kind, kind);
    }
}

// ========== Pipeline ==========

fn pipeline(target: f64, aggressive: bool) -> CompressionPipeline {
    let config = EngineConfig { target_reduction: target, aggressive_mode: aggressive, ..Default::default() };
    CompressionPipeline::from_config(&config)
}

#[test]
fn test_pipeline_stops_at_target() {
    let text = "word                    \n".repeat(10);
    let r = pipeline(0.25, false).run(&text, &Deadline::none()).unwrap();
    assert_eq!(r.method_used, vec![StrategyKind::WhitespaceOptimization]);
    assert_eq!(r.outcome, PipelineOutcome::Completed);
    assert!(r.compression_ratio < 0.75);
    assert_eq!(r.output, "word\n".repeat(10));
}

#[test]
fn test_pipeline_runs_all_when_target_missed() {
    let r = pipeline(0.5, false).run("short plain text", &Deadline::none()).unwrap();
    assert_eq!(r.method_used.len(), 4);
    assert_eq!(r.compression_ratio, 1.0);
    assert_eq!(r.tokens_saved, 0);
}

#[test]
fn test_pipeline_time_budget_truncates() {
    let p = CompressionPipeline::new(select_strategies(0.5, false), 0.5, Duration::ZERO);
    let r = p.run("some   content", &Deadline::none()).unwrap();
    assert!(r.method_used.is_empty());
    assert_eq!(r.outcome, PipelineOutcome::TimedOut);
    assert_eq!(r.output, "some   content");
    assert_eq!(r.preservation_score, 1.0);
}

#[test]
fn test_pipeline_strategy_failure_skipped() {
    let r = pipeline(0.15, false).run("alpha [REF_1] beta gamma delta", &Deadline::none()).unwrap();
    assert_eq!(r.method_used, vec![StrategyKind::WhitespaceOptimization]);
    assert_eq!(r.skipped, vec![StrategyKind::RedundancyElimination]);
    assert_eq!(r.outcome, PipelineOutcome::PartiallyCompleted);
}

#[test]
fn test_pipeline_abstraction_failure_skipped() {
    let text = format!("plain text body\n\n{DICTIONARY_HEADER}\n[FUNC_0]: def x");
    let r = pipeline(0.9, false).run(&text, &Deadline::none()).unwrap();
    assert!(!r.method_used.contains(&StrategyKind::PatternAbstraction));
    assert_eq!(r.skipped, vec![StrategyKind::PatternAbstraction]);
}

#[test]
fn test_pipeline_inflation_discarded() {
    let r = pipeline(0.15, false).run("a\na\na", &Deadline::none()).unwrap();
    assert_eq!(r.output, "a\na\na");
    assert_eq!(r.skipped, vec![StrategyKind::RedundancyElimination]);
    assert!(r.compression_ratio <= 1.0);
}

#[test]
fn test_pipeline_emptied_output_discarded() {
    let r = pipeline(0.9, true).run("# just a comment", &Deadline::none()).unwrap();
    assert!(r.skipped.contains(&StrategyKind::AggressiveCompression));
    assert!(!r.method_used.contains(&StrategyKind::AggressiveCompression));
    assert!(!r.output.is_empty());
    assert!(r.compression_ratio > 0.0 && r.compression_ratio <= 1.0);
    assert_eq!(r.outcome, PipelineOutcome::PartiallyCompleted);
}

#[test]
fn test_rejection_check() {
    assert_eq!(Rejection::check("abc", "abcd"), Some(Rejection::Grew));
    assert_eq!(Rejection::check("abc", ""), Some(Rejection::Emptied));
    assert_eq!(Rejection::check("abc", "ab"), None);
    assert_eq!(Rejection::check("", ""), None);
    assert_eq!(Rejection::Grew.to_string(), "output grew");
    assert_eq!(Rejection::Emptied.to_string(), "output was empty");
}

#[test]
fn test_pipeline_deadline_aborts() {
    let err = pipeline(0.5, false).run("content", &Deadline::after(Duration::ZERO)).unwrap_err();
    assert_eq!(err.kind(), "timeout");
}

#[test]
fn test_pipeline_empty_content() {
    let r = pipeline(0.25, false).run("", &Deadline::none()).unwrap();
    assert_eq!(r.original_size, 0);
    assert_eq!(r.compression_ratio, 1.0);
}

#[test]
fn test_pipeline_content_hash() {
    let r = pipeline(0.1, false).run("hello", &Deadline::none()).unwrap();
    assert_eq!(r.content_hash, "5d41402abc4b2a76b9719d911017c592");
}

#[test]
fn test_pipeline_preservation_non_increasing() {
    let text = format!(
        "{PARA_A}\n\n{PARA_B}\n\n// a comment\nfor example this\nIt failed due to the fact that it was really broken."
    );
    let plan = select_strategies(0.0, true);
    let mut previous = 1.0;
    for n in 1..=plan.len() {
        let p = CompressionPipeline::new(plan[..n].to_vec(), 1.0, Duration::from_secs(30));
        let r = p.run(&text, &Deadline::none()).unwrap();
        assert!(r.preservation_score <= previous);
        assert!((0.0..=1.0).contains(&r.preservation_score));
        previous = r.preservation_score;
    }
}

// ========== Properties ==========

mod properties {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const FRAGMENTS: &[&str] = &[
        "The service restarts   when the config changes.",
        "```\nfn main() {\n    println!(\"hi\");   \n}\n```",
        "Run `cargo   build` before testing.",
        "Docs live at https://example.com/guide?x=1 today.",
        "Set ${BUILD_DIR} and MAX_WORKERS accordingly.",
        "The ContextWindow type is really quite essential.",
        "In order to proceed, make use of the cache.",
        "This configuration value must be set correctly",
        "This configuration value must be set correctly",
        "\n\n\n",
        "   \t  ",
        "- just a list item",
        "The same step The same step ends here.",
    ];

    fn random_doc(rng: &mut StdRng) -> String {
        let n = rng.gen_range(3..15);
        let mut parts = vec!["Intro paragraph for the generated document."];
        parts.extend((0..n).map(|_| FRAGMENTS[rng.gen_range(0..FRAGMENTS.len())]));
        parts.join(if rng.gen_bool(0.5) { "\n" } else { "\n\n" })
    }

    fn preserved_texts(text: &str) -> Vec<String> {
        catalog::preserve_patterns()
            .iter()
            .flat_map(|p| p.find_ranges(text).into_iter().map(|r| text[r].to_string()).collect::<Vec<_>>())
            .collect()
    }

    #[test]
    fn test_preserve_patterns_survive_lossless_strategies() {
        let mut rng = StdRng::seed_from_u64(7);
        let kinds = [
            StrategyKind::WhitespaceOptimization,
            StrategyKind::RedundancyElimination,
            StrategyKind::SemanticCondensation,
            StrategyKind::ContextDeduplication,
        ];
        for _ in 0..200 {
            let doc = random_doc(&mut rng);
            let protected = preserved_texts(&doc);
            for kind in kinds {
                let out = strategy::apply(kind, &doc).unwrap();
                for t in &protected {
                    assert!(out.content.contains(t.as_str()), "{kind} lost {t:?} from {doc:?}");
                }
            }
        }
    }

    #[test]
    fn test_whitespace_idempotent_random() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let doc = random_doc(&mut rng);
            let once = strategy_whitespace::compress(&doc).content;
            assert_eq!(strategy_whitespace::compress(&once).content, once);
        }
    }

    #[test]
    fn test_ratio_and_preservation_bounds() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..200 {
            let doc = random_doc(&mut rng);
            let target = rng.gen_range(0.0..0.6);
            let aggressive = rng.gen_bool(0.3);
            let r = pipeline(target, aggressive).run(&doc, &Deadline::none()).unwrap();
            assert!(r.compression_ratio > 0.0 && r.compression_ratio <= 1.0);
            assert!((0.0..=1.0).contains(&r.preservation_score));
        }
    }
}
