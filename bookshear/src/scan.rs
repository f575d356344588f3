//! Boundary scanner: one linear pass over the line sequence, emitting an
//! ordered list of section ranges.

use crate::tables::BookLayout;
use once_cell::sync::Lazy;
use regex::Regex;

/// Uppercase chapter heading ("CHAPTER 12"). Case matters: the printed
/// running header is "Chapter 12 - The JIT 243" and must not open a
/// section.
static CHAPTER_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^CHAPTER\s+(\d+)").expect("chapter heading pattern"));

/// A discovered section range. `end` is exclusive. Ranges from one scan
/// never overlap and are emitted in non-decreasing start order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Boundary {
    pub key: String,
    pub start: usize,
    pub end: usize,
}

/// One entry in the ordered marker rule list. Rules are tried top to
/// bottom and the first match decides the section key, so the numbered
/// rule keeps priority over the named ones.
pub struct MarkerRule {
    pattern: Regex,
    key: MarkerKey,
}

enum MarkerKey {
    /// Key derived from the captured ordinal: `chapter-<nn>`.
    Chapter,
    /// A fixed key from the layout table.
    Named(String),
}

/// Build the rule list for a layout: the chapter heading rule first, then
/// one whole-line, case-insensitive rule per named section.
pub fn marker_rules(layout: &BookLayout) -> Vec<MarkerRule> {
    let mut rules = vec![MarkerRule {
        pattern: CHAPTER_HEADING.clone(),
        key: MarkerKey::Chapter,
    }];
    for named in &layout.named_sections {
        rules.push(MarkerRule {
            pattern: named_heading_pattern(&named.heading),
            key: MarkerKey::Named(named.key.clone()),
        });
    }
    rules
}

/// "In Closing" -> `(?i)^In\s+Closing$`.
fn named_heading_pattern(heading: &str) -> Regex {
    let words: Vec<String> = heading.split_whitespace().map(|w| regex::escape(w)).collect();
    let pattern = format!(r"(?i)^{}$", words.join(r"\s+"));
    Regex::new(&pattern).expect("named heading pattern")
}

/// Test a (trimmed) line against the rule list; the first matching rule
/// yields the section key.
pub fn match_marker(line: &str, rules: &[MarkerRule]) -> Option<String> {
    for rule in rules {
        let Some(caps) = rule.pattern.captures(line) else {
            continue;
        };
        match &rule.key {
            MarkerKey::Chapter => {
                // A digit run too long for u32 is page noise, not a chapter.
                if let Ok(ordinal) = caps[1].parse::<u32>() {
                    return Some(format!("chapter-{ordinal:02}"));
                }
            }
            MarkerKey::Named(key) => return Some(key.clone()),
        }
    }
    None
}

/// Ordinal carried by a derived chapter key, if it is one.
pub fn chapter_ordinal(key: &str) -> Option<u32> {
    key.strip_prefix("chapter-")?.parse().ok()
}

enum ScanState {
    Idle,
    Open { key: String, start: usize },
}

/// Scan the line sequence for section markers.
///
/// Lines before the first marker belong to no section. Each marker closes
/// the open range (if any) at its own index and opens a new one; an open
/// range at end of input is closed at the sequence length.
pub fn scan_lines(lines: &[&str], layout: &BookLayout) -> Vec<Boundary> {
    let rules = marker_rules(layout);
    let mut boundaries = Vec::new();
    let mut state = ScanState::Idle;

    for (index, line) in lines.iter().enumerate() {
        let Some(key) = match_marker(line.trim(), &rules) else {
            continue;
        };
        if let ScanState::Open { key: open, start } = std::mem::replace(&mut state, ScanState::Idle)
        {
            boundaries.push(Boundary { key: open, start, end: index });
        }
        log::debug!("section marker at line {index}: {key}");
        state = ScanState::Open { key, start: index };
    }

    if let ScanState::Open { key, start } = state {
        boundaries.push(Boundary { key, start, end: lines.len() });
    }

    boundaries
}
