//! Chapter assembler: turn the boundary list into finished documents.
//!
//! Ranges sharing a key are merged in discovery order, so a chapter
//! interrupted by another tagged region and resumed later still comes out
//! as one document.

use crate::scan::{self, Boundary, MarkerRule};
use crate::tables::BookLayout;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::PathBuf;

/// Printed part divider, e.g. "PART II". The part group labels
/// themselves come from the layout table.
static PART_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PART\s+[IVX]+").expect("part heading pattern"));

/// A finished document, ready for the file sink.
#[derive(Debug, Clone)]
pub struct Document {
    pub key: String,
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// Title block, blank line, merged content, trailing line break.
    pub body: String,
    /// Input lines covered by the merged ranges.
    pub source_lines: usize,
    /// Number of ranges merged into this document.
    pub ranges: usize,
}

/// Assemble documents from the scanned boundaries, one per distinct key
/// in order of first appearance. Keys whose merged content normalizes to
/// nothing are dropped silently; keys without an output mapping are
/// dropped with a warning.
pub fn assemble(lines: &[&str], boundaries: &[Boundary], layout: &BookLayout) -> Vec<Document> {
    let rules = scan::marker_rules(layout);

    let mut groups: Vec<(String, Vec<&Boundary>)> = Vec::new();
    for boundary in boundaries {
        match groups.iter_mut().find(|(key, _)| key == &boundary.key) {
            Some((_, ranges)) => ranges.push(boundary),
            None => groups.push((boundary.key.clone(), vec![boundary])),
        }
    }

    let mut documents = Vec::new();
    for (key, ranges) in groups {
        let is_chapter = scan::chapter_ordinal(&key).is_some();
        let blocks: Vec<String> = ranges
            .iter()
            .map(|b| range_content(lines, b, is_chapter, &rules, layout))
            .filter(|content| !content.is_empty())
            .collect();
        if blocks.is_empty() {
            log::debug!("section {key} is empty after cleanup, dropping");
            continue;
        }
        let content = blocks.join("\n\n");

        let source_lines: usize = ranges.iter().map(|b| b.end - b.start).sum();
        let Some(path) = layout.document_path(&key) else {
            log::warn!("no output mapping for section {key}, dropping {source_lines} lines");
            continue;
        };

        let title = layout.title_block(&key);
        documents.push(Document {
            body: format!("{title}\n\n{content}\n"),
            key,
            path,
            source_lines,
            ranges: ranges.len(),
        });
    }
    documents
}

/// Slice one range, drop its heading noise, and normalize what is left.
fn range_content(
    lines: &[&str],
    boundary: &Boundary,
    is_chapter: bool,
    rules: &[MarkerRule],
    layout: &BookLayout,
) -> String {
    let kept: Vec<&str> = lines[boundary.start..boundary.end]
        .iter()
        .copied()
        .filter(|line| !is_heading_noise(line.trim(), is_chapter, rules, layout))
        .collect();
    textscrub::normalize_block(&kept.join("\n"))
}

/// Lines that belong to the section's framing rather than its content:
/// the marker heading itself, the chapter's printed title line, and part
/// group labels. Checked in that order, first hit wins.
fn is_heading_noise(
    line: &str,
    is_chapter: bool,
    rules: &[MarkerRule],
    layout: &BookLayout,
) -> bool {
    if scan::match_marker(line, rules).is_some() {
        return true;
    }
    // The printed title line is only stripped inside numbered sections,
    // so front-matter prose that happens to quote a title survives.
    if is_chapter && layout.is_chapter_title(line) {
        return true;
    }
    PART_HEADING.is_match(line) || layout.is_part_label(line)
}
