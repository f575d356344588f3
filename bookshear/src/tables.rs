//! Static presentation layout: canonical titles, slugs, and output paths.
//!
//! The layout is data, not logic: a TOML document embedded at compile
//! time and deserialized once. Section keys discovered by the scanner are
//! resolved against it; a key the layout does not know gets no output
//! path and is dropped upstream.

use crate::scan::chapter_ordinal;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::path::PathBuf;

static LAYOUT: Lazy<BookLayout> = Lazy::new(|| {
    toml::from_str(include_str!("../front-line-php.toml")).expect("embedded book layout should parse")
});

/// The layout for the one book this tool understands.
pub fn book_layout() -> &'static BookLayout {
    &LAYOUT
}

/// Presentation layout for one book.
#[derive(Debug, Deserialize)]
pub struct BookLayout {
    /// Output file extension, without the dot.
    pub extension: String,
    /// Fixed named sections (foreword-like front and back matter).
    #[serde(rename = "named")]
    pub named_sections: Vec<NamedSection>,
    /// Numbered chapters with display titles and slugs.
    #[serde(rename = "chapter")]
    pub chapters: Vec<ChapterEntry>,
    /// Part buckets grouping chapter ordinals into top-level directories.
    #[serde(rename = "part")]
    pub parts: Vec<PartEntry>,
}

#[derive(Debug, Deserialize)]
pub struct NamedSection {
    /// Logical key, e.g. "foreword".
    pub key: String,
    /// The heading line as printed in the book.
    pub heading: String,
    /// Output file name.
    pub file: String,
}

#[derive(Debug, Deserialize)]
pub struct ChapterEntry {
    pub ordinal: u32,
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct PartEntry {
    /// Top-level output directory for this part.
    pub dir: String,
    /// The part's printed group label, e.g. "PHP, the Language".
    pub label: String,
    /// Highest chapter ordinal belonging to this part.
    pub through: u32,
}

impl BookLayout {
    pub fn named(&self, key: &str) -> Option<&NamedSection> {
        self.named_sections.iter().find(|n| n.key == key)
    }

    pub fn chapter(&self, ordinal: u32) -> Option<&ChapterEntry> {
        self.chapters.iter().find(|c| c.ordinal == ordinal)
    }

    /// Is this (trimmed) line exactly one of the known chapter titles?
    pub fn is_chapter_title(&self, line: &str) -> bool {
        self.chapters.iter().any(|c| c.title.eq_ignore_ascii_case(line))
    }

    /// Does this (trimmed) line start with one of the printed part labels?
    pub fn is_part_label(&self, line: &str) -> bool {
        let lower = line.to_lowercase();
        self.parts.iter().any(|p| lower.starts_with(&p.label.to_lowercase()))
    }

    /// Output directory for a chapter ordinal. Ordinals past the last
    /// threshold land in the final part.
    pub fn part_dir(&self, ordinal: u32) -> Option<&str> {
        self.parts
            .iter()
            .find(|p| ordinal <= p.through)
            .or_else(|| self.parts.last())
            .map(|p| p.dir.as_str())
    }

    /// The canonical markdown title block for a key.
    pub fn title_block(&self, key: &str) -> String {
        if let Some(named) = self.named(key) {
            return format!("# {}", named.heading.to_uppercase());
        }
        if let Some(ordinal) = chapter_ordinal(key) {
            return match self.chapter(ordinal) {
                Some(entry) => {
                    format!("# CHAPTER {:02}\n\n## {}", ordinal, entry.title.to_uppercase())
                }
                None => format!("# CHAPTER {:02}", ordinal),
            };
        }
        format!("# {}", key.to_uppercase())
    }

    /// Resolve the relative output path for a key, or `None` when the key
    /// has no destination (the caller drops it).
    pub fn document_path(&self, key: &str) -> Option<PathBuf> {
        if let Some(named) = self.named(key) {
            return Some(PathBuf::from(&named.file));
        }
        let ordinal = chapter_ordinal(key)?;
        let dir = self.part_dir(ordinal)?;
        let slug = self
            .chapter(ordinal)
            .map(|c| c.slug.clone())
            .unwrap_or_else(|| format!("chapter-{ordinal}"));
        Some(PathBuf::from(dir).join(format!("chapter-{:02}-{}.{}", ordinal, slug, self.extension)))
    }
}
