//! Cleanup passes for PDF-extracted prose.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Word fragment split by a hyphenated line break ("auto-\nmation").
/// Horizontal whitespace only: a hyphen at a paragraph boundary stays.
static HYPHEN_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)-[ \t]*\n[ \t]*(\w+)").expect("hyphen break pattern"));

/// Word split by a plain wrapped line ("hello \nworld"). The trailing
/// whitespace before the break is required, so an ordinary line ending
/// flush with its last word is left alone.
static SOFT_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w+)[ \t]+\n[ \t]*(\w+)").expect("soft break pattern"));

/// A run of three or more consecutive line breaks.
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("blank run pattern"));

/// A line that is nothing but a printed page number.
static PAGE_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*$").expect("page number pattern"));

/// The printed running footer: page number plus the book title.
static RUNNING_FOOTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\d+\s+Front Line PHP\s*").expect("running footer pattern"));

/// The printed running header, e.g. "Chapter 12 - The JIT 243". Mixed
/// case and a trailing page number distinguish it from the uppercase
/// section heading.
static RUNNING_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*Chapter\s+\d+\s*-\s*.+\s\d+\s*$").expect("header pattern"));

/// Whitespace between a line break and a code marker (backtick or `$`).
static CODE_MARGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*([`$])").expect("code margin pattern"));

/// Curly quotation marks and their ASCII equivalents. Em dashes are
/// already canonical and left alone.
const CANONICAL_QUOTES: &[(char, char)] = &[
    ('\u{201c}', '"'),  // Left double quote
    ('\u{201d}', '"'),  // Right double quote
    ('\u{2018}', '\''), // Left single quote
    ('\u{2019}', '\''), // Right single quote
];

/// Run the full cleanup pipeline over one content block.
///
/// Pass order is load-bearing: hyphen joins must run before soft-line
/// joins (otherwise a hyphenated break picks up a stray space), and both
/// run before blank-line collapsing.
pub fn normalize_block(text: &str) -> String {
    let text = join_broken_words(text);
    let text = collapse_blank_lines(&text);
    let text = strip_page_noise(&text);
    let text = tighten_code_margins(&text);
    let text = canonicalize_punctuation(&text);
    text.trim().to_string()
}

/// Rejoin words the page layout broke across lines: first hyphenated
/// splits ("auto-\nmation" -> "automation"), then soft wraps
/// ("hello \nworld" -> "hello world").
pub fn join_broken_words(text: &str) -> String {
    let joined = HYPHEN_BREAK.replace_all(text, "${1}${2}");
    SOFT_BREAK.replace_all(&joined, "${1} ${2}").into_owned()
}

/// Collapse runs of blank lines: four or more breaks settle at three
/// (two blank lines), exactly three settle at two (one blank line),
/// shorter runs are untouched.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_RUN
        .replace_all(text, |caps: &Captures| {
            if caps[0].len() >= 4 { "\n\n\n" } else { "\n\n" }
        })
        .into_owned()
}

/// Flatten every blank-line run to a single blank line. Used by the bulk
/// sweep, where documents have already been through `normalize_block` and
/// the pass must be a fixpoint.
pub fn flatten_blank_lines(text: &str) -> String {
    BLANK_RUN.replace_all(text, "\n\n").into_owned()
}

/// Drop printed page decoration: standalone page-number lines, running
/// header lines, and the running-footer phrase wherever it appears.
pub fn strip_page_noise(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .filter(|line| !PAGE_NUMBER.is_match(line) && !RUNNING_HEADER.is_match(line))
        .collect();
    RUNNING_FOOTER.replace_all(&kept.join("\n"), "").into_owned()
}

/// Replace curly quotes with their ASCII equivalents.
pub fn canonicalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| {
            CANONICAL_QUOTES
                .iter()
                .find(|(from, _)| *from == c)
                .map(|(_, to)| *to)
                .unwrap_or(c)
        })
        .collect()
}

/// Pull code markers flush against the preceding line break so fences and
/// shell lines start in column zero.
fn tighten_code_margins(text: &str) -> String {
    CODE_MARGIN.replace_all(text, "\n${1}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyphenated_break_joins() {
        assert_eq!(join_broken_words("auto-\nmation"), "automation");
        assert_eq!(join_broken_words("auto- \n  mation"), "automation");
    }

    #[test]
    fn test_soft_break_joins_with_space() {
        assert_eq!(join_broken_words("hello \nworld"), "hello world");
    }

    #[test]
    fn test_flush_line_ending_is_left_alone() {
        assert_eq!(join_broken_words("hello\nworld"), "hello\nworld");
    }

    #[test]
    fn test_breaks_across_blank_lines_survive() {
        assert_eq!(join_broken_words("one \n\ntwo"), "one \n\ntwo");
        assert_eq!(join_broken_words("auto-\n\nmation"), "auto-\n\nmation");
    }

    #[test]
    fn test_collapse_large_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb"), "a\n\n\nb");
        assert_eq!(collapse_blank_lines("a\n\n\n\nb"), "a\n\n\nb");
    }

    #[test]
    fn test_collapse_triple_run() {
        assert_eq!(collapse_blank_lines("a\n\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_collapse_leaves_short_runs() {
        assert_eq!(collapse_blank_lines("a\n\nb"), "a\n\nb");
        assert_eq!(collapse_blank_lines("a\nb"), "a\nb");
    }

    #[test]
    fn test_flatten_blank_lines() {
        assert_eq!(flatten_blank_lines("a\n\n\n\n\nb"), "a\n\nb");
        assert_eq!(flatten_blank_lines("a\n\n\nb"), "a\n\nb");
        assert_eq!(flatten_blank_lines("a\n\nb"), "a\n\nb");
    }

    #[test]
    fn test_page_number_lines_dropped() {
        assert_eq!(strip_page_noise("intro\n42\nnext"), "intro\nnext");
        assert_eq!(strip_page_noise("intro\n  7  \nnext"), "intro\nnext");
    }

    #[test]
    fn test_running_header_dropped() {
        let text = "intro\nChapter 12 - The JIT 243\nnext";
        assert_eq!(strip_page_noise(text), "intro\nnext");
    }

    #[test]
    fn test_uppercase_heading_is_not_noise() {
        let text = "CHAPTER 12\nbody";
        assert_eq!(strip_page_noise(text), "CHAPTER 12\nbody");
    }

    #[test]
    fn test_running_footer_removed_as_substring() {
        let text = "intro\n12 Front Line PHP\nnext";
        assert_eq!(strip_page_noise(text), "intronext");
    }

    #[test]
    fn test_canonical_quotes() {
        let text = "\u{201c}It\u{2019}s here\u{201d}";
        assert_eq!(canonicalize_punctuation(text), "\"It's here\"");
    }

    #[test]
    fn test_em_dash_unchanged() {
        assert_eq!(canonicalize_punctuation("a — b"), "a — b");
    }

    #[test]
    fn test_code_margins_tightened() {
        assert_eq!(tighten_code_margins("text\n   $ composer update"), "text\n$ composer update");
        assert_eq!(tighten_code_margins("text\n\n  ```php"), "text\n```php");
    }

    #[test]
    fn test_normalize_block_composed() {
        let raw = "Some auto-\nmation text.\n42\nMore text.";
        assert_eq!(normalize_block(raw), "Some automation text.\nMore text.");
    }

    #[test]
    fn test_normalize_block_trims() {
        assert_eq!(normalize_block("\n\n  body  \n\n"), "body");
    }

    #[test]
    fn test_normalize_block_empty_noise_only() {
        assert_eq!(normalize_block("42\n\n17\n"), "");
    }
}
