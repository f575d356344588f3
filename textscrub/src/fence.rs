//! Code-block detection for cleaned book text.
//!
//! The source material is a PHP book, so the heuristics look for PHP and
//! shell fragments. Fencing is the only pass that adds content; it must
//! stay stable across repeat sweeps, so regions already inside fences are
//! passed through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Lines opening with a PHP construct keyword are code even without the
/// usual punctuation suffix.
static KEYWORD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(public|private|protected|function|class|interface|trait|namespace|use|return|if|else|foreach|while|for|switch|case|default|break|continue|try|catch|finally|throw|new|extends|implements)\s",
    )
    .expect("keyword line pattern")
});

/// Wrap runs of code-looking lines in ```php fences.
///
/// A blank line or a line directly following code is absorbed into the
/// open block, matching how extracted listings trail off into prose.
/// Existing fenced regions are left exactly as found.
pub fn fence_code_blocks(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut out: Vec<String> = Vec::with_capacity(lines.len() + 8);
    let mut in_existing_fence = false;
    let mut in_code = false;

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            if in_code {
                out.push("```".to_string());
                out.push(String::new());
                in_code = false;
            }
            in_existing_fence = !in_existing_fence;
            out.push((*line).to_string());
            continue;
        }
        if in_existing_fence {
            out.push((*line).to_string());
            continue;
        }

        let prev = if i > 0 { Some(lines[i - 1]) } else { None };
        let code = is_code_line(trimmed, prev);
        let absorbed = in_code && (trimmed.is_empty() || prev.map(follows_code).unwrap_or(false));

        if code || absorbed {
            if !in_code {
                if out.last().map(|l| !l.trim().is_empty()).unwrap_or(false) {
                    out.push(String::new());
                }
                out.push("```php".to_string());
                in_code = true;
            }
            out.push((*line).to_string());
        } else {
            if in_code {
                out.push("```".to_string());
                out.push(String::new());
                in_code = false;
            }
            out.push((*line).to_string());
        }
    }

    if in_code {
        out.push("```".to_string());
    }

    out.join("\n")
}

/// Does this (trimmed) line look like a line of code?
fn is_code_line(trimmed: &str, prev: Option<&str>) -> bool {
    let prev_trimmed = prev.map(str::trim).unwrap_or("");
    trimmed.starts_with('$')
        || trimmed.starts_with("<?php")
        || trimmed.starts_with("<?=")
        || (trimmed.ends_with(';') && !trimmed.starts_with('#'))
        || trimmed.ends_with('{')
        || trimmed.ends_with('}')
        || (trimmed.starts_with("//") && prev_trimmed.ends_with(';'))
        || KEYWORD_LINE.is_match(trimmed)
}

/// Does the previous line keep an open block alive?
fn follows_code(prev: &str) -> bool {
    let t = prev.trim();
    t.starts_with('$')
        || t.starts_with("<?php")
        || t.ends_with(';')
        || t.ends_with('{')
        || t.ends_with('}')
        || t.starts_with("//")
}
