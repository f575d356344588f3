//! bookmend - sweep generated markdown files and repair extraction artifacts in place

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Files the sweep must never rewrite: the repository's own notes.
const PROTECTED_FILES: &[&str] = &["README.md", "DESIGN.md"];

#[derive(Parser, Debug)]
#[command(
    name = "bookmend",
    about = "Repair extraction artifacts in generated markdown files",
    long_about = "Walks a directory tree for markdown files and rejoins split words, fences \
                  code listings, and settles paragraph spacing, rewriting files in place"
)]
#[command(version)]
struct Args {
    /// Directory tree to sweep (defaults to the current directory)
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    let files = find_markdown_files(&dir)?;
    if files.is_empty() {
        println!("No markdown files found in {}", dir.display());
        return Ok(());
    }

    let mut fixed = 0;
    let mut unchanged = 0;
    let mut errors = 0;
    for path in &files {
        match mend_file(path) {
            Ok(true) => {
                println!("Fixed: {}", path.display());
                fixed += 1;
            }
            Ok(false) => {
                log::debug!("unchanged: {}", path.display());
                unchanged += 1;
            }
            Err(e) => {
                eprintln!("Error mending \"{}\": {:#}", path.display(), e);
                errors += 1;
            }
        }
    }

    println!("---");
    println!("Fixed: {}, Unchanged: {}, Errors: {}", fixed, unchanged, errors);
    Ok(())
}

/// Find all markdown files under the given directory tree.
fn find_markdown_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.context("Failed to read directory entry")?;
        if entry.file_type().is_file() && is_markdown(entry.path()) && !is_protected(entry.path()) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

/// Check if a path is a markdown file (case-insensitive).
fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn is_protected(path: &Path) -> bool {
    path.file_name()
        .and_then(OsStr::to_str)
        .map(|name| PROTECTED_FILES.contains(&name))
        .unwrap_or(false)
}

/// Apply the fixes to a single file. Returns whether it changed.
fn mend_file(path: &Path) -> Result<bool> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mended = mend(&content);
    if mended == content {
        return Ok(false);
    }
    fs::write(path, &mended).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

/// Fix order mirrors the damage: rejoin split words while line structure
/// is intact, fence code before paragraph spacing settles, canonicalize
/// punctuation last.
fn mend(content: &str) -> String {
    let content = textscrub::join_broken_words(content);
    let content = textscrub::fence_code_blocks(&content);
    let content = textscrub::flatten_blank_lines(&content);
    textscrub::canonicalize_punctuation(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protected_names_are_skipped() {
        assert!(is_protected(Path::new("out/README.md")));
        assert!(is_protected(Path::new("DESIGN.md")));
        assert!(!is_protected(Path::new("part-i-php-the-language/chapter-01-php-today.md")));
    }

    #[test]
    fn test_markdown_extension_check() {
        assert!(is_markdown(Path::new("foreword.md")));
        assert!(is_markdown(Path::new("foreword.MD")));
        assert!(!is_markdown(Path::new("pdf_text.txt")));
    }

    #[test]
    fn test_mend_is_stable_on_clean_input() {
        let clean = "# CHAPTER 01\n\n## PHP TODAY\n\nSome intro text.\n";
        assert_eq!(mend(clean), clean);
    }

    #[test]
    fn test_mend_converges() {
        let raw = "Broken auto-\nmation text.\n\n\n\n$x = 1;\n\nDone.";
        let once = mend(raw);
        assert_eq!(mend(&once), once);
    }
}
