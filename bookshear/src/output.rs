//! File sink for assembled documents.

use crate::chapters::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Write one document under `out_dir`, creating parent directories as
/// needed. An existing file at the target path is overwritten.
pub fn write_document(document: &Document, out_dir: &Path) -> Result<PathBuf> {
    let target = out_dir.join(&document.path);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(&target, &document.body)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn document(path: &str, body: &str) -> Document {
        Document {
            key: "chapter-01".to_string(),
            path: PathBuf::from(path),
            body: body.to_string(),
            source_lines: 1,
            ranges: 1,
        }
    }

    #[test]
    fn test_write_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let doc = document("part-i-php-the-language/chapter-01-php-today.md", "# CHAPTER 01\n");
        let target = write_document(&doc, dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "# CHAPTER 01\n");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let stale = document("foreword.md", "stale\n");
        let fresh = document("foreword.md", "fresh\n");
        write_document(&stale, dir.path()).unwrap();
        let target = write_document(&fresh, dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "fresh\n");
    }
}
