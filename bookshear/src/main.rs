//! bookshear - split an extracted book text dump into per-chapter markdown files

mod chapters;
mod error;
mod output;
mod pdf;
mod scan;
mod tables;

use anyhow::{Context, Result};
use clap::Parser;
use error::ShearError;
use std::fs;
use std::path::PathBuf;

/// Default source document, matching the publisher's download name.
const DEFAULT_PDF: &str = "Front-Line-PHP-Book.pdf";

/// Default intermediate text dump. Extraction is skipped when it exists.
const DEFAULT_TEXT: &str = "pdf_text.txt";

#[derive(Parser, Debug)]
#[command(
    name = "bookshear",
    about = "Split an extracted book text dump into per-chapter markdown files",
    long_about = "Extracts the book text once, scans it for section markers, and writes one \
                  cleaned markdown file per chapter into the part directories"
)]
#[command(version)]
struct Args {
    /// Source PDF (only decoded when the text dump is missing)
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Extracted text dump to segment
    #[arg(long)]
    text: Option<PathBuf>,

    /// Directory the chapter files are written under
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let filter = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();
    run(&args)
}

fn run(args: &Args) -> Result<()> {
    let text_path = args.text.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_TEXT));

    if !text_path.exists() {
        let pdf_path = args.pdf.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_PDF));
        let text = pdf::extract_text(&pdf_path)?;
        fs::write(&text_path, &text)
            .with_context(|| format!("Failed to write {}", text_path.display()))?;
        log::info!("extracted text saved to {}", text_path.display());
    }

    let raw = fs::read_to_string(&text_path).map_err(|source| ShearError::SourceRead {
        path: text_path.clone(),
        source,
    })?;
    let raw = raw.replace("\r\n", "\n");
    let lines: Vec<&str> = raw.lines().collect();

    let layout = tables::book_layout();
    let boundaries = scan::scan_lines(&lines, layout);
    if boundaries.is_empty() {
        println!("No section markers found in {}", text_path.display());
        return Ok(());
    }
    log::debug!("found {} boundaries across {} lines", boundaries.len(), lines.len());

    let documents = chapters::assemble(&lines, &boundaries, layout);
    let out_dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));

    let mut written = 0;
    let mut failed = 0;
    for document in &documents {
        match output::write_document(document, &out_dir) {
            Ok(_) => {
                println!(
                    "Processed: {} ({} lines, {} sections)",
                    document.path.display(),
                    document.source_lines,
                    document.ranges
                );
                written += 1;
            }
            Err(e) => {
                // One bad write must not block the remaining documents.
                eprintln!("Error writing \"{}\": {:#}", document.path.display(), e);
                failed += 1;
            }
        }
    }

    println!("---");
    println!("Written: {}, Failed: {}", written, failed);
    Ok(())
}
