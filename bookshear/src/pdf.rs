// PDF text extraction

use crate::error::ShearError;
use pdf_oxide::document::PdfDocument;
use std::path::Path;

/// Extract the full text of a PDF, one page after another, pages joined
/// with a line break. Any decoder failure is fatal for the run.
pub fn extract_text(path: &Path) -> Result<String, ShearError> {
    let decode_error = |message: String| ShearError::SourceDecode {
        path: path.to_path_buf(),
        message,
    };

    let mut doc = PdfDocument::open(path).map_err(|e| decode_error(e.to_string()))?;
    let pages = doc.page_count().map_err(|e| decode_error(e.to_string()))?;
    log::info!("decoding {} ({pages} pages)", path.display());

    let mut text = String::new();
    for page in 0..pages {
        let page_text = doc.extract_text(page).map_err(|e| decode_error(e.to_string()))?;
        text.push_str(&page_text);
        text.push('\n');
    }
    Ok(text)
}
