use std::path::PathBuf;
use thiserror::Error;

/// Fatal pipeline errors. Mapping gaps and empty sections are not
/// errors; the assembler drops those and the run continues.
#[derive(Error, Debug)]
pub enum ShearError {
    #[error("cannot decode source document {}: {message}", .path.display())]
    SourceDecode { path: PathBuf, message: String },

    #[error("cannot read extracted text {}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
