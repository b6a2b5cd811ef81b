//! PDF rendering of cover-letter text.
//!
//! The pipeline only sees the `PdfWriter` trait: full text in, one file out, or an error
//! with no file left behind.

use std::path::Path;

use thiserror::Error;

pub mod layout;
pub mod pdf;

pub use pdf::LopdfWriter;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF encoding error: {0}")]
    Render(String),

    #[error("target path has no parent directory: {0}")]
    NoParent(String),
}

/// Renders text to a PDF file at `path`.
///
/// Implementations must leave either a complete file or nothing at `path`.
pub trait PdfWriter: Send + Sync {
    fn write(&self, text: &str, path: &Path) -> Result<(), PdfError>;
}
