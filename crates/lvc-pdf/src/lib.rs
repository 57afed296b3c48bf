//! lvc-pdf
//!
//! Plain-text extraction from inspection PDFs.
//!
//! Pages are read in physical order and joined with a newline. A page that
//! yields no text contributes an empty string; only a document that cannot
//! be decoded at all is an error.

pub mod error;

use std::panic::{self, AssertUnwindSafe};

use lopdf::Document;
use tracing::{debug, info};

use crate::error::ExtractError;

/// Separator placed between consecutive pages.
pub const PAGE_SEPARATOR: &str = "\n";

/// Converts raw document bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// [`TextExtractor`] backed by `lopdf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        // The decoder can panic on malformed streams.
        panic::catch_unwind(AssertUnwindSafe(|| extract_pages(bytes)))
            .map_err(|_| ExtractError::Unreadable("PDF decoder panicked".to_string()))?
            .map(|pages| pages.join(PAGE_SEPARATOR))
    }
}

/// Text of every page, in page order.
pub fn extract_pages(bytes: &[u8]) -> Result<Vec<String>, ExtractError> {
    let doc = Document::load_mem(bytes).map_err(|e| ExtractError::Unreadable(e.to_string()))?;

    let pages = doc.get_pages();
    if pages.is_empty() {
        return Err(ExtractError::NoPages);
    }

    let mut failed = 0usize;
    let texts: Vec<String> = pages
        .keys()
        .map(|&number| match doc.extract_text(&[number]) {
            Ok(text) => text,
            Err(e) => {
                debug!(page = number, error = %e, "page yielded no text");
                failed += 1;
                String::new()
            }
        })
        .collect();

    if failed == texts.len() && doc.is_encrypted() {
        return Err(ExtractError::Encrypted);
    }

    info!(
        pages = texts.len(),
        empty_pages = failed,
        chars = texts.iter().map(|t| t.chars().count()).sum::<usize>(),
        "extracted PDF text"
    );

    Ok(texts)
}
