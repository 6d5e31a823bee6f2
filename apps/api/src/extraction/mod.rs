//! Resume Extractor — turns uploaded PDF bytes into plain résumé text.
//!
//! The PDF library is CPU-bound and can panic on hostile input, so decoding runs
//! inside `tokio::task::spawn_blocking`; a panic surfaces as `ExtractionError::Crashed`.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not parse PDF: {0}")]
    Parse(String),

    #[error("PDF extraction aborted: {0}")]
    Crashed(String),

    #[error("the PDF contains no extractable text")]
    NoText,
}

/// Capability for turning a document into text. `PdfTextExtractor` is the production impl.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, document: &[u8]) -> Result<String, ExtractionError>;
}

/// `pdf-extract` backed extractor.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: &[u8]) -> Result<String, ExtractionError> {
        let bytes = document.to_vec();
        let pages = tokio::task::spawn_blocking(move || {
            pdf_extract::extract_text_from_mem_by_pages(&bytes)
        })
        .await
        .map_err(|e| ExtractionError::Crashed(e.to_string()))?
        .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        debug!("Extracted {} page(s) from PDF", pages.len());
        join_pages(pages)
    }
}

/// Concatenates page texts in document order with no separator.
/// Fails with `NoText` when nothing but whitespace came out.
pub fn join_pages<I, S>(pages: I) -> Result<String, ExtractionError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let text: String = pages.into_iter().map(|p| p.as_ref().to_string()).collect();
    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }
    Ok(text)
}
