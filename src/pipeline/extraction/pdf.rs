use super::types::{PageText, PdfExtractor};
use super::ExtractionError;

/// PDF text extractor using the pdf-extract crate.
/// Handles digital reports with an embedded text layer; scanned pages
/// come back empty.
pub struct PdfTextExtractor;

impl PdfExtractor for PdfTextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageText>, ExtractionError> {
        if pdf_bytes.is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        let page_texts = pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
            .map_err(|e| ExtractionError::PdfParsing(e.to_string()))?;

        let pages: Vec<PageText> = page_texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| PageText::new(i + 1, text))
            .collect();

        let with_text = pages.iter().filter(|p| p.has_text()).count();
        if with_text == 0 {
            tracing::warn!(pages = pages.len(), "Report has no recoverable text layer");
        } else {
            tracing::debug!(pages = pages.len(), with_text, "Report text layer extracted");
        }

        Ok(pages)
    }
}
