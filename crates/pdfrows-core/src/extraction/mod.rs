pub mod pdftotext;
pub mod plain;

use crate::error::PdfRowsError;
use serde::{Deserialize, Serialize};

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    pub lines: Vec<String>,
}

impl PageContent {
    pub fn from_text(page_number: usize, text: &str) -> Self {
        PageContent {
            page_number,
            lines: text.lines().map(|l| l.to_string()).collect(),
        }
    }
}

/// Inclusive, 1-based range of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub from: usize,
    pub to: usize,
}

impl PageRange {
    pub fn new(from: usize, to: usize) -> Result<Self, PdfRowsError> {
        if from == 0 || from > to {
            return Err(PdfRowsError::InvalidPageRange { from, to });
        }
        Ok(PageRange { from, to })
    }

    pub fn contains(&self, page_number: usize) -> bool {
        (self.from..=self.to).contains(&page_number)
    }
}

/// Split text on form feeds into numbered pages.
///
/// A single trailing form feed (as written by pdftotext after the last
/// page) does not produce an extra empty page.
pub fn split_pages(text: &str, first_page: usize) -> Vec<PageContent> {
    let text = text.strip_suffix('\x0c').unwrap_or(text);
    text.split('\x0c')
        .enumerate()
        .map(|(i, page_text)| PageContent::from_text(first_page + i, page_text))
        .collect()
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PdfRowsError>;

    /// Extract only the pages inside `range`. Pages past the end of the
    /// document are silently dropped.
    fn extract_page_range(
        &self,
        pdf_bytes: &[u8],
        range: PageRange,
    ) -> Result<Vec<PageContent>, PdfRowsError> {
        Ok(self
            .extract_pages(pdf_bytes)?
            .into_iter()
            .filter(|p| range.contains(p.page_number))
            .collect())
    }

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
