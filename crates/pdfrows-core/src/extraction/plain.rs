use crate::error::PdfRowsError;
use crate::extraction::{split_pages, PageContent, PdfExtractor};

/// Backend for text that has already been extracted, e.g. a saved
/// `pdftotext` dump. Pages are separated by form feeds.
#[derive(Debug, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        PlainTextExtractor
    }
}

impl PdfExtractor for PlainTextExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<PageContent>, PdfRowsError> {
        let text = String::from_utf8_lossy(bytes);
        Ok(split_pages(&text, 1))
    }

    fn backend_name(&self) -> &str {
        "plain"
    }
}
