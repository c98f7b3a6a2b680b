use crate::error::PdfRowsError;
use crate::extraction::{split_pages, PageContent, PageRange, PdfExtractor};
use std::io::Write;
use std::path::Path;
use std::process::Command;

/// PDF extraction backend using pdftotext (from poppler-utils).
///
/// Uses `pdftotext -layout` by default so lines keep the visual
/// left-to-right order of the page, which is what line-based patterns
/// are usually written against.
pub struct PdftotextExtractor {
    layout: bool,
}

impl PdftotextExtractor {
    pub fn new() -> Self {
        PdftotextExtractor { layout: true }
    }

    /// Toggle `-layout`. Without it pdftotext emits text in content
    /// stream order.
    pub fn with_layout(mut self, layout: bool) -> Self {
        self.layout = layout;
        self
    }

    /// Check if pdftotext is available on the system.
    pub fn is_available() -> bool {
        Command::new("pdftotext")
            .arg("-v")
            .output()
            .map(|o| o.status.success() || !o.stderr.is_empty())
            .unwrap_or(false)
    }

    fn run(
        &self,
        pdf_bytes: &[u8],
        range: Option<PageRange>,
    ) -> Result<Vec<PageContent>, PdfRowsError> {
        // Write PDF bytes to a temp file
        let mut tmpfile =
            tempfile::NamedTempFile::new().map_err(|e| PdfRowsError::Extraction(e.to_string()))?;
        tmpfile
            .write_all(pdf_bytes)
            .map_err(|e| PdfRowsError::Extraction(e.to_string()))?;

        let text = self.run_pdftotext(tmpfile.path(), range)?;
        let first_page = range.map(|r| r.from).unwrap_or(1);
        let pages = split_pages(&text, first_page);

        log::debug!(
            "pdftotext extracted {} page(s) starting at page {}",
            pages.len(),
            first_page
        );

        Ok(pages)
    }

    fn run_pdftotext(
        &self,
        pdf_path: &Path,
        range: Option<PageRange>,
    ) -> Result<String, PdfRowsError> {
        let mut cmd = Command::new("pdftotext");
        if self.layout {
            cmd.arg("-layout");
        }
        if let Some(range) = range {
            cmd.arg("-f")
                .arg(range.from.to_string())
                .arg("-l")
                .arg(range.to.to_string());
        }
        cmd.arg("-enc").arg("UTF-8");

        let output = cmd
            .arg(pdf_path)
            .arg("-") // output to stdout
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PdfRowsError::PdftotextNotFound
                } else {
                    PdfRowsError::Extraction(format!("pdftotext failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(PdfRowsError::PdftotextFailed { code, stderr });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl Default for PdftotextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor for PdftotextExtractor {
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PdfRowsError> {
        self.run(pdf_bytes, None)
    }

    fn extract_page_range(
        &self,
        pdf_bytes: &[u8],
        range: PageRange,
    ) -> Result<Vec<PageContent>, PdfRowsError> {
        match self.run(pdf_bytes, Some(range)) {
            Ok(pages) => Ok(pages),
            // Exit code 99: first page is past the end of the document.
            Err(PdfRowsError::PdftotextFailed { code: 99, .. }) => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    fn backend_name(&self) -> &str {
        "pdftotext"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_default() {
        assert!(PdftotextExtractor::new().layout);
        assert!(!PdftotextExtractor::new().with_layout(false).layout);
    }

    #[test]
    fn test_garbage_input_is_an_error() {
        if !PdftotextExtractor::is_available() {
            return;
        }
        let result = PdftotextExtractor::new().extract_pages(b"not a pdf");
        assert!(result.is_err());
    }
}
