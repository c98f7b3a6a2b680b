pub mod config;
pub mod error;
pub mod extract;
pub mod extraction;
pub mod output;
pub mod pattern;
pub mod preview;

use error::PdfRowsError;
use extract::{Record, RecordExtractor};
use extraction::{PageRange, PdfExtractor};
use pattern::Schema;
use preview::{MatchType, Preview};
use std::path::Path;

/// Read the input file, failing before any extraction work if it cannot
/// be opened.
fn read_pdf(pdf_path: &Path) -> Result<Vec<u8>, PdfRowsError> {
    std::fs::read(pdf_path).map_err(|source| PdfRowsError::PdfOpen {
        path: pdf_path.to_path_buf(),
        source,
    })
}

/// Extract every record from in-memory PDF bytes.
pub fn extract_records(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    records: &RecordExtractor,
) -> Result<Vec<Record>, PdfRowsError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(records.records_from_pages(&pages).collect())
}

/// Main API entry point: run the full extraction over a PDF and write the
/// CSV. Returns the number of records written.
pub fn process_pdf(
    pdf_path: &Path,
    csv_path: &Path,
    extractor: &dyn PdfExtractor,
    records: &RecordExtractor,
) -> Result<usize, PdfRowsError> {
    let pdf_bytes = read_pdf(pdf_path)?;
    let pages = extractor.extract_pages(&pdf_bytes)?;

    log::debug!(
        "{}: {} page(s) via {}",
        pdf_path.display(),
        pages.len(),
        extractor.backend_name()
    );

    let count = output::write_csv_file(
        csv_path,
        records.schema(),
        records.records_from_pages(&pages),
    )?;

    log::info!(
        "wrote {} record(s) from {} to {}",
        count,
        pdf_path.display(),
        csv_path.display()
    );

    Ok(count)
}

/// Dry-run the patterns against a page range without writing anything.
pub fn preview_pdf(
    pdf_path: &Path,
    extractor: &dyn PdfExtractor,
    schema: &Schema,
    range: PageRange,
    match_type: MatchType,
) -> Result<Preview, PdfRowsError> {
    let pdf_bytes = read_pdf(pdf_path)?;
    let pages = extractor.extract_page_range(&pdf_bytes, range)?;
    Ok(preview::preview(&pages, schema, range, match_type))
}
