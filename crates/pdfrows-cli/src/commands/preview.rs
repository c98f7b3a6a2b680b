use pdfrows_core::error::PdfRowsError;
use pdfrows_core::extraction::PageRange;
use pdfrows_core::pattern::Schema;
use pdfrows_core::preview::MatchType;
use std::path::PathBuf;

use super::{extractor_for, load_patterns};
use crate::output;
use crate::PatternArgs;

pub fn run(
    input_file: PathBuf,
    patterns: &PatternArgs,
    from: usize,
    to: Option<usize>,
    match_type: &str,
    output_format: &str,
) -> Result<(), PdfRowsError> {
    let match_type: MatchType = match_type.parse()?;
    let range = PageRange::new(from, last_page(from, to))?;

    // Preview does not need a delimiting mode, and an empty field list
    // just shows the page text.
    let config = load_patterns(patterns)?;
    let schema = Schema::compile(&config.fields)?;
    let extractor = extractor_for(&input_file, patterns.raw);

    let preview =
        pdfrows_core::preview_pdf(&input_file, extractor.as_ref(), &schema, range, match_type)?;

    match output_format {
        "json" => output::json::print(&preview)?,
        _ => output::table::print(&preview),
    }

    Ok(())
}

/// Pages shown when `--to` is omitted.
const DEFAULT_PAGE_SPAN: usize = 5;

fn last_page(from: usize, to: Option<usize>) -> usize {
    to.unwrap_or_else(|| from.saturating_add(DEFAULT_PAGE_SPAN - 1))
}
