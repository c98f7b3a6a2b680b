use pdfrows_core::error::PdfRowsError;
use std::path::PathBuf;

use super::{extractor_for, load_patterns};
use crate::PatternArgs;

pub fn run(
    input_file: PathBuf,
    patterns: &PatternArgs,
    delimiter: Option<String>,
    require: Vec<String>,
    out: Option<PathBuf>,
) -> Result<(), PdfRowsError> {
    let mut config = load_patterns(patterns)?;

    // Command-line mode replaces whatever mode the file chose.
    if delimiter.is_some() || !require.is_empty() {
        config.delimiter_field = delimiter;
        config.required_fields = require;
    }
    if out.is_some() {
        config.output = out;
    }

    let records = pdfrows_core::config::validate_config(&config)?;
    let csv_path = config.output_path();
    let extractor = extractor_for(&input_file, patterns.raw);

    let count = pdfrows_core::process_pdf(&input_file, &csv_path, extractor.as_ref(), &records)?;

    eprintln!(
        "Wrote {} record(s) with {} column(s) to {}",
        count,
        records.schema().columns().len(),
        csv_path.display()
    );

    Ok(())
}
