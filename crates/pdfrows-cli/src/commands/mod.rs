pub mod config;
pub mod preview;
pub mod process;

use pdfrows_core::config::schema::ConfigDef;
use pdfrows_core::error::PdfRowsError;
use pdfrows_core::extraction::pdftotext::PdftotextExtractor;
use pdfrows_core::extraction::plain::PlainTextExtractor;
use pdfrows_core::extraction::PdfExtractor;
use std::path::Path;

use crate::PatternArgs;

/// Merge the config file (if any) with `--field` flags. Flags are
/// appended after the file's fields.
fn load_patterns(args: &PatternArgs) -> Result<ConfigDef, PdfRowsError> {
    let mut config = match &args.config {
        Some(path) => pdfrows_core::config::load_config(path)?,
        None => ConfigDef::default(),
    };

    for arg in &args.field {
        config
            .fields
            .push(pdfrows_core::config::parse_field_arg(arg)?);
    }

    Ok(config)
}

/// Pick a backend from the input extension: `.txt` is read as an
/// already-extracted text dump, anything else goes through pdftotext.
fn extractor_for(input_file: &Path, raw: bool) -> Box<dyn PdfExtractor> {
    let is_text = input_file
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("txt"))
        .unwrap_or(false);

    if is_text {
        Box::new(PlainTextExtractor::new())
    } else {
        Box::new(PdftotextExtractor::new().with_layout(!raw))
    }
}
