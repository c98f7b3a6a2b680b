use pdfrows_core::error::PdfRowsError;
use pdfrows_core::preview::Preview;

pub fn print(preview: &Preview) -> Result<(), PdfRowsError> {
    let json = serde_json::to_string_pretty(preview)?;
    println!("{json}");
    Ok(())
}
