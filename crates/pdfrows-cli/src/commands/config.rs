use pdfrows_core::config::delimit_mode;
use pdfrows_core::error::PdfRowsError;
use pdfrows_core::extract::DelimitMode;
use std::path::Path;

pub fn schema() -> Result<(), PdfRowsError> {
    print!(
        r#"Config File Format
==================

A config file tells `pdfrows process` which lines to pick out of the
PDF text and how to group them into CSV rows. Every line of every page
is tried against every field pattern.

Top-level fields:
  fields           (array, required)   Named patterns, in column order
                                       (see below)
  delimiter_field  (string, optional)  Field whose match starts a new
                                       record. The record collected so far
                                       is written first.
  required_fields  (array, optional)   Fields that must all have a
                                       non-empty value before a record is
                                       written. Entries may be field names
                                       or expanded column names (name_1).
  output           (string, optional)  CSV path. Default: "output.csv"

Exactly one of delimiter_field and required_fields must be set. The
record still open at the end of the document is always written, even if
required fields are missing.

Each entry in the "fields" array:
  name     (string, required)  Field name, used as the CSV column
  pattern  (string, required)  Regular expression with at least one
                               capture group. One group gives one column
                               named after the field; N groups give
                               columns name_1 .. name_N.

If the same column matches more than once inside one record, the last
match wins.

Example:
{{
  "fields": [
    {{ "name": "process", "pattern": "\\s+(\\d{{7}}-\\d{{2}}\\.\\d{{4}}\\.\\d\\.\\d{{2}}\\.\\d{{4}})" }},
    {{ "name": "party", "pattern": "^Parte: (.+)$" }},
    {{ "name": "hearing", "pattern": "(\\d{{2}}/\\d{{2}}/\\d{{4}}) (\\d{{2}}:\\d{{2}})" }}
  ],
  "delimiter_field": "process",
  "output": "pauta.csv"
}}

This writes the columns process, party, hearing_1, hearing_2.

Fields can also be given on the command line with --field NAME=REGEX;
those are added after the fields from the file.
"#
    );
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), PdfRowsError> {
    let config = pdfrows_core::config::load_config(file)?;
    let records = pdfrows_core::config::validate_config(&config)?;
    let schema = records.schema();

    println!("Config '{}' is valid.", file.display());
    println!("  Columns: {}", schema.columns().join(", "));
    match delimit_mode(&config)? {
        DelimitMode::ByField(name) => println!("  Records start at: {}", name),
        DelimitMode::ByRequiredSet(fields) => {
            println!("  Records complete when set: {}", fields.join(", "))
        }
    }
    println!("  Output: {}", config.output_path().display());

    // Check for potential issues (warnings, not errors)
    let mut warnings = Vec::new();
    for pattern in schema.patterns() {
        if pattern.regex.is_match("") {
            warnings.push(format!(
                "field '{}' matches an empty line and will match almost everything",
                pattern.name
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {}", w);
        }
    }

    Ok(())
}
