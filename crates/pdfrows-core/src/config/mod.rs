pub mod schema;

use crate::error::PdfRowsError;
use crate::extract::{DelimitMode, RecordExtractor};
use crate::pattern::Schema;
use schema::{ConfigDef, PatternDef};
use std::path::Path;

/// Load an extraction config from a JSON file.
pub fn load_config(path: &Path) -> Result<ConfigDef, PdfRowsError> {
    let content = std::fs::read_to_string(path).map_err(|e| PdfRowsError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    serde_json::from_str(&content).map_err(|e| PdfRowsError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ConfigDef, PdfRowsError> {
    serde_json::from_str(json).map_err(|e| PdfRowsError::InvalidConfig(e.to_string()))
}

/// Parse a `name=regex` command-line field definition.
///
/// Only the first `=` separates name from pattern, so patterns may
/// contain `=` themselves.
pub fn parse_field_arg(arg: &str) -> Result<PatternDef, PdfRowsError> {
    match arg.split_once('=') {
        Some((name, pattern)) if !name.trim().is_empty() => Ok(PatternDef {
            name: name.trim().to_string(),
            pattern: pattern.to_string(),
        }),
        _ => Err(PdfRowsError::InvalidConfig(format!(
            "field definition '{}' must look like NAME=REGEX",
            arg
        ))),
    }
}

/// Pick the delimiting mode. Exactly one of `delimiter_field` and
/// `required_fields` must be given.
pub fn delimit_mode(config: &ConfigDef) -> Result<DelimitMode, PdfRowsError> {
    match (&config.delimiter_field, config.required_fields.is_empty()) {
        (Some(_), false) => Err(PdfRowsError::InvalidConfig(
            "set either delimiter_field or required_fields, not both".into(),
        )),
        (Some(field), true) => Ok(DelimitMode::ByField(field.clone())),
        (None, false) => Ok(DelimitMode::ByRequiredSet(config.required_fields.clone())),
        (None, true) => Err(PdfRowsError::InvalidConfig(
            "one of delimiter_field or required_fields must be set".into(),
        )),
    }
}

/// Check a config for everything a full extraction run needs and build
/// the extractor.
pub fn validate_config(config: &ConfigDef) -> Result<RecordExtractor, PdfRowsError> {
    if config.fields.is_empty() {
        return Err(PdfRowsError::InvalidConfig("fields must not be empty".into()));
    }

    for field in &config.fields {
        if field.pattern.is_empty() {
            return Err(PdfRowsError::InvalidConfig(format!(
                "field '{}' has an empty pattern",
                field.name
            )));
        }
    }

    let schema = Schema::compile(&config.fields)?;
    let mode = delimit_mode(config)?;
    RecordExtractor::new(schema, mode)
}
