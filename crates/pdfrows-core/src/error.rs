use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PdfRowsError {
    #[error("invalid regex for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern for field '{0}' has no capture groups")]
    NoCaptureGroups(String),

    #[error("duplicate output column '{0}'")]
    DuplicateColumn(String),

    #[error("{role} '{name}' does not name a configured field")]
    UnknownField { role: &'static str, name: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("invalid page range {from}..={to} (pages are numbered from 1)")]
    InvalidPageRange { from: usize, to: usize },

    #[error("invalid match type '{0}': expected 'success', 'fail' or 'both'")]
    InvalidMatchType(String),

    #[error("cannot open PDF {path}: {source}")]
    PdfOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PdfRowsError {
    /// True for errors caused by bad patterns, field references or
    /// arguments, as opposed to I/O or extraction failures.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            PdfRowsError::InvalidPattern { .. }
                | PdfRowsError::NoCaptureGroups(_)
                | PdfRowsError::DuplicateColumn(_)
                | PdfRowsError::UnknownField { .. }
                | PdfRowsError::InvalidConfig(_)
                | PdfRowsError::ConfigLoad { .. }
                | PdfRowsError::InvalidPageRange { .. }
                | PdfRowsError::InvalidMatchType(_)
        )
    }
}
