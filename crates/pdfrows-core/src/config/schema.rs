use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OUTPUT: &str = "output.csv";

/// An extraction job as read from a JSON config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDef {
    /// Named patterns, in column order.
    #[serde(default)]
    pub fields: Vec<PatternDef>,
    /// Field whose match starts a new record.
    #[serde(default)]
    pub delimiter_field: Option<String>,
    /// Fields (or expanded columns) that together complete a record.
    #[serde(default)]
    pub required_fields: Vec<String>,
    /// CSV destination. Defaults to `output.csv`.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

/// A single named regular expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternDef {
    pub name: String,
    pub pattern: String,
}

impl ConfigDef {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }
}
