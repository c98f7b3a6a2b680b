use crate::config::schema::PatternDef;
use crate::error::PdfRowsError;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// A named regex together with the output columns its groups feed.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub name: String,
    pub regex: Regex,
    /// Output column names, one per capture group, in group order.
    pub columns: Vec<String>,
    /// Index of this pattern's first column in the schema.
    pub(crate) first_column: usize,
}

impl FieldPattern {
    /// Number of capture groups (excluding the implicit whole match).
    pub fn group_count(&self) -> usize {
        self.columns.len()
    }
}

/// One pattern's match on a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldMatch {
    pub field: String,
    /// `(column, value)` per capture group. Groups that did not take part
    /// in the match have no value.
    pub values: Vec<(String, Option<String>)>,
}

/// Compiled patterns plus the resolved column layout.
///
/// Column order is pattern order, and within a pattern, group order.
/// It is fixed before any text is seen, so the CSV header is known
/// up front.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    patterns: Vec<FieldPattern>,
    columns: Vec<String>,
}

impl Schema {
    pub fn compile(defs: &[PatternDef]) -> Result<Schema, PdfRowsError> {
        let mut patterns = Vec::with_capacity(defs.len());
        let mut columns: Vec<String> = Vec::new();
        let mut seen_fields = HashSet::new();
        let mut seen_columns = HashSet::new();

        for def in defs {
            if def.name.trim().is_empty() {
                return Err(PdfRowsError::InvalidConfig(
                    "field name must not be empty".into(),
                ));
            }
            if !seen_fields.insert(def.name.as_str()) {
                return Err(PdfRowsError::DuplicateColumn(def.name.clone()));
            }

            let regex = Regex::new(&def.pattern).map_err(|source| PdfRowsError::InvalidPattern {
                field: def.name.clone(),
                source,
            })?;

            let groups = regex.captures_len() - 1;
            let field_columns: Vec<String> = match groups {
                0 => return Err(PdfRowsError::NoCaptureGroups(def.name.clone())),
                1 => vec![def.name.clone()],
                n => (1..=n).map(|i| format!("{}_{}", def.name, i)).collect(),
            };

            let first_column = columns.len();
            for col in &field_columns {
                if !seen_columns.insert(col.clone()) {
                    return Err(PdfRowsError::DuplicateColumn(col.clone()));
                }
                columns.push(col.clone());
            }

            patterns.push(FieldPattern {
                name: def.name.clone(),
                regex,
                columns: field_columns,
                first_column,
            });
        }

        log::debug!(
            "compiled {} pattern(s) into {} column(s)",
            patterns.len(),
            columns.len()
        );

        Ok(Schema { patterns, columns })
    }

    /// Output column names, i.e. the CSV header.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn patterns(&self) -> &[FieldPattern] {
        &self.patterns
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn pattern(&self, name: &str) -> Option<&FieldPattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Resolve a pattern name (all of its columns) or a single expanded
    /// column name to column indices.
    pub fn resolve_field(&self, name: &str) -> Option<Vec<usize>> {
        if let Some(p) = self.pattern(name) {
            return Some((p.first_column..p.first_column + p.group_count()).collect());
        }
        self.column_index(name).map(|i| vec![i])
    }

    /// Run every pattern against `line`, in schema order.
    pub fn match_line(&self, line: &str) -> Vec<FieldMatch> {
        self.patterns
            .iter()
            .filter_map(|p| {
                let caps = p.regex.captures(line)?;
                let values = p
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, col)| (col.clone(), caps.get(i + 1).map(|m| m.as_str().to_string())))
                    .collect();
                Some(FieldMatch {
                    field: p.name.clone(),
                    values,
                })
            })
            .collect()
    }
}
