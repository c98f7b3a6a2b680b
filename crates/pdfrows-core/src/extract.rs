//! Grouping of matched line fragments into records.
//!
//! Lines are consumed in document order. Each line's matches are written
//! into a single accumulator record, which is closed either when the
//! delimiter field shows up again or when every required column is
//! filled. Whatever is left at the end of the input is flushed once.

use crate::error::PdfRowsError;
use crate::extraction::PageContent;
use crate::pattern::{FieldMatch, Schema};
use std::iter::FusedIterator;
use std::sync::Arc;

/// How the line stream is cut into records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelimitMode {
    /// A match of this pattern starts a new record.
    ByField(String),
    /// A record is complete once all of these fields (pattern names or
    /// expanded column names) hold a non-empty value.
    ByRequiredSet(Vec<String>),
}

/// Mode with field names resolved against the schema.
#[derive(Debug, Clone)]
enum ResolvedMode {
    ByField(String),
    ByRequiredSet(Vec<usize>),
}

/// One output row: a value slot per schema column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Option<String>>,
}

impl Record {
    fn empty(columns: Arc<[String]>) -> Self {
        let values = vec![None; columns.len()];
        Record { columns, values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values[idx].as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    /// Set columns and their values, in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .zip(&self.values)
            .filter_map(|(c, v)| v.as_deref().map(|v| (c.as_str(), v)))
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Values as CSV cells, empty strings for unset columns.
    pub fn to_row(&self) -> Vec<&str> {
        self.values
            .iter()
            .map(|v| v.as_deref().unwrap_or(""))
            .collect()
    }

    fn apply(&mut self, schema: &Schema, m: &FieldMatch) {
        for (column, value) in &m.values {
            if let (Some(idx), Some(value)) = (schema.column_index(column), value) {
                // Last match wins.
                self.values[idx] = Some(value.clone());
            }
        }
    }

    fn has_all(&self, required: &[usize]) -> bool {
        required
            .iter()
            .all(|&i| self.values[i].as_deref().is_some_and(|v| !v.is_empty()))
    }
}

/// Groups line matches into records according to a [`DelimitMode`].
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    schema: Schema,
    mode: ResolvedMode,
    columns: Arc<[String]>,
}

impl RecordExtractor {
    pub fn new(schema: Schema, mode: DelimitMode) -> Result<Self, PdfRowsError> {
        if schema.is_empty() {
            return Err(PdfRowsError::InvalidConfig(
                "at least one field pattern is required".into(),
            ));
        }

        let mode = match mode {
            DelimitMode::ByField(name) => {
                if schema.pattern(&name).is_none() {
                    return Err(PdfRowsError::UnknownField {
                        role: "delimiter field",
                        name,
                    });
                }
                ResolvedMode::ByField(name)
            }
            DelimitMode::ByRequiredSet(fields) => {
                if fields.is_empty() {
                    return Err(PdfRowsError::InvalidConfig(
                        "required_fields must not be empty".into(),
                    ));
                }
                let mut indices = Vec::new();
                for name in fields {
                    match schema.resolve_field(&name) {
                        Some(cols) => indices.extend(cols),
                        None => {
                            return Err(PdfRowsError::UnknownField {
                                role: "required field",
                                name,
                            })
                        }
                    }
                }
                indices.sort_unstable();
                indices.dedup();
                ResolvedMode::ByRequiredSet(indices)
            }
        };

        let columns: Arc<[String]> = schema.columns().into();
        Ok(RecordExtractor {
            schema,
            mode,
            columns,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Lazily extract records from an ordered sequence of lines.
    pub fn records<I>(&self, lines: I) -> Records<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Records {
            extractor: self,
            lines: lines.into_iter(),
            current: Record::empty(self.columns.clone()),
            finished: false,
        }
    }

    /// Lazily extract records from pages, in page order.
    pub fn records_from_pages<'a>(
        &'a self,
        pages: &'a [PageContent],
    ) -> Records<'a, impl Iterator<Item = &'a str>> {
        self.records(
            pages
                .iter()
                .flat_map(|p| p.lines.iter().map(String::as_str)),
        )
    }

    /// Feed one line into the accumulator. Returns a finished record if
    /// this line closed one.
    fn step(&self, current: &mut Record, line: &str) -> Option<Record> {
        let matches = self.schema.match_line(line);
        if matches.is_empty() {
            return None;
        }

        match &self.mode {
            ResolvedMode::ByField(delimiter) => {
                let mut emitted = None;
                if matches.iter().any(|m| &m.field == delimiter) && !current.is_empty() {
                    emitted = Some(self.take(current));
                }
                for m in &matches {
                    current.apply(&self.schema, m);
                }
                emitted
            }
            ResolvedMode::ByRequiredSet(required) => {
                for m in &matches {
                    current.apply(&self.schema, m);
                }
                if current.has_all(required) {
                    Some(self.take(current))
                } else {
                    None
                }
            }
        }
    }

    fn take(&self, current: &mut Record) -> Record {
        std::mem::replace(current, Record::empty(self.columns.clone()))
    }
}

/// Iterator over the records of a line stream. See
/// [`RecordExtractor::records`].
pub struct Records<'a, L> {
    extractor: &'a RecordExtractor,
    lines: L,
    current: Record,
    finished: bool,
}

impl<L> Iterator for Records<'_, L>
where
    L: Iterator,
    L::Item: AsRef<str>,
{
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        if self.finished {
            return None;
        }

        for line in self.lines.by_ref() {
            if let Some(record) = self.extractor.step(&mut self.current, line.as_ref()) {
                log::debug!("record closed with {} field(s)", record.iter().count());
                return Some(record);
            }
        }

        self.finished = true;
        if self.current.is_empty() {
            return None;
        }

        let record = self.extractor.take(&mut self.current);
        if let ResolvedMode::ByRequiredSet(required) = &self.extractor.mode {
            if !record.has_all(required) {
                log::warn!("last record is missing required fields; writing it anyway");
            }
        }
        Some(record)
    }
}

impl<L> FusedIterator for Records<'_, L>
where
    L: Iterator,
    L::Item: AsRef<str>,
{
}
