use crate::error::PdfRowsError;
use crate::extraction::{PageContent, PageRange};
use crate::pattern::{FieldMatch, Schema};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which lines a preview reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Lines matched by at least one pattern.
    Success,
    /// Lines matched by no pattern.
    Fail,
    /// Every line.
    #[default]
    Both,
}

impl MatchType {
    pub fn accepts(self, matched: bool) -> bool {
        match self {
            MatchType::Success => matched,
            MatchType::Fail => !matched,
            MatchType::Both => true,
        }
    }
}

impl FromStr for MatchType {
    type Err = PdfRowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "success" => Ok(MatchType::Success),
            "fail" => Ok(MatchType::Fail),
            "both" => Ok(MatchType::Both),
            _ => Err(PdfRowsError::InvalidMatchType(s.to_string())),
        }
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchType::Success => write!(f, "success"),
            MatchType::Fail => write!(f, "fail"),
            MatchType::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinePreview {
    /// 0-based line index within the page.
    pub line_index: usize,
    pub text: String,
    pub matches: Vec<FieldMatch>,
}

impl LinePreview {
    pub fn is_match(&self) -> bool {
        !self.matches.is_empty()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagePreview {
    pub page_number: usize,
    pub lines: Vec<LinePreview>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub match_type: MatchType,
    /// Number of patterns tried. Zero means the preview is a plain
    /// dump of the page text.
    pub pattern_count: usize,
    pub pages: Vec<PagePreview>,
}

impl Preview {
    /// Reported lines that matched / did not match, across all pages.
    pub fn counts(&self) -> (usize, usize) {
        self.pages
            .iter()
            .flat_map(|p| &p.lines)
            .fold((0, 0), |(hit, miss), l| {
                if l.is_match() {
                    (hit + 1, miss)
                } else {
                    (hit, miss + 1)
                }
            })
    }
}

/// Try every pattern against each line of the pages inside `range` and
/// keep the lines selected by `match_type`. Pages outside the range are
/// ignored, so callers may pass the whole document.
pub fn preview(
    pages: &[PageContent],
    schema: &Schema,
    range: PageRange,
    match_type: MatchType,
) -> Preview {
    let pages = pages
        .iter()
        .filter(|p| range.contains(p.page_number))
        .map(|page| PagePreview {
            page_number: page.page_number,
            lines: page
                .lines
                .iter()
                .enumerate()
                .map(|(line_index, text)| LinePreview {
                    line_index,
                    text: text.clone(),
                    matches: schema.match_line(text),
                })
                .filter(|l| match_type.accepts(l.is_match()))
                .collect(),
        })
        .collect();

    Preview {
        match_type,
        pattern_count: schema.patterns().len(),
        pages,
    }
}
