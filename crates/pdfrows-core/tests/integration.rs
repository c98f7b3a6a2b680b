//! Integration tests for process_pdf() and preview_pdf().
//!
//! Uses a MockExtractor that returns pre-built PageContent without
//! invoking pdftotext, so these tests run without poppler-utils.

use pdfrows_core::config::{parse_config_str, validate_config};
use pdfrows_core::error::PdfRowsError;
use pdfrows_core::extraction::plain::PlainTextExtractor;
use pdfrows_core::extraction::{PageContent, PageRange, PdfExtractor};
use pdfrows_core::preview::MatchType;
use pdfrows_core::{extract_records, preview_pdf, process_pdf};
use std::path::{Path, PathBuf};

struct MockExtractor {
    pages: Vec<PageContent>,
}

impl PdfExtractor for MockExtractor {
    fn extract_pages(&self, _pdf_bytes: &[u8]) -> Result<Vec<PageContent>, PdfRowsError> {
        Ok(self.pages.clone())
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn page(number: usize, lines: &[&str]) -> PageContent {
    PageContent {
        page_number: number,
        lines: lines.iter().map(|s| s.to_string()).collect(),
    }
}

/// A placeholder input file; the mock ignores its contents.
fn dummy_pdf(dir: &Path) -> PathBuf {
    let path = dir.join("input.pdf");
    std::fs::write(&path, b"%PDF-1.4").unwrap();
    path
}

const COURT_CONFIG: &str = r#"{
    "fields": [
        { "name": "process", "pattern": "\\s+(\\d{7}-\\d{2}\\.\\d{4}\\.\\d\\.\\d{2}\\.\\d{4})" },
        { "name": "party", "pattern": "^Parte: (.+)$" },
        { "name": "value", "pattern": "Valor: R\\$ ([\\d.,]+)" }
    ],
    "delimiter_field": "process"
}"#;

fn court_pages() -> Vec<PageContent> {
    vec![
        page(
            1,
            &[
                "TRIBUNAL REGIONAL - PAUTA",
                "ID 0012345-99.2024.1.02.0001",
                "Parte: Maria da Silva",
                "Valor: R$ 1.500,00",
            ],
        ),
        page(
            2,
            &[
                "ID 0067890-11.2023.1.02.0002",
                "Parte: Joao Souza",
                "ID 0000001-01.2022.1.02.0003",
                "Valor: R$ 20,00",
            ],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Test 1: Single process number on one page
// ---------------------------------------------------------------------------
#[test]
fn single_process_number_yields_one_row() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dummy_pdf(dir.path());
    let csv = dir.path().join("out.csv");

    let config = parse_config_str(
        r#"{
            "fields": [{ "name": "process", "pattern": "\\s+(\\d{7}-\\d{2}\\.\\d{4}\\.\\d\\.\\d{2}\\.\\d{4})" }],
            "delimiter_field": "process"
        }"#,
    )
    .unwrap();
    let records = validate_config(&config).unwrap();
    let extractor = MockExtractor {
        pages: vec![page(1, &["ID 0012345-99.2024.1.02.0001"])],
    };

    let n = process_pdf(&pdf, &csv, &extractor, &records).unwrap();

    assert_eq!(n, 1);
    assert_eq!(
        std::fs::read_to_string(&csv).unwrap(),
        "process\n0012345-99.2024.1.02.0001\n"
    );
}

// ---------------------------------------------------------------------------
// Test 2: Records across pages, one per delimiter match
// ---------------------------------------------------------------------------
#[test]
fn delimiter_records_span_pages() {
    let records = validate_config(&parse_config_str(COURT_CONFIG).unwrap()).unwrap();
    let extractor = MockExtractor {
        pages: court_pages(),
    };

    let rows = extract_records(&[], &extractor, &records).unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].get("process"), Some("0012345-99.2024.1.02.0001"));
    assert_eq!(rows[0].get("party"), Some("Maria da Silva"));
    assert_eq!(rows[0].get("value"), Some("1.500,00"));
    assert_eq!(rows[1].get("party"), Some("Joao Souza"));
    assert_eq!(rows[1].get("value"), None);
    assert_eq!(rows[2].get("value"), Some("20,00"));
    for row in &rows {
        assert!(row.get("process").is_some());
    }
}

// ---------------------------------------------------------------------------
// Test 3: CSV output is deterministic across runs
// ---------------------------------------------------------------------------
#[test]
fn repeated_runs_are_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dummy_pdf(dir.path());
    let first = dir.path().join("first.csv");
    let second = dir.path().join("second.csv");

    let records = validate_config(&parse_config_str(COURT_CONFIG).unwrap()).unwrap();
    let extractor = MockExtractor {
        pages: court_pages(),
    };

    process_pdf(&pdf, &first, &extractor, &records).unwrap();
    process_pdf(&pdf, &second, &extractor, &records).unwrap();

    let a = std::fs::read(&first).unwrap();
    let b = std::fs::read(&second).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        String::from_utf8(a).unwrap(),
        "process,party,value\n\
         0012345-99.2024.1.02.0001,Maria da Silva,\"1.500,00\"\n\
         0067890-11.2023.1.02.0002,Joao Souza,\n\
         0000001-01.2022.1.02.0003,,\"20,00\"\n"
    );
}

// ---------------------------------------------------------------------------
// Test 4: Required-fields mode with a partial trailing record
// ---------------------------------------------------------------------------
#[test]
fn required_fields_mode_flushes_partial_record() {
    let config = parse_config_str(
        r#"{
            "fields": [
                { "name": "first_col", "pattern": "exemple (\\d+) splomx (.+)" },
                { "name": "code", "pattern": "code=(\\w+)" }
            ],
            "required_fields": ["first_col", "code"]
        }"#,
    )
    .unwrap();
    let records = validate_config(&config).unwrap();
    assert_eq!(
        records.schema().columns(),
        ["first_col_1", "first_col_2", "code"]
    );

    let extractor = MockExtractor {
        pages: vec![page(
            1,
            &[
                "exemple 42 splomx hello world",
                "code=A1",
                "exemple 7 splomx bye",
            ],
        )],
    };
    let rows = extract_records(&[], &extractor, &records).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("first_col_1"), Some("42"));
    assert_eq!(rows[0].get("first_col_2"), Some("hello world"));
    assert_eq!(rows[0].get("code"), Some("A1"));
    assert_eq!(rows[1].get("first_col_1"), Some("7"));
    assert_eq!(rows[1].get("code"), None);
}

// ---------------------------------------------------------------------------
// Test 5: Preview partitions the lines of the range
// ---------------------------------------------------------------------------
#[test]
fn preview_match_types_partition_lines() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = dummy_pdf(dir.path());
    let records = validate_config(&parse_config_str(COURT_CONFIG).unwrap()).unwrap();
    let extractor = MockExtractor {
        pages: court_pages(),
    };
    let range = PageRange::new(1, 1).unwrap();

    let run = |mt| preview_pdf(&pdf, &extractor, records.schema(), range, mt).unwrap();
    let success = run(MatchType::Success);
    let fail = run(MatchType::Fail);
    let both = run(MatchType::Both);

    assert_eq!(success.counts(), (3, 0));
    assert_eq!(fail.counts(), (0, 1));
    assert_eq!(both.counts(), (3, 1));
    assert_eq!(fail.pages[0].lines[0].text, "TRIBUNAL REGIONAL - PAUTA");
    assert!(both.pages.iter().all(|p| p.page_number == 1));
    assert!(!csv_written(dir.path()));
}

fn csv_written(dir: &Path) -> bool {
    std::fs::read_dir(dir)
        .unwrap()
        .any(|e| e.unwrap().path().extension().is_some_and(|x| x == "csv"))
}

// ---------------------------------------------------------------------------
// Test 6: Missing PDF fails before anything is written
// ---------------------------------------------------------------------------
#[test]
fn missing_pdf_is_io_error_and_keeps_old_output() {
    let dir = tempfile::tempdir().unwrap();
    let csv = dir.path().join("out.csv");
    std::fs::write(&csv, "previous run\n").unwrap();

    let records = validate_config(&parse_config_str(COURT_CONFIG).unwrap()).unwrap();
    let extractor = MockExtractor {
        pages: court_pages(),
    };

    let result = process_pdf(&dir.path().join("missing.pdf"), &csv, &extractor, &records);

    assert!(matches!(result, Err(PdfRowsError::PdfOpen { .. })));
    assert!(!result.unwrap_err().is_configuration_error());
    assert_eq!(std::fs::read_to_string(&csv).unwrap(), "previous run\n");
}

// ---------------------------------------------------------------------------
// Test 7: Bad regex is reported when the config is validated
// ---------------------------------------------------------------------------
#[test]
fn malformed_regex_is_configuration_error() {
    let config = parse_config_str(
        r#"{
            "fields": [{ "name": "broken", "pattern": "([0-9]+" }],
            "delimiter_field": "broken"
        }"#,
    )
    .unwrap();

    let err = validate_config(&config).unwrap_err();

    assert!(matches!(err, PdfRowsError::InvalidPattern { .. }));
    assert!(err.is_configuration_error());
}

// ---------------------------------------------------------------------------
// Test 8: Plain text backend with form-feed page breaks
// ---------------------------------------------------------------------------
#[test]
fn plain_text_backend_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("dump.txt");
    std::fs::write(
        &input,
        "ID 0012345-99.2024.1.02.0001\nParte: A\x0cID 0067890-11.2023.1.02.0002\x0c",
    )
    .unwrap();
    let csv = dir.path().join("nested.csv");

    let records = validate_config(&parse_config_str(COURT_CONFIG).unwrap()).unwrap();
    let n = process_pdf(&input, &csv, &PlainTextExtractor::new(), &records).unwrap();

    assert_eq!(n, 2);
    let preview = preview_pdf(
        &input,
        &PlainTextExtractor::new(),
        records.schema(),
        PageRange::new(2, 9).unwrap(),
        MatchType::Both,
    )
    .unwrap();
    assert_eq!(preview.pages.len(), 1);
    assert_eq!(preview.pages[0].page_number, 2);
}
