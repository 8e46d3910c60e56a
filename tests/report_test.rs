//! Workbook layout, read back with calamine

use calamine::{Data, Reader, Xlsx, open_workbook};
use serpsheet::pdf::ExtractedTable;
use serpsheet::report::{FailureReason, LinkOutcome, ProcessedLink, ReportAssembler};

fn sheet_names(path: &std::path::Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names()
}

fn sheet_rows(path: &std::path::Path, name: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(name).unwrap();
    range.rows().map(<[Data]>::to_vec).collect()
}

fn table() -> ExtractedTable {
    ExtractedTable {
        columns: vec!["Region".into(), "Revenue".into()],
        rows: vec![
            vec!["North".into(), "1200.5".into()],
            vec!["South".into(), "n/a".into()],
        ],
    }
}

#[test]
fn test_create_writes_single_empty_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");

    let assembler = ReportAssembler::create(&path).unwrap();
    assert!(path.exists());
    assert_eq!(sheet_names(&path).len(), 1);

    let report = assembler.finish(Vec::new()).unwrap();
    assert!(report.is_empty());
    assert_eq!(sheet_names(&path).len(), 1);
}

#[test]
fn test_table_sheets_precede_results() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");
    let mut assembler = ReportAssembler::create(&path).unwrap();

    let sheet = assembler.add_table_sheet(2, &table()).unwrap();
    let links = vec![
        ProcessedLink::new("https://a.example/", LinkOutcome::TextExtracted("Hello\nWorld".into())),
        ProcessedLink::new("https://b.example/t.pdf", LinkOutcome::TableFound(sheet)),
        ProcessedLink::new(
            "https://c.example/x.pdf",
            LinkOutcome::Failure(FailureReason::NoTable),
        ),
    ];
    let report = assembler.finish(links).unwrap();
    assert_eq!(report.table_sheets, 1);
    assert_eq!(report.failures(), 1);

    assert_eq!(sheet_names(&path), vec!["2".to_string(), "Results".to_string()]);

    let table_rows = sheet_rows(&path, "2");
    assert_eq!(
        table_rows[0],
        vec![Data::String("Region".into()), Data::String("Revenue".into())]
    );
    assert_eq!(
        table_rows[1],
        vec![Data::String("North".into()), Data::Float(1200.5)]
    );
    assert_eq!(table_rows[2][1], Data::String("n/a".into()));

    let results = sheet_rows(&path, "Results");
    assert_eq!(results.len(), 4);
    assert_eq!(
        results[0],
        vec![Data::String("links".into()), Data::String("Web link text".into())]
    );
    assert_eq!(results[1][1], Data::String("Hello\nWorld".into()));
    assert_eq!(
        results[2][1],
        Data::String("Refer to sheet 2 for table data".into())
    );
    assert_eq!(
        results[3][1],
        Data::String("No Table data found/Unable to get table data".into())
    );
}

#[test]
fn test_oversized_text_is_truncated_to_cell_limit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output.xlsx");
    let assembler = ReportAssembler::create(&path).unwrap();

    let long_text = "é".repeat(40_000);
    assembler
        .finish(vec![ProcessedLink::new(
            "https://long.example/",
            LinkOutcome::TextExtracted(long_text),
        )])
        .unwrap();

    let results = sheet_rows(&path, "Results");
    let Data::String(text) = &results[1][1] else {
        panic!("expected a string cell");
    };
    assert_eq!(text.chars().count(), 32_767);
}

#[test]
fn test_create_makes_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("output.xlsx");
    ReportAssembler::create(&path).unwrap();
    assert!(path.exists());
}
