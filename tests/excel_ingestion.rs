#![cfg(feature = "excel_test_writer")]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use rust_xlsxwriter::{Workbook, Worksheet};

use oews_explorer::ingestion::excel::{ingest_excel_from_path, ingest_excel_workbook_from_path};
use oews_explorer::ingestion::{load_dataset, ExcelSheetSelection, IngestionOptions};
use oews_explorer::schema::{self, raw_schema, Categorical};
use oews_explorer::types::Value;

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("oews-explorer-{name}-{nanos}.xlsx"))
}

enum Cell {
    Text(&'static str),
    Number(f64),
}

/// Writes the raw OEWS header on the second row (the first is left empty) followed by one row
/// per `(area, state, occupation, a_mean)`. NAICS is written as a number.
fn write_sheet(ws: &mut Worksheet, rows: &[(&str, &str, &str, Cell)]) {
    let header: Vec<String> = raw_schema().field_names().map(str::to_string).collect();
    for (col, name) in header.iter().enumerate() {
        ws.write_string(1, col as u16, name.as_str()).unwrap();
    }

    for (i, (area, state, occ, a_mean)) in rows.iter().enumerate() {
        let row = (i + 2) as u32;
        for (col, name) in header.iter().enumerate() {
            let col = col as u16;
            let written = match name.as_str() {
                schema::AREA_TITLE => ws.write_string(row, col, *area),
                schema::PRIM_STATE => ws.write_string(row, col, *state),
                schema::OCC_TITLE => ws.write_string(row, col, *occ),
                schema::NAICS => ws.write_number(row, col, 622_000),
                schema::NAICS_TITLE => ws.write_string(row, col, "Hospitals"),
                schema::A_MEAN => match a_mean {
                    Cell::Text(s) => ws.write_string(row, col, *s),
                    Cell::Number(v) => ws.write_number(row, col, *v),
                },
                schema::TOT_EMP => ws.write_number(row, col, 1_000),
                _ if schema::is_identifier(name) => ws.write_string(row, col, "x"),
                // Leave the remaining measures blank.
                _ => continue,
            };
            written.unwrap();
        }
    }
}

fn write_single_sheet(path: &PathBuf) {
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.set_name("All May 2024 data").unwrap();
    write_sheet(
        ws,
        &[
            ("U.S.", "US", "Registered Nurses", Cell::Number(97_970.0)),
            ("Ohio", "OH", "Registered Nurses", Cell::Text("**")),
            ("California", "CA", "Registered Nurses", Cell::Text("137,690")),
        ],
    );
    wb.save(path).unwrap();
}

fn write_multi_sheet(path: &PathBuf) {
    let mut wb = Workbook::new();
    let ws1 = wb.add_worksheet();
    ws1.set_name("National").unwrap();
    write_sheet(ws1, &[("U.S.", "US", "Actors", Cell::Text("*"))]);
    let ws2 = wb.add_worksheet();
    ws2.set_name("State").unwrap();
    write_sheet(
        ws2,
        &[
            ("Ohio", "OH", "Actors", Cell::Text("*")),
            ("Texas", "TX", "Actors", Cell::Number(48_000.0)),
        ],
    );
    wb.save(path).unwrap();
}

#[test]
fn ingest_excel_skips_leading_empty_rows() {
    let path = tmp_file("single");
    write_single_sheet(&path);

    let ds = ingest_excel_from_path(&path, None, &raw_schema()).unwrap();
    assert_eq!(ds.row_count(), 3);

    let idx = |name: &str| ds.schema.index_of(name).unwrap();
    assert_eq!(ds.rows[0][idx(schema::NAICS)], Value::Utf8("622000".to_string()));
    assert_eq!(ds.rows[0][idx(schema::A_MEAN)], Value::Float64(97_970.0));
    assert_eq!(ds.rows[1][idx(schema::A_MEAN)], Value::Utf8("**".to_string()));
    assert_eq!(ds.rows[0][idx(schema::JOBS_1000)], Value::Null);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn load_dataset_from_workbook() {
    let path = tmp_file("load");
    write_single_sheet(&path);

    let ds = load_dataset(&path, &IngestionOptions::default()).unwrap();
    let wages: Vec<Option<f64>> = ds.records().iter().map(|r| r.a_mean).collect();
    assert_eq!(wages, vec![Some(97_970.0), None, Some(137_690.0)]);
    assert_eq!(ds.normalization_report().suppressed_total(), 1);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_errors_on_missing_sheet_columns() {
    let path = tmp_file("missing");
    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();
    ws.write_string(0, 0, "OCC_TITLE").unwrap();
    ws.write_string(1, 0, "Actors").unwrap();
    wb.save(&path).unwrap();

    let err = ingest_excel_from_path(&path, None, &raw_schema()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("sheet 'Sheet1'"));
    assert!(msg.contains("TOT_EMP"));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_multi_tab_all_sheets_concatenates_rows() {
    let path = tmp_file("all-sheets");
    write_multi_sheet(&path);

    let ds = ingest_excel_workbook_from_path(&path, None, &raw_schema()).unwrap();
    assert_eq!(ds.row_count(), 3);

    let opts = IngestionOptions {
        excel_sheet_selection: ExcelSheetSelection::AllSheets,
        ..Default::default()
    };
    let loaded = load_dataset(&path, &opts).unwrap();
    assert_eq!(loaded.distinct_values(Categorical::PrimState), ["OH", "TX", "US"]);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_excel_multi_tab_selected_sheet_only() {
    let path = tmp_file("one-sheet");
    write_multi_sheet(&path);

    let opts = IngestionOptions {
        excel_sheet_selection: ExcelSheetSelection::Sheet("State".to_string()),
        ..Default::default()
    };
    let ds = load_dataset(&path, &opts).unwrap();
    assert_eq!(ds.len(), 2);
    assert!(ds.records().iter().all(|r| !r.is_national()));

    let _ = std::fs::remove_file(&path);
}
