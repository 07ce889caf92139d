//! Excel import/export tests

use calamine::{open_workbook_auto, Data, Reader};
use dupont_forge::core::analyze;
use dupont_forge::error::ReportError;
use dupont_forge::excel::{ExcelExporter, ExcelImporter, REPORT_SHEET};
use dupont_forge::loader::{load_table, load_table_bytes, InputFormat};
use dupont_forge::types::{CellValue, ReportTable, REPORT_COLUMNS};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use std::path::Path;
use tempfile::TempDir;

/// Concept rows / period columns workbook, periods as numeric headers
fn write_statements(path: &Path, sheet_name: &str) {
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("Notas").unwrap();
    notes.write_string(0, 0, "Estados financieros").unwrap();

    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();
    sheet.write_string(0, 0, "Concepto").unwrap();
    sheet.write_number(0, 1, 2023).unwrap();
    sheet.write_number(0, 2, 2024).unwrap();

    let rows: [(&str, f64, Option<f64>); 4] = [
        ("Ventas Netas", 1000.0, Some(0.0)),
        ("Utilidad Neta", 100.0, Some(50.0)),
        ("Activo Total", 5000.0, Some(4000.0)),
        ("Capital Contable", 2000.0, None),
    ];
    for (idx, (label, y2023, y2024)) in rows.iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, *label).unwrap();
        sheet.write_number(row, 1, *y2023).unwrap();
        if let Some(v) = y2024 {
            sheet.write_number(row, 2, *v).unwrap();
        }
    }

    workbook.save(path).unwrap();
}

fn single_sheet_bytes() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Concepto").unwrap();
    sheet.write_string(0, 1, "FY2023").unwrap();
    sheet.write_string(1, 0, "Ventas Netas").unwrap();
    sheet.write_number(1, 1, 800.0).unwrap();
    sheet.write_string(2, 0, "Utilidad Neta").unwrap();
    sheet.write_number(2, 1, 80.0).unwrap();
    sheet.write_string(3, 0, "Activo Total").unwrap();
    sheet.write_number(3, 1, 1600.0).unwrap();
    sheet.write_string(4, 0, "Capital Contable").unwrap();
    sheet.write_number(4, 1, 400.0).unwrap();
    workbook.save_to_buffer().unwrap()
}

// ═══════════════════════════════════════════════════════════════════════════
// IMPORTER TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_import_named_sheet_with_numeric_headers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("estados.xlsx");
    write_statements(&path, "Balance");

    let table = ExcelImporter::with_sheet(Some("Balance".to_string()))
        .import_path(&path)
        .unwrap();

    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["Concepto", "2023", "2024"]
    );
    assert_eq!(table.row_count(), 4);
    assert_eq!(
        table.column("2023").unwrap().cells[0],
        CellValue::Number(1000.0)
    );
    assert_eq!(table.column("2024").unwrap().cells[3], CellValue::Empty);
}

#[test]
fn test_import_defaults_to_first_sheet() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("estados.xlsx");
    write_statements(&path, "Balance");

    let table = ExcelImporter::new().import_path(&path).unwrap();
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        vec!["Estados financieros"]
    );

    // The notes sheet has no concept column
    assert!(matches!(
        analyze(&table, None),
        Err(ReportError::Structural(_))
    ));
}

#[test]
fn test_import_unknown_sheet_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("estados.xlsx");
    write_statements(&path, "Balance");

    let err = ExcelImporter::with_sheet(Some("Resultados".to_string()))
        .import_path(&path)
        .unwrap_err();
    assert!(matches!(err, ReportError::Decode(_)));
    assert!(err.to_string().contains("Resultados"));
}

#[test]
fn test_import_bytes() {
    let table = ExcelImporter::new()
        .import_bytes(&single_sheet_bytes())
        .unwrap();
    let analysis = analyze(&table, Some("ACME")).unwrap();

    assert_eq!(analysis.report.periods(), vec!["FY2023"]);
    let row = &analysis.report.rows()[0];
    assert!((row.roe - 0.2).abs() < 1e-12);
}

#[test]
fn test_load_table_bytes_dispatch() {
    let table = load_table_bytes(&single_sheet_bytes(), InputFormat::Workbook, None).unwrap();
    assert!(table.has_column("FY2023"));

    let table = load_table_bytes(
        b"Concepto,2023\nVentas Netas,1\n",
        InputFormat::Csv,
        None,
    )
    .unwrap();
    assert!(table.has_column("2023"));
}

#[test]
fn test_load_table_garbage_workbook_is_decode_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"this is not a zip archive").unwrap();

    assert!(matches!(
        load_table(&path, None),
        Err(ReportError::Decode(_))
    ));
}

// ═══════════════════════════════════════════════════════════════════════════
// END-TO-END: IMPORT → ANALYZE → EXPORT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_date_headers_become_iso_periods() {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Concepto").unwrap();
    for (col, (year, month, day)) in [(2023, 12, 31), (2024, 6, 30)].into_iter().enumerate() {
        let date = ExcelDateTime::from_ymd(year, month, day).unwrap();
        sheet
            .write_datetime_with_format(0, col as u16 + 1, &date, &date_format)
            .unwrap();
    }
    for (row, label) in ["Ventas Netas", "Utilidad Neta", "Activo Total", "Capital Contable"]
        .into_iter()
        .enumerate()
    {
        let row = row as u32 + 1;
        sheet.write_string(row, 0, label).unwrap();
        sheet.write_number(row, 1, 100.0 * f64::from(row)).unwrap();
        sheet.write_number(row, 2, 200.0 * f64::from(row)).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();

    let table = ExcelImporter::new().import_bytes(&bytes).unwrap();
    assert_eq!(
        table.column_names().collect::<Vec<_>>(),
        ["Concepto", "2023-12-31", "2024-06-30"]
    );

    let analysis = analyze(&table, None).unwrap();
    assert_eq!(analysis.layout.period_columns, vec!["2023-12-31", "2024-06-30"]);
    let periods: Vec<&str> = analysis.report.iter().map(|r| r.period.as_str()).collect();
    assert_eq!(periods, ["2023-12-31", "2024-06-30"]);
}

#[test]
fn test_import_analyze_export() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("estados.xlsx");
    let output = dir.path().join("dupont_reporte.xlsx");
    write_statements(&input, "Balance");

    let table = load_table(&input, Some("Balance")).unwrap();
    let analysis = analyze(&table, Some("ACME")).unwrap();
    assert_eq!(analysis.report.periods(), vec!["2023"]);

    ExcelExporter::new(&analysis.report).export(&output).unwrap();

    let mut workbook = open_workbook_auto(&output).unwrap();
    assert_eq!(workbook.sheet_names(), vec![REPORT_SHEET.to_string()]);

    let range = workbook.worksheet_range(REPORT_SHEET).unwrap();
    assert_eq!(range.get_size(), (2, REPORT_COLUMNS.len()));

    let header: Vec<String> = (0..REPORT_COLUMNS.len())
        .map(|col| range.get((0, col)).unwrap().to_string())
        .collect();
    assert_eq!(header, REPORT_COLUMNS.to_vec());

    assert_eq!(range.get((1, 0)), Some(&Data::String("ACME".to_string())));
    assert_eq!(range.get((1, 1)), Some(&Data::String("2023".to_string())));
    assert_eq!(range.get((1, 2)), Some(&Data::Float(1000.0)));
    match range.get((1, 9)) {
        Some(Data::Float(roe)) => assert!((roe - 0.05).abs() < 1e-12),
        other => panic!("expected ROE number, got {:?}", other),
    }
}

#[test]
fn test_export_empty_report_has_header_only() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("empty.xlsx");

    let report = ReportTable::new();
    ExcelExporter::new(&report).export(&output).unwrap();

    let mut workbook = open_workbook_auto(&output).unwrap();
    let range = workbook.worksheet_range(REPORT_SHEET).unwrap();
    assert_eq!(range.get_size(), (1, REPORT_COLUMNS.len()));
}

#[test]
fn test_export_to_unwritable_path_fails() {
    let report = ReportTable::new();
    let result = ExcelExporter::new(&report).export(Path::new("/nonexistent/dir/out.xlsx"));
    assert!(matches!(result, Err(ReportError::Export(_))));
}
