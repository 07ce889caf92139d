use super::*;
use crate::error::ReportError;
use crate::excel::ExcelImporter;
use std::fs;
use tempfile::TempDir;

// =========================================================================
// Formatting Tests
// =========================================================================

#[test]
fn test_format_number_integer() {
    assert_eq!(format_number(100.0), "100");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(-50.0), "-50");
}

#[test]
fn test_format_number_decimal() {
    assert_eq!(format_number(2.5), "2.5");
    assert_eq!(format_number(0.123456789), "0.123457");
}

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(0.05), "5.00%");
    assert_eq!(format_percent(-0.125), "-12.50%");
}

// =========================================================================
// Command Tests
// =========================================================================

const VALID_CSV: &str = "Concepto,2023,2024\n\
                         Ventas Netas,1000,0\n\
                         Utilidad Neta,100,50\n\
                         Activo Total,5000,4000\n\
                         Capital Contable,2000,1800\n";

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_analyze_writes_exports() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.csv", VALID_CSV);
    let csv_out = dir.path().join("out.csv");
    let xlsx_out = dir.path().join("out.xlsx");

    let options = AnalyzeOptions {
        company: Some("ACME".to_string()),
        csv: Some(csv_out.clone()),
        xlsx: Some(xlsx_out.clone()),
        ..AnalyzeOptions::default()
    };
    analyze(input, options).unwrap();

    let csv = fs::read_to_string(&csv_out).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().starts_with("ACME,2023,"));

    let table = ExcelImporter::new().import_path(&xlsx_out).unwrap();
    assert_eq!(table.row_count(), 1);
    assert!(table.has_column("Apalancamiento"));
}

#[test]
fn test_analyze_empty_report_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = write_input(
        &dir,
        "input.csv",
        "Concepto,2024\nVentas Netas,0\nUtilidad Neta,1\nActivo Total,1\nCapital Contable,1\n",
    );
    let csv_out = dir.path().join("out.csv");

    let options = AnalyzeOptions {
        csv: Some(csv_out.clone()),
        ..AnalyzeOptions::default()
    };
    assert!(analyze(input, options).is_ok());
    assert!(!csv_out.exists());
}

#[test]
fn test_analyze_missing_concept_column() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.csv", "Empresa,2023\nACME,1000\n");

    let result = analyze(input, AnalyzeOptions::default());
    assert!(matches!(result, Err(ReportError::Structural(_))));
}

#[test]
fn test_analyze_missing_file() {
    let result = analyze(
        PathBuf::from("/nonexistent/input.xlsx"),
        AnalyzeOptions::default(),
    );
    assert!(matches!(result, Err(ReportError::Decode(_))));
}

#[test]
fn test_layout_command() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "input.csv", VALID_CSV);
    assert!(layout(input, None).is_ok());

    let input = write_input(&dir, "flat.csv", "Periodo,Ventas\n2023,1\n");
    assert!(matches!(
        layout(input, None),
        Err(ReportError::Structural(_))
    ));
}

#[test]
fn test_compute_command() {
    assert!(compute(100.0, 1000.0, 5000.0, 2000.0).is_ok());
    assert!(matches!(
        compute(100.0, 1000.0, 5000.0, 0.0),
        Err(ReportError::DivisionByZero(_))
    ));
}
