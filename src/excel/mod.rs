//! Excel import/export
//!
//! - Import: workbook sheet (.xlsx, .xlsm, .xls, .xlsb, .ods) → RawTable
//! - Export: ReportTable → .xlsx with a single "DuPont" sheet

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, REPORT_SHEET};
pub use importer::{convert_cell, dedupe_headers, range_to_table, ExcelImporter};
