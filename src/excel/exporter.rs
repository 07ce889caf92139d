//! Excel exporter implementation - ReportTable → .xlsx

use crate::error::{ReportError, ReportResult};
use crate::types::{ReportTable, REPORT_COLUMNS};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::info;

/// Worksheet holding the report
pub const REPORT_SHEET: &str = "DuPont";

/// Excel exporter for DuPont reports
pub struct ExcelExporter<'a> {
    report: &'a ReportTable,
}

impl<'a> ExcelExporter<'a> {
    pub fn new(report: &'a ReportTable) -> Self {
        Self { report }
    }

    /// Export the report to an .xlsx file
    pub fn export(&self, output_path: &Path) -> ReportResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| ReportError::Export(format!("Failed to save Excel file: {}", e)))?;
        info!(path = %output_path.display(), rows = self.report.len(), "Excel report written");
        Ok(())
    }

    /// Export the report to in-memory .xlsx bytes
    pub fn to_bytes(&self) -> ReportResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save_to_buffer()
            .map_err(|e| ReportError::Export(format!("Failed to build Excel file: {}", e)))
    }

    fn build_workbook(&self) -> ReportResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(REPORT_SHEET)
            .map_err(|e| ReportError::Export(format!("Failed to set worksheet name: {}", e)))?;

        self.write_header(worksheet)?;
        self.write_rows(worksheet)?;
        Ok(workbook)
    }

    fn write_header(&self, worksheet: &mut Worksheet) -> ReportResult<()> {
        let header_format = Format::new().set_bold();
        for (col, name) in REPORT_COLUMNS.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, *name, &header_format)
                .map_err(|e| ReportError::Export(format!("Failed to write header: {}", e)))?;
            worksheet
                .set_column_width(col as u16, column_width(name))
                .map_err(|e| ReportError::Export(format!("Failed to size column: {}", e)))?;
        }
        Ok(())
    }

    fn write_rows(&self, worksheet: &mut Worksheet) -> ReportResult<()> {
        for (idx, row) in self.report.iter().enumerate() {
            let excel_row = (idx + 1) as u32; // +1 for header row

            worksheet
                .write_string(excel_row, 0, &row.company)
                .map_err(|e| ReportError::Export(format!("Failed to write text: {}", e)))?;
            worksheet
                .write_string(excel_row, 1, &row.period)
                .map_err(|e| ReportError::Export(format!("Failed to write text: {}", e)))?;

            let numbers = [
                row.sales_net,
                row.net_income,
                row.total_assets,
                row.equity,
                row.profit_margin,
                row.asset_turnover,
                row.leverage,
                row.roe,
            ];
            for (offset, value) in numbers.into_iter().enumerate() {
                worksheet
                    .write_number(excel_row, (offset + 2) as u16, value)
                    .map_err(|e| ReportError::Export(format!("Failed to write number: {}", e)))?;
            }
        }
        Ok(())
    }
}

fn column_width(header: &str) -> f64 {
    (header.chars().count() as f64 + 2.0).max(12.0)
}
