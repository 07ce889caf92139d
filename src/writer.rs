//! Report serialization: CSV, JSON and YAML renderings

use crate::error::{ReportError, ReportResult};
use crate::types::{ReportTable, REPORT_COLUMNS};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write the report as UTF-8 CSV. The header row is written even when the
/// report has no rows.
pub fn write_csv<W: Write>(report: &ReportTable, writer: W) -> ReportResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(REPORT_COLUMNS)?;
    for row in report {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// CSV bytes of the report
pub fn report_to_csv(report: &ReportTable) -> ReportResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(report, &mut buffer)?;
    Ok(buffer)
}

/// Write the report to a CSV file
pub fn write_csv_file(report: &ReportTable, path: &Path) -> ReportResult<()> {
    let file = File::create(path)
        .map_err(|e| ReportError::Export(format!("Failed to create file: {}", e)))?;
    write_csv(report, file)?;
    info!(path = %path.display(), rows = report.len(), "CSV report written");
    Ok(())
}

pub fn report_to_json(report: &ReportTable) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

pub fn report_to_yaml(report: &ReportTable) -> ReportResult<String> {
    Ok(serde_yaml::to_string(report)?)
}
