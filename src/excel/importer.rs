//! Excel importer implementation - workbook sheet → RawTable

use crate::error::{ReportError, ReportResult};
use crate::types::{CellValue, RawTable};
use calamine::{
    open_workbook_auto, open_workbook_auto_from_rs, Data, ExcelDateTime, Range, Reader, Sheets,
};
use chrono::Timelike;
use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::info;

/// Reads one worksheet of an .xlsx/.xlsm/.xls/.xlsb/.ods workbook.
///
/// Row 0 is the header row; every later row is data.
pub struct ExcelImporter {
    sheet: Option<String>,
}

impl ExcelImporter {
    /// Importer for the first worksheet
    pub fn new() -> Self {
        Self { sheet: None }
    }

    /// Importer for a named worksheet (falls back to the first one when `None`)
    pub fn with_sheet(sheet: Option<String>) -> Self {
        Self { sheet }
    }

    /// Import a workbook file
    pub fn import_path<P: AsRef<Path>>(&self, path: P) -> ReportResult<RawTable> {
        let path: PathBuf = path.as_ref().to_path_buf();
        let mut workbook = open_workbook_auto(&path).map_err(|e| {
            ReportError::Decode(format!("Failed to open '{}': {}", path.display(), e))
        })?;
        let table = self.import_workbook(&mut workbook)?;
        info!(
            path = %path.display(),
            columns = table.column_count(),
            rows = table.row_count(),
            "workbook imported"
        );
        Ok(table)
    }

    /// Import an uploaded workbook held in memory
    pub fn import_bytes(&self, bytes: &[u8]) -> ReportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
            .map_err(|e| ReportError::Decode(format!("Failed to open workbook: {}", e)))?;
        self.import_workbook(&mut workbook)
    }

    fn import_workbook<RS: Read + Seek>(&self, workbook: &mut Sheets<RS>) -> ReportResult<RawTable> {
        let sheet_names = workbook.sheet_names();
        let sheet_name = match &self.sheet {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(ReportError::Decode(format!(
                        "Sheet '{}' not found. Available sheets: {:?}",
                        name, sheet_names
                    )));
                }
                name.clone()
            }
            None => sheet_names
                .first()
                .cloned()
                .ok_or_else(|| ReportError::Decode("Workbook has no sheets".to_string()))?,
        };

        let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
            ReportError::Decode(format!("Failed to read sheet '{}': {}", sheet_name, e))
        })?;

        range_to_table(&range)
    }
}

impl Default for ExcelImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a worksheet range into a table, first row as header
pub fn range_to_table(range: &Range<Data>) -> ReportResult<RawTable> {
    let (height, width) = range.get_size();
    if range.is_empty() || height == 0 {
        return Ok(RawTable::new());
    }

    let raw_headers: Vec<String> = (0..width)
        .map(|col| header_name(range.get((0, col)), col))
        .collect();
    let headers = dedupe_headers(raw_headers);

    let rows: Vec<Vec<CellValue>> = (1..height)
        .map(|row| {
            (0..width)
                .map(|col| range.get((row, col)).map_or(CellValue::Empty, convert_cell))
                .collect()
        })
        .collect();

    RawTable::from_rows(headers, rows)
}

/// Convert a calamine cell to a table cell
pub fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Text(format_datetime(dt)),
        _ => CellValue::Empty,
    }
}

/// ISO text for a date-typed cell: `2023-12-31`, or with the time when it is
/// not midnight. Durations keep their serial value.
fn format_datetime(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        return dt.as_f64().to_string();
    }
    match dt.as_datetime() {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 => {
            datetime.format("%Y-%m-%d").to_string()
        }
        Some(datetime) => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => dt.as_f64().to_string(),
    }
}

/// Header text for a column; integral numbers lose their fraction (2023, not 2023.0)
fn header_name(cell: Option<&Data>, col: usize) -> String {
    let name = match cell {
        Some(Data::String(s)) => s.trim().to_string(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => format_header_number(*f),
        Some(Data::DateTime(dt)) => format_datetime(dt),
        Some(Data::DateTimeIso(s)) => s.trim().to_string(),
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    };
    if name.is_empty() {
        format!("Unnamed: {}", col)
    } else {
        name
    }
}

fn format_header_number(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        format!("{}", f as i64)
    } else {
        f.to_string()
    }
}

/// Make header names unique: repeats get `.1`, `.2`, ... suffixes
pub fn dedupe_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut result = Vec::with_capacity(headers.len());

    for name in headers {
        let mut candidate = name.clone();
        while seen.contains_key(&candidate) {
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            candidate = format!("{}.{}", name, count);
        }
        seen.insert(candidate.clone(), 0);
        result.push(candidate);
    }
    result
}
