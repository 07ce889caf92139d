//! Table loading: pick a decoder from the input kind and produce a RawTable

use crate::error::{ReportError, ReportResult};
use crate::excel::{dedupe_headers, ExcelImporter};
use crate::types::{CellValue, RawTable};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Supported input containers. Deserializes through [`FromStr`], so every
/// workbook extension names the workbook decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum InputFormat {
    /// Any workbook calamine can open (.xlsx, .xlsm, .xls, .xlsb, .ods)
    #[default]
    Workbook,
    Csv,
}

impl InputFormat {
    /// Guess from the file extension; anything but `.csv` is a workbook
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => InputFormat::Csv,
            _ => InputFormat::Workbook,
        }
    }
}

impl FromStr for InputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(InputFormat::Csv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" | "excel" | "workbook" => {
                Ok(InputFormat::Workbook)
            }
            other => Err(ReportError::Validation(format!(
                "Unknown input format '{}'. Expected 'xlsx' or 'csv'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for InputFormat {
    type Error = ReportError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Load a file, choosing the decoder from its extension
pub fn load_table(path: &Path, sheet: Option<&str>) -> ReportResult<RawTable> {
    match InputFormat::from_path(path) {
        InputFormat::Csv => {
            let file = std::fs::File::open(path).map_err(|e| {
                ReportError::Decode(format!("Failed to open '{}': {}", path.display(), e))
            })?;
            read_csv_table(file)
        }
        InputFormat::Workbook => {
            ExcelImporter::with_sheet(sheet.map(str::to_string)).import_path(path)
        }
    }
}

/// Load an uploaded file held in memory
pub fn load_table_bytes(
    bytes: &[u8],
    format: InputFormat,
    sheet: Option<&str>,
) -> ReportResult<RawTable> {
    match format {
        InputFormat::Csv => read_csv_table(bytes),
        InputFormat::Workbook => {
            ExcelImporter::with_sheet(sheet.map(str::to_string)).import_bytes(bytes)
        }
    }
}

/// Decode CSV with a header row. Blank cells are empty, cells that parse as
/// numbers are numeric, everything else is text.
pub fn read_csv_table<R: Read>(reader: R) -> ReportResult<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| ReportError::Decode(format!("Failed to read CSV header: {}", e)))?
        .iter()
        .enumerate()
        .map(|(idx, h)| {
            let name = h.trim_start_matches('\u{feff}').trim();
            if name.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record =
            record.map_err(|e| ReportError::Decode(format!("Failed to read CSV row: {}", e)))?;
        rows.push(record.iter().map(parse_csv_cell).collect());
    }

    RawTable::from_rows(dedupe_headers(headers), rows)
}

fn parse_csv_cell(field: &str) -> CellValue {
    let field = field.trim();
    if field.is_empty() {
        return CellValue::Empty;
    }
    match field.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::Text(field.to_string()),
    }
}
