//! DuPont Forge - Return on Equity decomposition for spreadsheet financial statements
//!
//! Reads a sheet laid out as "concept rows / period columns" (a `Concepto`
//! column with `Ventas Netas`, `Utilidad Neta`, `Activo Total` and
//! `Capital Contable`, one column per period) and computes, per period:
//!
//! - profit margin = net income / sales
//! - asset turnover = sales / total assets
//! - financial leverage = total assets / equity
//! - ROE = the product of the three
//!
//! Periods with a missing figure or a zero denominator are left out of the
//! report. A sheet without a `Concepto` column is rejected.
//!
//! # Example
//!
//! ```no_run
//! use dupont_forge::core::analyze;
//! use dupont_forge::excel::ExcelExporter;
//! use dupont_forge::loader::load_table;
//! use std::path::Path;
//!
//! let table = load_table(Path::new("estados.xlsx"), None)?;
//! let analysis = analyze(&table, Some("ACME"))?;
//!
//! for row in &analysis.report {
//!     println!("{}: ROE {:.4}", row.period, row.roe);
//! }
//! ExcelExporter::new(&analysis.report).export(Path::new("dupont_reporte.xlsx"))?;
//! # Ok::<(), dupont_forge::error::ReportError>(())
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod error;
pub mod excel;
pub mod loader;
pub mod logging;
pub mod types;
pub mod writer;

// Re-export commonly used types
pub use error::{ReportError, ReportResult};
pub use types::{
    CellValue, ConceptKey, DuPontRatios, DuPontResult, Layout, PeriodFigures, RawTable,
    ReportTable,
};
