//! Report assembly: one DuPont row per period with complete, usable figures

use super::dupont::{compute_dupont, zero_denominator};
use super::extractor::{locate_concepts, read_figures};
use super::layout::detect_layout;
use crate::error::{ReportError, ReportResult};
use crate::types::{
    DuPontResult, Layout, RawTable, ReportTable, COMPANY_COLUMN, CONCEPT_COLUMN, DEFAULT_COMPANY,
};
use tracing::{debug, info};

/// Shown when a table was read fine but no period produced a row
pub const EMPTY_REPORT_WARNING: &str = "No report could be produced: no period has complete \
     numeric figures with non-zero Ventas Netas, Activo Total and Capital Contable";

/// Build the report for `company` over every period of `layout`, in order.
///
/// A period missing any figure, with a zero sales, total assets or equity, or
/// whose ratios overflow, is skipped without an error. The result may be empty.
///
/// # Errors
///
/// [`ReportError::Structural`] when the layout has no concept column.
pub fn build_report(table: &RawTable, layout: &Layout, company: &str) -> ReportResult<ReportTable> {
    if !layout.has_concept_column {
        return Err(missing_concept_column());
    }

    let rows = locate_concepts(table);
    let mut report = ReportTable::new();

    for period in &layout.period_columns {
        let figures = read_figures(table, &rows, period);

        let (Some(sales), Some(net_income), Some(total_assets), Some(equity)) = (
            figures.sales_net,
            figures.net_income,
            figures.total_assets,
            figures.equity,
        ) else {
            debug!(period = %period, missing = ?figures.missing(), "skipping period");
            continue;
        };

        if let Some(denominator) = zero_denominator(sales, total_assets, equity) {
            debug!(period = %period, %denominator, "skipping period with zero denominator");
            continue;
        }

        let ratios = match compute_dupont(net_income, sales, total_assets, equity) {
            Ok(ratios) => ratios,
            Err(e) => {
                debug!(period = %period, error = %e, "skipping period");
                continue;
            }
        };
        report.push(DuPontResult {
            company: company.to_string(),
            period: period.clone(),
            sales_net: sales,
            net_income,
            total_assets,
            equity,
            profit_margin: ratios.profit_margin,
            asset_turnover: ratios.asset_turnover,
            leverage: ratios.leverage,
            roe: ratios.roe,
        });
    }

    Ok(report)
}

/// Company name for the report: the explicit one, else the first non-blank
/// text of an "Empresa" column, else a placeholder.
pub fn resolve_company(table: &RawTable, explicit: Option<&str>) -> String {
    if let Some(name) = explicit.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }

    table
        .column(COMPANY_COLUMN)
        .and_then(|column| {
            column
                .cells
                .iter()
                .filter_map(|cell| cell.as_text())
                .map(str::trim)
                .find(|s| !s.is_empty())
        })
        .unwrap_or(DEFAULT_COMPANY)
        .to_string()
}

/// Outcome of a full pipeline run
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub layout: Layout,
    pub company: String,
    pub report: ReportTable,
}

impl Analysis {
    /// Periods that did not produce a row
    pub fn skipped_periods(&self) -> Vec<&str> {
        self.layout
            .period_columns
            .iter()
            .map(String::as_str)
            .filter(|p| self.report.period(p).is_none())
            .collect()
    }
}

/// Layout detection, extraction and calculation over one table
///
/// # Errors
///
/// [`ReportError::Structural`] when the table has no "Concepto" column.
pub fn analyze(table: &RawTable, company: Option<&str>) -> ReportResult<Analysis> {
    let layout = detect_layout(table);
    if !layout.has_concept_column {
        return Err(missing_concept_column());
    }

    let company = resolve_company(table, company);
    let report = build_report(table, &layout, &company)?;
    info!(
        company = %company,
        periods = layout.period_columns.len(),
        rows = report.len(),
        "DuPont report built"
    );

    Ok(Analysis {
        layout,
        company,
        report,
    })
}

/// The structural error for a table without a "Concepto" column
pub fn missing_concept_column() -> ReportError {
    ReportError::Structural(format!(
        "expected a '{CONCEPT_COLUMN}' column (rows = concepts, columns = periods)"
    ))
}
