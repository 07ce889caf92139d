use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label column marking the "concept rows / period columns" layout
pub const CONCEPT_COLUMN: &str = "Concepto";

/// Optional label column carrying the company name
pub const COMPANY_COLUMN: &str = "Empresa";

/// Company name used when neither the caller nor the sheet provides one
pub const DEFAULT_COMPANY: &str = "Empresa_1";

/// Output headers, in export order
pub const REPORT_COLUMNS: [&str; 10] = [
    "Empresa",
    "Periodo",
    "Ventas Netas",
    "Utilidad Neta",
    "Activo Total",
    "Capital Contable",
    "Margen_utilidad_neta",
    "Rotacion_activos",
    "Apalancamiento",
    "ROE",
];

//==============================================================================
// Raw Table (decoded spreadsheet)
//==============================================================================

/// A single decoded spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Numeric value of the cell. Text is never coerced and non-finite numbers
    /// count as missing.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct RawColumn {
    pub name: String,
    pub cells: Vec<CellValue>,
}

impl RawColumn {
    pub fn new(name: impl Into<String>, cells: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            cells,
        }
    }

    pub fn get(&self, row: usize) -> Option<&CellValue> {
        self.cells.get(row)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The parsed spreadsheet: ordered, uniquely named columns of equal length
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<RawColumn>,
}

impl RawTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header row and data rows. Short rows are padded
    /// with empty cells, extra cells are dropped.
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> ReportResult<Self> {
        let mut columns: Vec<Vec<CellValue>> = vec![Vec::with_capacity(rows.len()); headers.len()];
        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.push(cells.next().unwrap_or(CellValue::Empty));
            }
        }

        let mut table = Self::new();
        for (name, cells) in headers.into_iter().zip(columns) {
            table.push_column(RawColumn::new(name, cells))?;
        }
        Ok(table)
    }

    /// Append a column, keeping names unique and row counts uniform
    pub fn push_column(&mut self, column: RawColumn) -> ReportResult<()> {
        if self.column(&column.name).is_some() {
            return Err(ReportError::Validation(format!(
                "Duplicate column name '{}'",
                column.name
            )));
        }
        if let Some(first) = self.columns.first() {
            if first.len() != column.len() {
                return Err(ReportError::Validation(format!(
                    "Column '{}' has {} rows, expected {} rows",
                    column.name,
                    column.len(),
                    first.len()
                )));
            }
        }
        self.columns.push(column);
        Ok(())
    }

    /// Builder-style variant of [`RawTable::push_column`]
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        cells: Vec<CellValue>,
    ) -> ReportResult<Self> {
        self.push_column(RawColumn::new(name, cells))?;
        Ok(self)
    }

    pub fn column(&self, name: &str) -> Option<&RawColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn columns(&self) -> &[RawColumn] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, RawColumn::len)
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

//==============================================================================
// Layout
//==============================================================================

/// How to read a [`RawTable`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// A "Concepto" column exists: one row per concept, one column per period
    pub has_concept_column: bool,
    /// Reporting period columns, in source order
    pub period_columns: Vec<String>,
}

//==============================================================================
// Concepts
//==============================================================================

/// The four financial line items the decomposition needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConceptKey {
    SalesNet,
    NetIncome,
    TotalAssets,
    Equity,
}

/// The single mapping between concepts and the row labels used in sheets
pub const CONCEPT_LABELS: [(ConceptKey, &str); 4] = [
    (ConceptKey::SalesNet, "Ventas Netas"),
    (ConceptKey::NetIncome, "Utilidad Neta"),
    (ConceptKey::TotalAssets, "Activo Total"),
    (ConceptKey::Equity, "Capital Contable"),
];

impl ConceptKey {
    pub const ALL: [ConceptKey; 4] = [
        ConceptKey::SalesNet,
        ConceptKey::NetIncome,
        ConceptKey::TotalAssets,
        ConceptKey::Equity,
    ];

    /// Row label of this concept
    pub fn label(self) -> &'static str {
        CONCEPT_LABELS
            .iter()
            .find(|(key, _)| *key == self)
            .map_or("", |(_, label)| label)
    }

    /// Concept for a row label; surrounding whitespace is ignored
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        CONCEPT_LABELS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(key, _)| *key)
    }
}

impl fmt::Display for ConceptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The figures found for one period. `None` means missing, blank or non-numeric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodFigures {
    pub sales_net: Option<f64>,
    pub net_income: Option<f64>,
    pub total_assets: Option<f64>,
    pub equity: Option<f64>,
}

impl PeriodFigures {
    pub fn get(&self, key: ConceptKey) -> Option<f64> {
        match key {
            ConceptKey::SalesNet => self.sales_net,
            ConceptKey::NetIncome => self.net_income,
            ConceptKey::TotalAssets => self.total_assets,
            ConceptKey::Equity => self.equity,
        }
    }

    pub fn set(&mut self, key: ConceptKey, value: Option<f64>) {
        let slot = match key {
            ConceptKey::SalesNet => &mut self.sales_net,
            ConceptKey::NetIncome => &mut self.net_income,
            ConceptKey::TotalAssets => &mut self.total_assets,
            ConceptKey::Equity => &mut self.equity,
        };
        *slot = value;
    }

    pub fn is_complete(&self) -> bool {
        ConceptKey::ALL.iter().all(|k| self.get(*k).is_some())
    }

    /// Concepts with no usable value
    pub fn missing(&self) -> Vec<ConceptKey> {
        ConceptKey::ALL
            .into_iter()
            .filter(|k| self.get(*k).is_none())
            .collect()
    }
}

//==============================================================================
// DuPont Results
//==============================================================================

/// A ratio denominator that must be non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denominator {
    Sales,
    TotalAssets,
    Equity,
}

impl fmt::Display for Denominator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let concept = match self {
            Denominator::Sales => ConceptKey::SalesNet,
            Denominator::TotalAssets => ConceptKey::TotalAssets,
            Denominator::Equity => ConceptKey::Equity,
        };
        write!(f, "{}", concept.label())
    }
}

/// The three DuPont factors and their product
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DuPontRatios {
    pub profit_margin: f64,
    pub asset_turnover: f64,
    pub leverage: f64,
    pub roe: f64,
}

/// One report row: the raw figures of a (company, period) and its ratios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuPontResult {
    #[serde(rename = "Empresa")]
    pub company: String,
    #[serde(rename = "Periodo")]
    pub period: String,
    #[serde(rename = "Ventas Netas")]
    pub sales_net: f64,
    #[serde(rename = "Utilidad Neta")]
    pub net_income: f64,
    #[serde(rename = "Activo Total")]
    pub total_assets: f64,
    #[serde(rename = "Capital Contable")]
    pub equity: f64,
    #[serde(rename = "Margen_utilidad_neta")]
    pub profit_margin: f64,
    #[serde(rename = "Rotacion_activos")]
    pub asset_turnover: f64,
    #[serde(rename = "Apalancamiento")]
    pub leverage: f64,
    #[serde(rename = "ROE")]
    pub roe: f64,
}

impl DuPontResult {
    pub fn ratios(&self) -> DuPontRatios {
        DuPontRatios {
            profit_margin: self.profit_margin,
            asset_turnover: self.asset_turnover,
            leverage: self.leverage,
            roe: self.roe,
        }
    }
}

/// Ordered report rows, one per successfully computed period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReportTable {
    rows: Vec<DuPontResult>,
}

impl ReportTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: DuPontResult) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[DuPontResult] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DuPontResult> {
        self.rows.iter()
    }

    /// Row for a period identifier
    pub fn period(&self, period: &str) -> Option<&DuPontResult> {
        self.rows.iter().find(|r| r.period == period)
    }

    pub fn periods(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.period.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl<'a> IntoIterator for &'a ReportTable {
    type Item = &'a DuPontResult;
    type IntoIter = std::slice::Iter<'a, DuPontResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
