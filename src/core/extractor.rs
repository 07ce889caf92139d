//! Concept extraction: the four figures of one period

use crate::types::{CellValue, ConceptKey, Layout, PeriodFigures, RawTable, CONCEPT_COLUMN};
use tracing::warn;

/// Row index of each concept in the concept column. First match wins.
///
/// Rows whose label is not a known concept are ignored. A repeated label is
/// logged and the later rows are not used.
pub fn locate_concepts(table: &RawTable) -> [Option<usize>; 4] {
    let mut rows = [None; 4];
    let Some(labels) = table.column(CONCEPT_COLUMN) else {
        return rows;
    };

    for (row, cell) in labels.cells.iter().enumerate() {
        let Some(key) = cell.as_text().and_then(ConceptKey::from_label) else {
            continue;
        };
        let idx = concept_index(key);
        match rows[idx] {
            None => rows[idx] = Some(row),
            Some(first) => warn!(
                concept = key.label(),
                first_row = first,
                duplicate_row = row,
                "duplicate concept row, using the first one"
            ),
        }
    }
    rows
}

/// Look up the four figures for `period`.
///
/// Never fails: a missing concept row, a missing period column, or a blank or
/// non-numeric cell all come back as an absent figure.
pub fn extract_figures(table: &RawTable, layout: &Layout, period: &str) -> PeriodFigures {
    if !layout.has_concept_column {
        return PeriodFigures::default();
    }
    read_figures(table, &locate_concepts(table), period)
}

/// Read a period's figures from already located concept rows
pub(crate) fn read_figures(
    table: &RawTable,
    rows: &[Option<usize>; 4],
    period: &str,
) -> PeriodFigures {
    let mut figures = PeriodFigures::default();
    let Some(column) = table.column(period) else {
        return figures;
    };

    for key in ConceptKey::ALL {
        let value = rows[concept_index(key)]
            .and_then(|row| column.get(row))
            .and_then(CellValue::as_number);
        figures.set(key, value);
    }
    figures
}

fn concept_index(key: ConceptKey) -> usize {
    match key {
        ConceptKey::SalesNet => 0,
        ConceptKey::NetIncome => 1,
        ConceptKey::TotalAssets => 2,
        ConceptKey::Equity => 3,
    }
}
