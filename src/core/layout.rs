//! Layout detection: which columns are periods, and is there a concept column

use crate::types::{Layout, RawTable, COMPANY_COLUMN, CONCEPT_COLUMN};

/// Decide how to read a table from its column names.
///
/// Never fails. A table whose only columns are labels yields an empty
/// `period_columns`, which downstream simply turns into an empty report.
pub fn detect_layout(table: &RawTable) -> Layout {
    let has_concept_column = table.has_column(CONCEPT_COLUMN);

    let period_columns = table
        .column_names()
        .filter(|name| !is_label_column(name))
        .map(str::to_string)
        .collect();

    Layout {
        has_concept_column,
        period_columns,
    }
}

/// Label columns are never reporting periods
pub fn is_label_column(name: &str) -> bool {
    name == CONCEPT_COLUMN || name == COMPANY_COLUMN
}
