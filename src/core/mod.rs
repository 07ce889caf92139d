//! DuPont pipeline: layout detection, concept extraction, calculation, report assembly

pub mod dupont;
pub mod extractor;
pub mod layout;
pub mod report;

pub use dupont::compute_dupont;
pub use extractor::extract_figures;
pub use layout::detect_layout;
pub use report::{
    analyze, build_report, missing_concept_column, resolve_company, Analysis, EMPTY_REPORT_WARNING,
};
