//! CLI command handlers

pub mod commands;

pub use commands::{analyze, compute, layout, AnalyzeOptions, OutputFormat};
