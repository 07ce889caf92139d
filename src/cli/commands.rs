use crate::core::extractor::locate_concepts;
use crate::core::{
    analyze as analyze_table, compute_dupont, detect_layout, missing_concept_column,
    EMPTY_REPORT_WARNING,
};
use crate::error::ReportResult;
use crate::excel::ExcelExporter;
use crate::loader::load_table;
use crate::types::{ConceptKey, DuPontRatios, ReportTable, CONCEPT_COLUMN};
use crate::writer;
use clap::ValueEnum;
use colored::Colorize;
use std::io;
use std::path::PathBuf;

/// Format a number for display, removing unnecessary decimal places
fn format_number(n: f64) -> String {
    // Round to 6 decimal places for display
    let rounded = (n * 1e6).round() / 1e6;
    format!("{:.6}", rounded)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Format a ratio as a percentage with two decimals
fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// How `analyze` prints the report on stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable table
    #[default]
    Table,
    Csv,
    Json,
    Yaml,
}

/// Options of the analyze command
#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    pub sheet: Option<String>,
    pub company: Option<String>,
    pub csv: Option<PathBuf>,
    pub xlsx: Option<PathBuf>,
    pub format: OutputFormat,
    pub verbose: bool,
}

/// Execute the analyze command
pub fn analyze(input: PathBuf, options: AnalyzeOptions) -> ReportResult<()> {
    let human = options.format == OutputFormat::Table;

    if human {
        println!("{}", "🔥 DuPont Forge - ROE Decomposition".bold().green());
        println!("   File: {}", input.display());
        if let Some(ref sheet) = options.sheet {
            println!("   Sheet: {}", sheet.bright_yellow());
        }
        println!();
    }

    if options.verbose && human {
        println!("{}", "📖 Reading spreadsheet...".cyan());
    }

    let table = load_table(&input, options.sheet.as_deref())?;

    if options.verbose && human {
        println!(
            "   Found {} columns, {} rows\n",
            table.column_count(),
            table.row_count()
        );
    }

    let analysis = analyze_table(&table, options.company.as_deref())?;

    if options.verbose && human {
        println!("{}", "🧮 Computing DuPont ratios...".cyan());
        println!(
            "   Periods: {}",
            analysis.layout.period_columns.join(", ").bright_blue()
        );
        let skipped = analysis.skipped_periods();
        if !skipped.is_empty() {
            println!("   Skipped (incomplete or zero figures): {}", skipped.join(", "));
        }
        println!();
    }

    if analysis.report.is_empty() {
        eprintln!("{} {}", "⚠️ ".yellow(), EMPTY_REPORT_WARNING.yellow());
        return Ok(());
    }

    match options.format {
        OutputFormat::Table => print_report_table(&analysis.company, &analysis.report),
        OutputFormat::Csv => writer::write_csv(&analysis.report, io::stdout().lock())?,
        OutputFormat::Json => println!("{}", writer::report_to_json(&analysis.report)?),
        OutputFormat::Yaml => print!("{}", writer::report_to_yaml(&analysis.report)?),
    }

    if let Some(ref path) = options.csv {
        writer::write_csv_file(&analysis.report, path)?;
        report_export(human, "CSV", path);
    }

    if let Some(ref path) = options.xlsx {
        ExcelExporter::new(&analysis.report).export(path)?;
        report_export(human, "Excel", path);
    }

    Ok(())
}

fn report_export(human: bool, kind: &str, path: &std::path::Path) {
    let message = format!("✅ {} report exported to {}", kind, path.display());
    if human {
        println!("{}", message.bold().green());
    } else {
        eprintln!("{}", message);
    }
}

/// Print the report as a terminal table
fn print_report_table(company: &str, report: &ReportTable) {
    println!(
        "{} {}",
        "📊 DuPont Report:".bold().cyan(),
        company.bright_blue().bold()
    );
    println!("{}", "─".repeat(118));
    println!(
        "{:<10} {:>14} {:>14} {:>14} {:>14} {:>11} {:>11} {:>11} {:>11}",
        "Periodo".bold(),
        "Ventas".bold(),
        "Utilidad".bold(),
        "Activo".bold(),
        "Capital".bold(),
        "Margen".bold(),
        "Rotación".bold(),
        "Apalanc.".bold(),
        "ROE".bold()
    );
    println!("{}", "─".repeat(118));

    for row in report {
        println!(
            "{:<10} {:>14} {:>14} {:>14} {:>14} {:>11} {:>11} {:>11} {:>11}",
            row.period.bright_blue(),
            format_number(row.sales_net),
            format_number(row.net_income),
            format_number(row.total_assets),
            format_number(row.equity),
            format_percent(row.profit_margin),
            format!("{:.4}", row.asset_turnover),
            format!("{:.4}", row.leverage),
            format_percent(row.roe).bold().green()
        );
    }
    println!("{}", "─".repeat(118));
    println!("   {} period(s) reported", report.len());
}

/// Execute the layout command - show how a spreadsheet will be read
pub fn layout(input: PathBuf, sheet: Option<String>) -> ReportResult<()> {
    println!("{}", "🔍 DuPont Forge - Layout".bold().green());
    println!("   File: {}\n", input.display());

    let table = load_table(&input, sheet.as_deref())?;
    let layout = detect_layout(&table);

    println!(
        "   Columns: {}",
        table.column_names().collect::<Vec<_>>().join(", ")
    );
    println!("   Rows: {}", table.row_count());
    println!(
        "   Periods: {}",
        if layout.period_columns.is_empty() {
            "(none)".dimmed().to_string()
        } else {
            layout.period_columns.join(", ").bright_blue().to_string()
        }
    );

    if !layout.has_concept_column {
        println!(
            "   {} No '{}' column",
            "❌".red(),
            CONCEPT_COLUMN.bright_yellow()
        );
        return Err(missing_concept_column());
    }

    println!("\n{}", "📋 Concepts:".bold().cyan());
    let rows = locate_concepts(&table);
    for (key, row) in ConceptKey::ALL.into_iter().zip(rows) {
        match row {
            // +2: header row and 1-based numbering
            Some(idx) => println!("   {} {:<18} row {}", "✅".green(), key.label(), idx + 2),
            None => println!("   {} {:<18} not found", "❌".red(), key.label()),
        }
    }
    Ok(())
}

/// Execute the compute command - DuPont ratios for four figures
pub fn compute(net_income: f64, sales: f64, total_assets: f64, equity: f64) -> ReportResult<()> {
    println!("{}", "🧮 DuPont Forge - Compute".bold().green());
    println!(
        "   Utilidad Neta: {}  Ventas Netas: {}  Activo Total: {}  Capital Contable: {}\n",
        format_number(net_income),
        format_number(sales),
        format_number(total_assets),
        format_number(equity)
    );

    let ratios = compute_dupont(net_income, sales, total_assets, equity)?;
    print_ratios(&ratios);
    Ok(())
}

fn print_ratios(ratios: &DuPontRatios) {
    println!(
        "   Margen de utilidad neta: {}",
        format_percent(ratios.profit_margin).bright_blue()
    );
    println!(
        "   Rotación de activos:     {}",
        format_number(ratios.asset_turnover).bright_blue()
    );
    println!(
        "   Apalancamiento:          {}",
        format_number(ratios.leverage).bright_blue()
    );
    println!(
        "   ROE:                     {}",
        format_percent(ratios.roe).bold().green()
    );
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
