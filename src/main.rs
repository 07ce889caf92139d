use clap::{Parser, Subcommand};
use colored::Colorize;
use dupont_forge::cli::{self, AnalyzeOptions, OutputFormat};
use dupont_forge::error::ReportResult;
use dupont_forge::logging::init_tracing;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "dupont")]
#[command(about = "DuPont ROE decomposition for spreadsheet financial statements.")]
#[command(long_about = "DuPont Forge - Return on Equity decomposition per reporting period
ROE = profit margin x asset turnover x financial leverage

INPUT LAYOUT:
  One 'Concepto' column with the row labels, one column per period:

  Concepto          | 2023 | 2024
  Ventas Netas      | 1000 | 1200
  Utilidad Neta     |  100 |  130
  Activo Total      | 5000 | 5200
  Capital Contable  | 2000 | 2100

  An optional 'Empresa' column names the company.

COMMANDS:
  analyze  - Compute the DuPont report and export CSV/Excel
  layout   - Show how a spreadsheet will be read
  compute  - DuPont ratios for four figures

EXAMPLES:
  dupont analyze estados.xlsx                          # Print the report
  dupont analyze estados.xlsx --csv r.csv --xlsx r.xlsx
  dupont analyze estados.csv --format json --company ACME
  dupont compute --net-income 100 --sales 1000 --total-assets 5000 --equity 2000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Compute the DuPont report for every period of a spreadsheet.

Periods missing any of Ventas Netas, Utilidad Neta, Activo Total or
Capital Contable, or with a zero Ventas Netas, Activo Total or Capital
Contable, are left out of the report.

SUPPORTED INPUT:
  .xlsx .xlsm .xls .xlsb .ods (first sheet unless --sheet is given)
  .csv (UTF-8, header row)

OUTPUT:
  --format table|csv|json|yaml prints the report on stdout
  --csv PATH and --xlsx PATH write files (Excel sheet name: DuPont)

EXAMPLE:
  dupont analyze estados.xlsx --company ACME --xlsx dupont_reporte.xlsx")]
    /// Compute the DuPont report for a spreadsheet
    Analyze {
        /// Path to the spreadsheet (.xlsx, .xlsm, .xls, .ods or .csv)
        input: PathBuf,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Company name for the report (default: 'Empresa' column or Empresa_1)
        #[arg(short, long, env = "DUPONT_COMPANY")]
        company: Option<String>,

        /// Write the report as CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the report as Excel (.xlsx)
        #[arg(long)]
        xlsx: Option<PathBuf>,

        /// Output format on stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Show verbose steps and debug logs
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how a spreadsheet will be read
    Layout {
        /// Path to the spreadsheet
        input: PathBuf,

        /// Worksheet to read (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,
    },

    /// DuPont ratios for four figures
    Compute {
        /// Utilidad Neta
        #[arg(long, allow_negative_numbers = true)]
        net_income: f64,

        /// Ventas Netas
        #[arg(long, allow_negative_numbers = true)]
        sales: f64,

        /// Activo Total
        #[arg(long, allow_negative_numbers = true)]
        total_assets: f64,

        /// Capital Contable
        #[arg(long, allow_negative_numbers = true)]
        equity: f64,
    },
}

fn run(command: Commands) -> ReportResult<()> {
    match command {
        Commands::Analyze {
            input,
            sheet,
            company,
            csv,
            xlsx,
            format,
            verbose,
        } => cli::analyze(
            input,
            AnalyzeOptions {
                sheet,
                company,
                csv,
                xlsx,
                format,
                verbose,
            },
        ),

        Commands::Layout { input, sheet } => cli::layout(input, sheet),

        Commands::Compute {
            net_income,
            sales,
            total_assets,
            equity,
        } => cli::compute(net_income, sales, total_assets, equity),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let verbose = matches!(cli.command, Commands::Analyze { verbose: true, .. });
    init_tracing(if verbose { "dupont_forge=debug" } else { "warn" });

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "❌ Error:".bold().red(), e);
            ExitCode::FAILURE
        }
    }
}
