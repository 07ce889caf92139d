//! DuPont API Server binary
//!
//! HTTP upload endpoint for DuPont reports.

use clap::Parser;
use dupont_forge::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "dupont-server")]
#[command(version)]
#[command(about = "DuPont API Server - spreadsheet upload in, DuPont report out")]
#[command(long_about = r#"
DuPont API Server

Endpoints:
  - POST /api/v1/analyze   - Upload a spreadsheet, get the DuPont report
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Query parameters of /api/v1/analyze:
  company   Company name (default: 'Empresa' column or Empresa_1)
  sheet     Worksheet name (default: first sheet)
  input     xlsx (any workbook) | csv
  format    json | csv | xlsx

Example usage:
  dupont-server                           # Start on localhost:8080
  dupont-server --host 0.0.0.0 --port 3000

  curl -X POST --data-binary @estados.xlsx \
    "http://localhost:8080/api/v1/analyze?company=ACME&format=csv"
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "DUPONT_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "DUPONT_PORT")]
    port: u16,

    /// Largest accepted upload in bytes
    #[arg(long, default_value = "10485760", env = "DUPONT_MAX_UPLOAD_BYTES")]
    max_upload_bytes: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
    };

    run_api_server(config).await
}
