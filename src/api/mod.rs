//! DuPont API Server module
//!
//! HTTP upload endpoint: spreadsheet in, DuPont report out (JSON, CSV or Excel).
//! Run with `dupont-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
