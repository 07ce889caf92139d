//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::server::AppState;
use crate::core::{analyze as analyze_table, Analysis, EMPTY_REPORT_WARNING};
use crate::error::{ReportError, ReportResult};
use crate::excel::ExcelExporter;
use crate::loader::{load_table_bytes, InputFormat};
use crate::types::ReportTable;
use crate::writer::report_to_csv;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "DuPont API Server".to_string(),
        version: state.version.clone(),
        description: "DuPont ROE decomposition for uploaded spreadsheets".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/analyze",
                "POST",
                "Upload a spreadsheet (request body) and get the DuPont report. \
                 Query: company, sheet, input=xlsx|csv, format=json|csv|xlsx",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "analyze".to_string(),
            "csv".to_string(),
            "xlsx".to_string(),
        ],
    }))
}

/// Report encoding of the analyze response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
    Xlsx,
}

/// Analyze query parameters; the spreadsheet itself is the request body
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeQuery {
    pub company: Option<String>,
    pub sheet: Option<String>,
    #[serde(default)]
    pub input: InputFormat,
    #[serde(default)]
    pub format: ReportFormat,
}

/// Analyze response
#[derive(Serialize, Default)]
pub struct AnalyzeResponse {
    pub company: String,
    pub periods: Vec<String>,
    pub skipped_periods: Vec<String>,
    pub rows: ReportTable,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl From<Analysis> for AnalyzeResponse {
    fn from(analysis: Analysis) -> Self {
        let skipped_periods = analysis
            .skipped_periods()
            .into_iter()
            .map(str::to_string)
            .collect();
        let warning = analysis
            .report
            .is_empty()
            .then(|| EMPTY_REPORT_WARNING.to_string());
        Self {
            company: analysis.company,
            periods: analysis.layout.period_columns,
            skipped_periods,
            rows: analysis.report,
            warning,
        }
    }
}

/// POST /api/v1/analyze - Build the DuPont report for an uploaded spreadsheet
pub async fn analyze(Query(query): Query<AnalyzeQuery>, body: Bytes) -> Response {
    if body.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Request body is empty: upload a spreadsheet",
        );
    }

    let analysis = match run_analysis(&body, &query) {
        Ok(analysis) => analysis,
        Err(e) => {
            warn!(error = %e, "analyze request rejected");
            return error_response(status_for(&e), e.to_string());
        }
    };

    if query.format != ReportFormat::Json && analysis.report.is_empty() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, EMPTY_REPORT_WARNING);
    }

    match query.format {
        ReportFormat::Json => Json(ApiResponse::ok(AnalyzeResponse::from(analysis))).into_response(),
        ReportFormat::Csv => match report_to_csv(&analysis.report) {
            Ok(bytes) => attachment(bytes, "text/csv; charset=utf-8", "dupont_reporte.csv"),
            Err(e) => error_response(status_for(&e), e.to_string()),
        },
        ReportFormat::Xlsx => match ExcelExporter::new(&analysis.report).to_bytes() {
            Ok(bytes) => attachment(bytes, XLSX_CONTENT_TYPE, "dupont_reporte.xlsx"),
            Err(e) => error_response(status_for(&e), e.to_string()),
        },
    }
}

fn run_analysis(body: &[u8], query: &AnalyzeQuery) -> ReportResult<Analysis> {
    let table = load_table_bytes(body, query.input, query.sheet.as_deref())?;
    analyze_table(&table, query.company.as_deref())
}

/// Input problems are the client's; anything else is ours
fn status_for(error: &ReportError) -> StatusCode {
    if error.is_input_error() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ApiResponse::<AnalyzeResponse>::err(message)),
    )
        .into_response()
}

fn attachment(bytes: Vec<u8>, content_type: &'static str, filename: &str) -> Response {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
