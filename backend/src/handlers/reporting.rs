//! Reporting handlers for the monthly report and dashboard

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::reporting::{DashboardMetrics, ReportingService};
use shared::reports::report_filename;
use crate::AppState;

#[derive(Deserialize)]
pub struct MonthlyReportQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
    /// "json" or "csv" (default csv, matching the original download flow)
    pub format: Option<String>,
}

/// Get the monthly report, as JSON or as a downloadable CSV
pub async fn get_monthly_report(
    State(state): State<AppState>,
    Query(query): Query<MonthlyReportQuery>,
) -> AppResult<impl IntoResponse> {
    let now = Utc::now();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month());

    let service = ReportingService::new(state.db.clone());
    let report = service.monthly_report(year, month).await?;

    if query.format.as_deref() == Some("json") {
        Ok(Json(report).into_response())
    } else {
        let csv = ReportingService::monthly_report_csv(&report)?;
        let disposition = format!("attachment; filename=\"{}\"", report_filename(year, month));
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            csv,
        )
            .into_response())
    }
}

/// Get dashboard metrics
pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardMetrics>> {
    let service = ReportingService::new(state.db.clone());
    let metrics = service.dashboard_metrics().await?;
    Ok(Json(metrics))
}
