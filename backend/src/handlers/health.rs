//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Health payload, bilingual like the error surface
#[derive(Serialize)]
pub struct HealthResponse {
    pub service: String,
    pub status: String,
    pub status_es: String,
    pub version: String,
    pub database: String,
}

fn health_response(database_up: bool) -> HealthResponse {
    let (status, status_es) = if database_up {
        ("healthy", "operativo")
    } else {
        ("degraded", "degradado")
    };
    HealthResponse {
        service: "agro-registro-backend".to_string(),
        status: status.to_string(),
        status_es: status_es.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_up {
            "connected".to_string()
        } else {
            "disconnected".to_string()
        },
    }
}

/// Health check endpoint handler. Reports degraded, not down, when the
/// record store is unreachable.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();
    Json(health_response(database_up))
}
