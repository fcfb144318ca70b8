//! HTTP handlers for banana wrapping endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::BananaWrapping;
use crate::services::wrapping::{CreateWrappingInput, UpdateWrappingInput, WrappingService};
use crate::AppState;
use shared::types::ColorOption;

/// List all wrapping lots
pub async fn list_wrappings(State(state): State<AppState>) -> AppResult<Json<Vec<BananaWrapping>>> {
    let service = WrappingService::new(state.db);
    let wrappings = service.list_wrappings().await?;
    Ok(Json(wrappings))
}

/// List wrapping lots still available for sale
pub async fn list_available_wrappings(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BananaWrapping>>> {
    let service = WrappingService::new(state.db);
    let wrappings = service.list_available().await?;
    Ok(Json(wrappings))
}

/// Distinct tape colors among available lots
pub async fn list_tape_colors(State(state): State<AppState>) -> AppResult<Json<Vec<ColorOption>>> {
    let service = WrappingService::new(state.db);
    let colors = service.unique_tape_colors().await?;
    Ok(Json(colors))
}

/// Get a specific wrapping lot
pub async fn get_wrapping(
    State(state): State<AppState>,
    Path(wrapping_id): Path<Uuid>,
) -> AppResult<Json<BananaWrapping>> {
    let service = WrappingService::new(state.db);
    let wrapping = service.get_wrapping(wrapping_id).await?;
    Ok(Json(wrapping))
}

/// Register a new wrapping lot
pub async fn create_wrapping(
    State(state): State<AppState>,
    Json(input): Json<CreateWrappingInput>,
) -> AppResult<impl IntoResponse> {
    let service = WrappingService::new(state.db);
    let wrapping = service.create_wrapping(input).await?;
    Ok((StatusCode::CREATED, Json(wrapping)))
}

/// Correct a wrapping lot's fields
pub async fn update_wrapping(
    State(state): State<AppState>,
    Path(wrapping_id): Path<Uuid>,
    Json(input): Json<UpdateWrappingInput>,
) -> AppResult<Json<BananaWrapping>> {
    let service = WrappingService::new(state.db);
    let wrapping = service.update_wrapping(wrapping_id, input).await?;
    Ok(Json(wrapping))
}

/// Delete a wrapping lot
pub async fn delete_wrapping(
    State(state): State<AppState>,
    Path(wrapping_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = WrappingService::new(state.db);
    service.delete_wrapping(wrapping_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
