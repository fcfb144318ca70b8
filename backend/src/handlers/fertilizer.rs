//! HTTP handlers for fertilizer application endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::FertilizerApplication;
use crate::services::fertilizer::{
    CreateFertilizerInput, FertilizerService, UpdateFertilizerInput,
};
use crate::AppState;

/// List all fertilizer applications
pub async fn list_fertilizers(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FertilizerApplication>>> {
    let service = FertilizerService::new(state.db);
    let applications = service.list_applications().await?;
    Ok(Json(applications))
}

/// Get a specific fertilizer application
pub async fn get_fertilizer(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> AppResult<Json<FertilizerApplication>> {
    let service = FertilizerService::new(state.db);
    let application = service.get_application(application_id).await?;
    Ok(Json(application))
}

/// Log a fertilizer application
pub async fn create_fertilizer(
    State(state): State<AppState>,
    Json(input): Json<CreateFertilizerInput>,
) -> AppResult<impl IntoResponse> {
    let service = FertilizerService::new(state.db);
    let application = service.create_application(input).await?;
    Ok((StatusCode::CREATED, Json(application)))
}

/// Edit a fertilizer application
pub async fn update_fertilizer(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Json(input): Json<UpdateFertilizerInput>,
) -> AppResult<Json<FertilizerApplication>> {
    let service = FertilizerService::new(state.db);
    let application = service.update_application(application_id, input).await?;
    Ok(Json(application))
}

/// Delete a fertilizer application
pub async fn delete_fertilizer(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = FertilizerService::new(state.db);
    service.delete_application(application_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
