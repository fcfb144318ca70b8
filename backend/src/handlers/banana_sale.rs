//! HTTP handlers for banana sale endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::BananaSale;
use crate::services::banana_sale::{
    BananaSaleService, CreateBananaSaleInput, UpdateBananaSaleInput,
};
use crate::AppState;

/// List all banana sales
pub async fn list_banana_sales(State(state): State<AppState>) -> AppResult<Json<Vec<BananaSale>>> {
    let service = BananaSaleService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(sales))
}

/// Get a specific banana sale
pub async fn get_banana_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<BananaSale>> {
    let service = BananaSaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(sale))
}

/// Record a banana sale, consuming its wrapping lots
pub async fn create_banana_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateBananaSaleInput>,
) -> AppResult<impl IntoResponse> {
    let service = BananaSaleService::new(state.db);
    let sale = service.create_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Edit a banana sale's own fields
pub async fn update_banana_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(input): Json<UpdateBananaSaleInput>,
) -> AppResult<Json<BananaSale>> {
    let service = BananaSaleService::new(state.db);
    let sale = service.update_sale(sale_id, input).await?;
    Ok(Json(sale))
}

/// Delete a banana sale, restoring its wrapping lots
pub async fn delete_banana_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = BananaSaleService::new(state.db);
    service.delete_sale(sale_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
