//! HTTP handlers for cacao sale endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::CacaoSale;
use crate::services::cacao_sale::{CacaoSaleService, CreateCacaoSaleInput, UpdateCacaoSaleInput};
use crate::AppState;

/// List all cacao sales
pub async fn list_cacao_sales(State(state): State<AppState>) -> AppResult<Json<Vec<CacaoSale>>> {
    let service = CacaoSaleService::new(state.db);
    let sales = service.list_sales().await?;
    Ok(Json(sales))
}

/// Get a specific cacao sale
pub async fn get_cacao_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<Json<CacaoSale>> {
    let service = CacaoSaleService::new(state.db);
    let sale = service.get_sale(sale_id).await?;
    Ok(Json(sale))
}

/// Record a cacao sale
pub async fn create_cacao_sale(
    State(state): State<AppState>,
    Json(input): Json<CreateCacaoSaleInput>,
) -> AppResult<impl IntoResponse> {
    let service = CacaoSaleService::new(state.db);
    let sale = service.create_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Edit a cacao sale
pub async fn update_cacao_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
    Json(input): Json<UpdateCacaoSaleInput>,
) -> AppResult<Json<CacaoSale>> {
    let service = CacaoSaleService::new(state.db);
    let sale = service.update_sale(sale_id, input).await?;
    Ok(Json(sale))
}

/// Delete a cacao sale
pub async fn delete_cacao_sale(
    State(state): State<AppState>,
    Path(sale_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = CacaoSaleService::new(state.db);
    service.delete_sale(sale_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
