//! Cacao sale service
//!
//! Plain CRUD: cacao sales carry no linkage to other records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::CacaoSale;
use shared::validation::{validate_total_snapshot, validate_unit_price, validate_weight};

/// Service for cacao sales
#[derive(Clone)]
pub struct CacaoSaleService {
    db: PgPool,
}

/// Row for cacao sale queries
#[derive(Debug, FromRow)]
struct CacaoSaleRow {
    id: Uuid,
    record_date: DateTime<Utc>,
    quantity: Decimal,
    unit_price: Decimal,
    total_value: Decimal,
    description: String,
    created_at: DateTime<Utc>,
}

impl From<CacaoSaleRow> for CacaoSale {
    fn from(row: CacaoSaleRow) -> Self {
        CacaoSale {
            id: row.id,
            record_date: row.record_date,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_value: row.total_value,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Input for recording a cacao sale
#[derive(Debug, Deserialize)]
pub struct CreateCacaoSaleInput {
    /// Kilograms sold
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub description: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

/// Input for editing a cacao sale. Totals are snapshots, so a caller
/// changing quantity or unit_price must resupply total_value as well.
#[derive(Debug, Deserialize)]
pub struct UpdateCacaoSaleInput {
    pub quantity: Option<Decimal>,
    pub unit_price: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub description: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

impl CacaoSaleService {
    /// Create a new CacaoSaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a cacao sale
    pub async fn create_sale(&self, input: CreateCacaoSaleInput) -> AppResult<CacaoSale> {
        validate_weight(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;
        validate_unit_price(input.unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
            message_es: "El precio unitario no puede ser negativo".to_string(),
        })?;

        let record_date = input.record_date.unwrap_or_else(Utc::now);
        let description = input.description.unwrap_or_default();
        let total_value = CacaoSale::compute_total(input.quantity, input.unit_price);

        let row = sqlx::query_as::<_, CacaoSaleRow>(
            r#"
            INSERT INTO cacao_sales (record_date, quantity, unit_price, total_value, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, record_date, quantity, unit_price, total_value, description, created_at
            "#,
        )
        .bind(record_date)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(total_value)
        .bind(&description)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all cacao sales in record order
    pub async fn list_sales(&self) -> AppResult<Vec<CacaoSale>> {
        let rows = sqlx::query_as::<_, CacaoSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_value, description, created_at
            FROM cacao_sales
            ORDER BY record_date ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List sales in a date range (used by the monthly report)
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<CacaoSale>> {
        let rows = sqlx::query_as::<_, CacaoSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_value, description, created_at
            FROM cacao_sales
            WHERE record_date >= $1 AND record_date < $2
            ORDER BY record_date ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a specific cacao sale
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<CacaoSale> {
        let row = sqlx::query_as::<_, CacaoSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_value, description, created_at
            FROM cacao_sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Cacao sale".to_string()))?;

        Ok(row.into())
    }

    /// Edit a cacao sale
    pub async fn update_sale(
        &self,
        sale_id: Uuid,
        input: UpdateCacaoSaleInput,
    ) -> AppResult<CacaoSale> {
        let existing = self.get_sale(sale_id).await?;

        let quantity = input.quantity.unwrap_or(existing.quantity);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let total_value = input.total_value.unwrap_or(existing.total_value);
        let description = input.description.unwrap_or(existing.description);
        let record_date = input.record_date.unwrap_or(existing.record_date);

        validate_weight(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;
        validate_unit_price(unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
            message_es: "El precio unitario no puede ser negativo".to_string(),
        })?;
        validate_total_snapshot(quantity, unit_price, total_value).map_err(|msg| {
            AppError::Validation {
                field: "total_value".to_string(),
                message: msg.to_string(),
                message_es: "El valor total no coincide con cantidad por precio unitario"
                    .to_string(),
            }
        })?;

        let row = sqlx::query_as::<_, CacaoSaleRow>(
            r#"
            UPDATE cacao_sales
            SET quantity = $1, unit_price = $2, total_value = $3, description = $4, record_date = $5
            WHERE id = $6
            RETURNING id, record_date, quantity, unit_price, total_value, description, created_at
            "#,
        )
        .bind(quantity)
        .bind(unit_price)
        .bind(total_value)
        .bind(&description)
        .bind(record_date)
        .bind(sale_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a cacao sale
    pub async fn delete_sale(&self, sale_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM cacao_sales WHERE id = $1")
            .bind(sale_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Cacao sale".to_string()));
        }

        Ok(())
    }
}
