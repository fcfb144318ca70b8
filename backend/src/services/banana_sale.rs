//! Banana sale service: the wrapping-linkage logic
//!
//! A banana sale consumes one or more wrapping lots. Creating a sale flips
//! every referenced lot to unavailable; deleting it flips them back. Both
//! happen inside a single database transaction so a sale is never persisted
//! without its flag flips, and vice versa. Field edits to an existing sale
//! never touch the flags.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::BananaSale;
use shared::validation::{
    validate_count, validate_total_snapshot, validate_unit_price, validate_wrapping_refs,
};

/// Service for banana sales and their wrapping linkage
#[derive(Clone)]
pub struct BananaSaleService {
    db: PgPool,
}

/// Row for banana sale queries
#[derive(Debug, FromRow)]
struct BananaSaleRow {
    id: Uuid,
    record_date: DateTime<Utc>,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    wrapping_ids: Vec<Uuid>,
    tape_colors: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<BananaSaleRow> for BananaSale {
    fn from(row: BananaSaleRow) -> Self {
        BananaSale {
            id: row.id,
            record_date: row.record_date,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_price: row.total_price,
            wrapping_ids: row.wrapping_ids,
            tape_colors: row.tape_colors,
            created_at: row.created_at,
        }
    }
}

/// Row for the locked wrapping lookup inside create_sale
#[derive(Debug, FromRow)]
struct LockedWrapping {
    id: Uuid,
    tape_color: String,
    available: bool,
}

/// Input for recording a banana sale
#[derive(Debug, Deserialize)]
pub struct CreateBananaSaleInput {
    /// Boxes sold
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Wrapping lots consumed by this sale, at least one
    pub wrapping_ids: Vec<Uuid>,
    pub record_date: Option<DateTime<Utc>>,
}

/// Input for editing a banana sale's own fields.
///
/// Has no wrapping_ids field: the linkage is fixed at creation. Totals are
/// snapshots, so a caller changing quantity or unit_price must resupply
/// total_price as well.
#[derive(Debug, Deserialize)]
pub struct UpdateBananaSaleInput {
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
    pub record_date: Option<DateTime<Utc>>,
}

/// Pair tape colors with the requested wrapping order.
///
/// The locked rows come back in arbitrary order; the denormalized color
/// list must match the order of `wrapping_ids` on the sale.
fn colors_in_request_order(
    wrapping_ids: &[Uuid],
    colors_by_id: &HashMap<Uuid, String>,
) -> Option<Vec<String>> {
    wrapping_ids
        .iter()
        .map(|id| colors_by_id.get(id).cloned())
        .collect()
}

impl BananaSaleService {
    /// Create a new BananaSaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a banana sale and mark its wrapping lots as sold.
    ///
    /// Fail-closed: if any referenced lot is missing or already consumed by
    /// another sale, nothing is written.
    pub async fn create_sale(&self, input: CreateBananaSaleInput) -> AppResult<BananaSale> {
        validate_count(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;
        validate_unit_price(input.unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
            message_es: "El precio unitario no puede ser negativo".to_string(),
        })?;
        validate_wrapping_refs(&input.wrapping_ids).map_err(|msg| AppError::Validation {
            field: "wrapping_ids".to_string(),
            message: msg.to_string(),
            message_es: "La venta debe referenciar al menos un enfundado, sin repetir".to_string(),
        })?;

        let record_date = input.record_date.unwrap_or_else(Utc::now);
        let total_price = BananaSale::compute_total(input.quantity, input.unit_price);

        // Start transaction
        let mut tx = self.db.begin().await?;

        // Lock every referenced lot so a concurrent sale cannot consume it
        // between our check and our flip
        let locked = sqlx::query_as::<_, LockedWrapping>(
            r#"
            SELECT id, tape_color, available
            FROM banana_wrappings
            WHERE id = ANY($1)
            FOR UPDATE
            "#,
        )
        .bind(&input.wrapping_ids)
        .fetch_all(&mut *tx)
        .await?;

        if locked.len() != input.wrapping_ids.len() {
            return Err(AppError::NotFound("Wrapping".to_string()));
        }

        if let Some(sold) = locked.iter().find(|w| !w.available) {
            return Err(AppError::Conflict {
                resource: "wrapping_ids".to_string(),
                message: format!("Wrapping {} is already sold", sold.id),
                message_es: format!("El enfundado {} ya fue vendido", sold.id),
            });
        }

        // Denormalize colors so later lot edits never alter this sale
        let colors_by_id: HashMap<Uuid, String> =
            locked.into_iter().map(|w| (w.id, w.tape_color)).collect();
        let tape_colors = colors_in_request_order(&input.wrapping_ids, &colors_by_id)
            .ok_or_else(|| AppError::NotFound("Wrapping".to_string()))?;

        let row = sqlx::query_as::<_, BananaSaleRow>(
            r#"
            INSERT INTO banana_sales (record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors, created_at
            "#,
        )
        .bind(record_date)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(total_price)
        .bind(&input.wrapping_ids)
        .bind(&tape_colors)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE banana_wrappings SET available = false WHERE id = ANY($1)")
            .bind(&input.wrapping_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    /// Delete a banana sale and restore its wrapping lots.
    ///
    /// The wrapping list is re-read under lock inside the same transaction
    /// rather than trusting a caller-held copy, so a concurrent edit cannot
    /// make us unflip the wrong lots.
    pub async fn delete_sale(&self, sale_id: Uuid) -> AppResult<()> {
        // Start transaction
        let mut tx = self.db.begin().await?;

        let wrapping_ids = sqlx::query_scalar::<_, Vec<Uuid>>(
            "SELECT wrapping_ids FROM banana_sales WHERE id = $1 FOR UPDATE",
        )
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Banana sale".to_string()))?;

        sqlx::query("DELETE FROM banana_sales WHERE id = $1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE banana_wrappings SET available = true WHERE id = ANY($1)")
            .bind(&wrapping_ids)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// Edit a sale's own fields. Never touches wrapping flags or linkage.
    pub async fn update_sale(
        &self,
        sale_id: Uuid,
        input: UpdateBananaSaleInput,
    ) -> AppResult<BananaSale> {
        let existing = self.get_sale(sale_id).await?;

        let quantity = input.quantity.unwrap_or(existing.quantity);
        let unit_price = input.unit_price.unwrap_or(existing.unit_price);
        let total_price = input.total_price.unwrap_or(existing.total_price);
        let record_date = input.record_date.unwrap_or(existing.record_date);

        validate_count(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;
        validate_unit_price(unit_price).map_err(|msg| AppError::Validation {
            field: "unit_price".to_string(),
            message: msg.to_string(),
            message_es: "El precio unitario no puede ser negativo".to_string(),
        })?;
        validate_total_snapshot(Decimal::from(quantity), unit_price, total_price).map_err(
            |msg| AppError::Validation {
                field: "total_price".to_string(),
                message: msg.to_string(),
                message_es: "El precio total no coincide con cantidad por precio unitario"
                    .to_string(),
            },
        )?;

        let row = sqlx::query_as::<_, BananaSaleRow>(
            r#"
            UPDATE banana_sales
            SET quantity = $1, unit_price = $2, total_price = $3, record_date = $4
            WHERE id = $5
            RETURNING id, record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors, created_at
            "#,
        )
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .bind(record_date)
        .bind(sale_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all banana sales in record order
    pub async fn list_sales(&self) -> AppResult<Vec<BananaSale>> {
        let rows = sqlx::query_as::<_, BananaSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors, created_at
            FROM banana_sales
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
    ) -> AppResult<Vec<BananaSale>> {
        let rows = sqlx::query_as::<_, BananaSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors, created_at
            FROM banana_sales
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

    /// Get a specific banana sale
    pub async fn get_sale(&self, sale_id: Uuid) -> AppResult<BananaSale> {
        let row = sqlx::query_as::<_, BananaSaleRow>(
            r#"
            SELECT id, record_date, quantity, unit_price, total_price, wrapping_ids, tape_colors, created_at
            FROM banana_sales
            WHERE id = $1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Banana sale".to_string()))?;

        Ok(row.into())
    }
}
