//! Banana wrapping service for managing wrapping lots
//!
//! The `available` flag on a lot is owned by the banana sale linkage
//! (`BananaSaleService`); nothing here writes it after creation.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::BananaWrapping;
use shared::types::ColorOption;
use shared::validation::{validate_count, validate_tape_color};

/// Service for banana wrapping lots
#[derive(Clone)]
pub struct WrappingService {
    db: PgPool,
}

/// Row for wrapping queries
#[derive(Debug, FromRow)]
pub(crate) struct WrappingRow {
    pub id: Uuid,
    pub record_date: DateTime<Utc>,
    pub tape_color: String,
    pub quantity: i32,
    pub observation: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl From<WrappingRow> for BananaWrapping {
    fn from(row: WrappingRow) -> Self {
        BananaWrapping {
            id: row.id,
            record_date: row.record_date,
            tape_color: row.tape_color,
            quantity: row.quantity,
            observation: row.observation,
            available: row.available,
            created_at: row.created_at,
        }
    }
}

/// Input for registering a wrapping lot
#[derive(Debug, Deserialize)]
pub struct CreateWrappingInput {
    pub tape_color: String,
    pub quantity: i32,
    pub observation: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

/// Input for correcting a wrapping lot's fields.
///
/// Deliberately has no `available` field: availability is only flipped by
/// sale creation and deletion.
#[derive(Debug, Deserialize)]
pub struct UpdateWrappingInput {
    pub tape_color: Option<String>,
    pub quantity: Option<i32>,
    pub observation: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

impl WrappingService {
    /// Create a new WrappingService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a new wrapping lot. New lots are always available.
    pub async fn create_wrapping(&self, input: CreateWrappingInput) -> AppResult<BananaWrapping> {
        validate_tape_color(&input.tape_color).map_err(|msg| AppError::Validation {
            field: "tape_color".to_string(),
            message: msg.to_string(),
            message_es: "El color de cinta no es válido".to_string(),
        })?;
        validate_count(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;

        let record_date = input.record_date.unwrap_or_else(Utc::now);
        let observation = input.observation.unwrap_or_default();

        let row = sqlx::query_as::<_, WrappingRow>(
            r#"
            INSERT INTO banana_wrappings (record_date, tape_color, quantity, observation, available)
            VALUES ($1, $2, $3, $4, true)
            RETURNING id, record_date, tape_color, quantity, observation, available, created_at
            "#,
        )
        .bind(record_date)
        .bind(&input.tape_color)
        .bind(input.quantity)
        .bind(&observation)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all wrapping lots in record order
    pub async fn list_wrappings(&self) -> AppResult<Vec<BananaWrapping>> {
        let rows = sqlx::query_as::<_, WrappingRow>(
            r#"
            SELECT id, record_date, tape_color, quantity, observation, available, created_at
            FROM banana_wrappings
            ORDER BY record_date ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List lots in a date range (used by the monthly report)
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<BananaWrapping>> {
        let rows = sqlx::query_as::<_, WrappingRow>(
            r#"
            SELECT id, record_date, tape_color, quantity, observation, available, created_at
            FROM banana_wrappings
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

    /// Get a specific wrapping lot
    pub async fn get_wrapping(&self, wrapping_id: Uuid) -> AppResult<BananaWrapping> {
        let row = sqlx::query_as::<_, WrappingRow>(
            r#"
            SELECT id, record_date, tape_color, quantity, observation, available, created_at
            FROM banana_wrappings
            WHERE id = $1
            "#,
        )
        .bind(wrapping_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Wrapping".to_string()))?;

        Ok(row.into())
    }

    /// Correct a wrapping lot's fields. Never touches `available`.
    pub async fn update_wrapping(
        &self,
        wrapping_id: Uuid,
        input: UpdateWrappingInput,
    ) -> AppResult<BananaWrapping> {
        let existing = self.get_wrapping(wrapping_id).await?;

        let tape_color = input.tape_color.unwrap_or(existing.tape_color);
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let observation = input.observation.unwrap_or(existing.observation);
        let record_date = input.record_date.unwrap_or(existing.record_date);

        validate_tape_color(&tape_color).map_err(|msg| AppError::Validation {
            field: "tape_color".to_string(),
            message: msg.to_string(),
            message_es: "El color de cinta no es válido".to_string(),
        })?;
        validate_count(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;

        let row = sqlx::query_as::<_, WrappingRow>(
            r#"
            UPDATE banana_wrappings
            SET tape_color = $1, quantity = $2, observation = $3, record_date = $4
            WHERE id = $5
            RETURNING id, record_date, tape_color, quantity, observation, available, created_at
            "#,
        )
        .bind(&tape_color)
        .bind(quantity)
        .bind(&observation)
        .bind(record_date)
        .bind(wrapping_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a wrapping lot.
    ///
    /// No cascade guard: a sale that already consumed this lot keeps its
    /// denormalized tape color, so the historical record stays intact.
    pub async fn delete_wrapping(&self, wrapping_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM banana_wrappings WHERE id = $1")
            .bind(wrapping_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Wrapping".to_string()));
        }

        Ok(())
    }

    /// List lots still available for sale (populates the sale-form picker)
    pub async fn list_available(&self) -> AppResult<Vec<BananaWrapping>> {
        let rows = sqlx::query_as::<_, WrappingRow>(
            r#"
            SELECT id, record_date, tape_color, quantity, observation, available, created_at
            FROM banana_wrappings
            WHERE available
            ORDER BY record_date ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Distinct tape colors among available lots, with display labels
    pub async fn unique_tape_colors(&self) -> AppResult<Vec<ColorOption>> {
        let colors = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT tape_color FROM banana_wrappings WHERE available ORDER BY tape_color",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(colors.iter().map(|c| ColorOption::from_value(c)).collect())
    }
}
