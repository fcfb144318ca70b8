//! Fertilizer application service
//!
//! Plain CRUD: applications carry no linkage to other records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::FertilizerApplication;
use shared::validation::validate_weight;

/// Service for fertilizer applications
#[derive(Clone)]
pub struct FertilizerService {
    db: PgPool,
}

/// Row for fertilizer application queries
#[derive(Debug, FromRow)]
struct FertilizerRow {
    id: Uuid,
    record_date: DateTime<Utc>,
    fertilizer_type: String,
    quantity: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<FertilizerRow> for FertilizerApplication {
    fn from(row: FertilizerRow) -> Self {
        FertilizerApplication {
            id: row.id,
            record_date: row.record_date,
            fertilizer_type: row.fertilizer_type,
            quantity: row.quantity,
            notes: row.notes,
            created_at: row.created_at,
        }
    }
}

/// Input for logging a fertilizer application
#[derive(Debug, Deserialize)]
pub struct CreateFertilizerInput {
    pub fertilizer_type: String,
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

/// Input for editing a fertilizer application
#[derive(Debug, Deserialize)]
pub struct UpdateFertilizerInput {
    pub fertilizer_type: Option<String>,
    pub quantity: Option<Decimal>,
    pub notes: Option<String>,
    pub record_date: Option<DateTime<Utc>>,
}

impl FertilizerService {
    /// Create a new FertilizerService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Log a fertilizer application
    pub async fn create_application(
        &self,
        input: CreateFertilizerInput,
    ) -> AppResult<FertilizerApplication> {
        if input.fertilizer_type.trim().is_empty() {
            return Err(AppError::Validation {
                field: "fertilizer_type".to_string(),
                message: "Fertilizer type is required".to_string(),
                message_es: "El tipo de fertilizante es obligatorio".to_string(),
            });
        }
        validate_weight(input.quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;

        let record_date = input.record_date.unwrap_or_else(Utc::now);

        let row = sqlx::query_as::<_, FertilizerRow>(
            r#"
            INSERT INTO fertilizer_applications (record_date, fertilizer_type, quantity, notes)
            VALUES ($1, $2, $3, $4)
            RETURNING id, record_date, fertilizer_type, quantity, notes, created_at
            "#,
        )
        .bind(record_date)
        .bind(&input.fertilizer_type)
        .bind(input.quantity)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// List all applications in record order
    pub async fn list_applications(&self) -> AppResult<Vec<FertilizerApplication>> {
        let rows = sqlx::query_as::<_, FertilizerRow>(
            r#"
            SELECT id, record_date, fertilizer_type, quantity, notes, created_at
            FROM fertilizer_applications
            ORDER BY record_date ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// List applications in a date range (used by the monthly report)
    pub async fn list_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<FertilizerApplication>> {
        let rows = sqlx::query_as::<_, FertilizerRow>(
            r#"
            SELECT id, record_date, fertilizer_type, quantity, notes, created_at
            FROM fertilizer_applications
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

    /// Get a specific application
    pub async fn get_application(&self, application_id: Uuid) -> AppResult<FertilizerApplication> {
        let row = sqlx::query_as::<_, FertilizerRow>(
            r#"
            SELECT id, record_date, fertilizer_type, quantity, notes, created_at
            FROM fertilizer_applications
            WHERE id = $1
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Fertilizer application".to_string()))?;

        Ok(row.into())
    }

    /// Edit a fertilizer application
    pub async fn update_application(
        &self,
        application_id: Uuid,
        input: UpdateFertilizerInput,
    ) -> AppResult<FertilizerApplication> {
        let existing = self.get_application(application_id).await?;

        let fertilizer_type = input.fertilizer_type.unwrap_or(existing.fertilizer_type);
        let quantity = input.quantity.unwrap_or(existing.quantity);
        let notes = input.notes.or(existing.notes);
        let record_date = input.record_date.unwrap_or(existing.record_date);

        if fertilizer_type.trim().is_empty() {
            return Err(AppError::Validation {
                field: "fertilizer_type".to_string(),
                message: "Fertilizer type is required".to_string(),
                message_es: "El tipo de fertilizante es obligatorio".to_string(),
            });
        }
        validate_weight(quantity).map_err(|msg| AppError::Validation {
            field: "quantity".to_string(),
            message: msg.to_string(),
            message_es: "La cantidad debe ser mayor que 0".to_string(),
        })?;

        let row = sqlx::query_as::<_, FertilizerRow>(
            r#"
            UPDATE fertilizer_applications
            SET fertilizer_type = $1, quantity = $2, notes = $3, record_date = $4
            WHERE id = $5
            RETURNING id, record_date, fertilizer_type, quantity, notes, created_at
            "#,
        )
        .bind(&fertilizer_type)
        .bind(quantity)
        .bind(&notes)
        .bind(record_date)
        .bind(application_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a fertilizer application
    pub async fn delete_application(&self, application_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM fertilizer_applications WHERE id = $1")
            .bind(application_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Fertilizer application".to_string()));
        }

        Ok(())
    }
}
