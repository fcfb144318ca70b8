//! Fertilizer application models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A log entry for a fertilizer application. No cross-record effects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FertilizerApplication {
    pub id: Uuid,
    pub record_date: DateTime<Utc>,
    /// Type of input applied (e.g. "urea", "abono organico")
    pub fertilizer_type: String,
    /// Quantity applied, in the unit the farm uses for this input
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
