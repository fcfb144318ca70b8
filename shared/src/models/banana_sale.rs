//! Banana sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A banana sale consuming one or more wrapping lots.
///
/// Tape colors are copied from the wrappings at sale time so later edits to
/// a wrapping never retroactively alter the sale record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BananaSale {
    pub id: Uuid,
    pub record_date: DateTime<Utc>,
    /// Boxes sold
    pub quantity: i32,
    pub unit_price: Decimal,
    /// Snapshot of quantity x unit_price, stored at creation
    pub total_price: Decimal,
    /// The wrapping lots this sale consumed
    pub wrapping_ids: Vec<Uuid>,
    /// Denormalized tape colors, same order as `wrapping_ids`
    pub tape_colors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl BananaSale {
    /// Compute the price snapshot stored on a sale
    pub fn compute_total(quantity: i32, unit_price: Decimal) -> Decimal {
        Decimal::from(quantity) * unit_price
    }
}
