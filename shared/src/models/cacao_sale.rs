//! Cacao sale models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bulk cacao sale. No linkage to wrapping lots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacaoSale {
    pub id: Uuid,
    pub record_date: DateTime<Utc>,
    /// Kilograms sold
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Snapshot of quantity x unit_price, stored at creation
    pub total_value: Decimal,
    /// Buyer or batch description
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CacaoSale {
    pub fn compute_total(quantity: Decimal, unit_price: Decimal) -> Decimal {
        quantity * unit_price
    }
}
