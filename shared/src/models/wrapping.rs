//! Banana wrapping models
//!
//! A wrapping is a dated production lot of wrapped banana bunches, marked
//! with a tape color. It stays available until a banana sale consumes it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A banana wrapping lot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BananaWrapping {
    pub id: Uuid,
    /// Date the bunches were wrapped
    pub record_date: DateTime<Utc>,
    /// Tape color marking the wrapping week (stored lowercase, e.g. "rojo")
    pub tape_color: String,
    /// Number of bunches wrapped
    pub quantity: i32,
    /// Free-form field notes
    pub observation: String,
    /// Still sellable. Flipped only by banana sale creation/deletion.
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

impl BananaWrapping {
    /// Whether this lot can back a new sale
    pub fn is_sellable(&self) -> bool {
        self.available
    }
}
