//! Monthly report assembly
//!
//! Pure section building over in-memory record slices; the backend fetches
//! the month's rows and renders the result as CSV or JSON.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BananaSale, BananaWrapping, CacaoSale, FertilizerApplication};

/// Wrapping section of the monthly report
#[derive(Debug, Serialize)]
pub struct WrappingSection {
    pub records: Vec<BananaWrapping>,
    pub total_quantity: i64,
}

/// Cacao sales section of the monthly report
#[derive(Debug, Serialize)]
pub struct CacaoSaleSection {
    pub records: Vec<CacaoSale>,
    pub total_quantity_kg: Decimal,
    pub total_value: Decimal,
}

/// Banana sales section of the monthly report
#[derive(Debug, Serialize)]
pub struct BananaSaleSection {
    pub records: Vec<BananaSale>,
    pub total_boxes: i64,
    pub total_price: Decimal,
}

/// Fertilizer section of the monthly report
#[derive(Debug, Serialize)]
pub struct FertilizerSection {
    pub records: Vec<FertilizerApplication>,
    pub total_quantity: Decimal,
}

/// One month of farm records, sectioned with subtotals
#[derive(Debug, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub wrappings: WrappingSection,
    pub cacao_sales: CacaoSaleSection,
    pub banana_sales: BananaSaleSection,
    pub fertilizers: FertilizerSection,
}

/// Half-open UTC range [start, end) covering one calendar month
pub fn month_range(year: i32, month: u32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let start = Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()?;
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let end = Utc
        .with_ymd_and_hms(next_year, next_month, 1, 0, 0, 0)
        .single()?;
    Some((start, end))
}

/// Filename for the exported report, embedding the month
pub fn report_filename(year: i32, month: u32) -> String {
    format!("reporte_{}_{:02}.csv", year, month)
}

pub fn build_wrapping_section(records: Vec<BananaWrapping>) -> WrappingSection {
    let total_quantity = records.iter().map(|w| i64::from(w.quantity)).sum();
    WrappingSection {
        records,
        total_quantity,
    }
}

pub fn build_cacao_section(records: Vec<CacaoSale>) -> CacaoSaleSection {
    let total_quantity_kg = records.iter().map(|s| s.quantity).sum();
    let total_value = records.iter().map(|s| s.total_value).sum();
    CacaoSaleSection {
        records,
        total_quantity_kg,
        total_value,
    }
}

pub fn build_banana_sale_section(records: Vec<BananaSale>) -> BananaSaleSection {
    let total_boxes = records.iter().map(|s| i64::from(s.quantity)).sum();
    let total_price = records.iter().map(|s| s.total_price).sum();
    BananaSaleSection {
        records,
        total_boxes,
        total_price,
    }
}

pub fn build_fertilizer_section(records: Vec<FertilizerApplication>) -> FertilizerSection {
    let total_quantity = records.iter().map(|f| f.quantity).sum();
    FertilizerSection {
        records,
        total_quantity,
    }
}
