//! Validation utilities for AgroRegistro records

use rust_decimal::Decimal;
use uuid::Uuid;

// ============================================================================
// Record Validations
// ============================================================================

/// Validate a wrapping or sale quantity expressed in whole units
pub fn validate_count(quantity: i32) -> Result<(), &'static str> {
    if quantity <= 0 {
        return Err("Quantity must be greater than 0");
    }
    Ok(())
}

/// Validate a weight-style quantity (kilograms, sacks)
pub fn validate_weight(quantity: Decimal) -> Result<(), &'static str> {
    if quantity <= Decimal::ZERO {
        return Err("Quantity must be greater than 0");
    }
    Ok(())
}

/// Validate a unit price
pub fn validate_unit_price(unit_price: Decimal) -> Result<(), &'static str> {
    if unit_price < Decimal::ZERO {
        return Err("Unit price cannot be negative");
    }
    Ok(())
}

/// Validate a tape color value (non-empty, stored lowercase)
pub fn validate_tape_color(color: &str) -> Result<(), &'static str> {
    if color.trim().is_empty() {
        return Err("Tape color is required");
    }
    if color != color.to_lowercase() {
        return Err("Tape color must be lowercase");
    }
    Ok(())
}

/// Validate the wrapping references carried by a banana sale.
///
/// A sale must consume at least one lot, and the same lot cannot be
/// consumed twice within one sale.
pub fn validate_wrapping_refs(wrapping_ids: &[Uuid]) -> Result<(), &'static str> {
    if wrapping_ids.is_empty() {
        return Err("A banana sale must reference at least one wrapping");
    }
    let mut seen = wrapping_ids.to_vec();
    seen.sort();
    seen.dedup();
    if seen.len() != wrapping_ids.len() {
        return Err("A banana sale cannot reference the same wrapping twice");
    }
    Ok(())
}

/// Validate that a stored total matches its quantity x unit price snapshot.
///
/// Totals are snapshots, never re-derived; this checks the caller supplied
/// a consistent one when editing price fields.
pub fn validate_total_snapshot(
    quantity: Decimal,
    unit_price: Decimal,
    total: Decimal,
) -> Result<(), &'static str> {
    if quantity * unit_price != total {
        return Err("Total does not match quantity x unit price");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn count_must_be_positive() {
        assert!(validate_count(1).is_ok());
        assert!(validate_count(0).is_err());
        assert!(validate_count(-5).is_err());
    }

    #[test]
    fn weight_must_be_positive() {
        assert!(validate_weight(dec("0.5")).is_ok());
        assert!(validate_weight(Decimal::ZERO).is_err());
    }

    #[test]
    fn unit_price_can_be_zero_but_not_negative() {
        assert!(validate_unit_price(Decimal::ZERO).is_ok());
        assert!(validate_unit_price(dec("-1")).is_err());
    }

    #[test]
    fn tape_color_rejects_empty_and_uppercase() {
        assert!(validate_tape_color("rojo").is_ok());
        assert!(validate_tape_color("").is_err());
        assert!(validate_tape_color("  ").is_err());
        assert!(validate_tape_color("Rojo").is_err());
    }

    #[test]
    fn wrapping_refs_must_be_nonempty() {
        assert!(validate_wrapping_refs(&[]).is_err());
        assert!(validate_wrapping_refs(&[Uuid::new_v4()]).is_ok());
    }

    #[test]
    fn wrapping_refs_reject_duplicates() {
        let id = Uuid::new_v4();
        assert!(validate_wrapping_refs(&[id, id]).is_err());
        assert!(validate_wrapping_refs(&[id, Uuid::new_v4()]).is_ok());
    }

    #[test]
    fn total_snapshot_must_match() {
        assert!(validate_total_snapshot(dec("100"), dec("5.0"), dec("500.0")).is_ok());
        assert!(validate_total_snapshot(dec("100"), dec("5.0"), dec("499")).is_err());
    }
}
