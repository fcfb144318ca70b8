//! Banana sale linkage tests
//!
//! Tests for the wrapping-linkage rules including:
//! - Availability consistency: a lot is unavailable exactly while a live
//!   sale references it
//! - Fail-closed creation: missing or already-sold lots abort the sale
//! - Denormalized tape colors follow the requested wrapping order
//! - Field edits on a live sale never alter availability
//! - Total price snapshot calculation

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

use shared::models::BananaSale;
use shared::validation::{validate_total_snapshot, validate_wrapping_refs};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// A live sale as the model tracks it
struct ModelSale {
    wrapping_ids: Vec<Uuid>,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
}

/// In-memory mirror of the linkage semantics: wrapping availability flags
/// plus live sales referencing them. Create and delete apply all-or-nothing,
/// exactly like the transactional service; field edits touch only the sale.
#[derive(Default)]
struct LinkageModel {
    available: HashMap<Uuid, (String, bool)>,
    sales: HashMap<Uuid, ModelSale>,
}

impl LinkageModel {
    fn add_wrapping(&mut self, color: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.available.insert(id, (color.to_string(), true));
        id
    }

    /// Mirrors BananaSaleService::create_sale: validate refs, resolve every
    /// lot, reject if any is missing or already sold, then flip all flags.
    fn create_sale(&mut self, wrapping_ids: &[Uuid]) -> Result<(Uuid, Vec<String>), &'static str> {
        validate_wrapping_refs(wrapping_ids)?;

        let mut colors = Vec::with_capacity(wrapping_ids.len());
        for id in wrapping_ids {
            match self.available.get(id) {
                None => return Err("wrapping not found"),
                Some((_, false)) => return Err("wrapping already sold"),
                Some((color, true)) => colors.push(color.clone()),
            }
        }

        for id in wrapping_ids {
            self.available.get_mut(id).unwrap().1 = false;
        }
        let sale_id = Uuid::new_v4();
        self.sales.insert(
            sale_id,
            ModelSale {
                wrapping_ids: wrapping_ids.to_vec(),
                quantity: 1,
                unit_price: dec("1.0"),
                total_price: dec("1.0"),
            },
        );
        Ok((sale_id, colors))
    }

    /// Mirrors BananaSaleService::update_sale: rewrite the sale's own
    /// fields after the snapshot check. Wrapping flags and the reference
    /// list stay untouched.
    fn update_sale(
        &mut self,
        sale_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        total_price: Decimal,
    ) -> Result<(), &'static str> {
        validate_total_snapshot(Decimal::from(quantity), unit_price, total_price)?;
        let sale = self.sales.get_mut(&sale_id).ok_or("sale not found")?;
        sale.quantity = quantity;
        sale.unit_price = unit_price;
        sale.total_price = total_price;
        Ok(())
    }

    /// Mirrors BananaSaleService::delete_sale: re-read the reference list,
    /// delete the sale, restore every referenced lot.
    fn delete_sale(&mut self, sale_id: Uuid) -> Result<(), &'static str> {
        let sale = self.sales.remove(&sale_id).ok_or("sale not found")?;
        for id in sale.wrapping_ids {
            if let Some(entry) = self.available.get_mut(&id) {
                entry.1 = true;
            }
        }
        Ok(())
    }

    fn is_available(&self, id: Uuid) -> bool {
        self.available.get(&id).map(|(_, a)| *a).unwrap_or(false)
    }

    /// The core invariant: a lot is unavailable iff some live sale
    /// references it
    fn invariant_holds(&self) -> bool {
        self.available.iter().all(|(id, (_, available))| {
            let referenced = self
                .sales
                .values()
                .any(|sale| sale.wrapping_ids.contains(id));
            *available != referenced
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Scenario from the record rules: two lots, one sale consuming both
    #[test]
    fn sale_consumes_both_lots_and_snapshots_colors() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("rojo");
        let b2 = model.add_wrapping("azul");

        let (_, colors) = model.create_sale(&[b1, b2]).unwrap();

        assert_eq!(colors, vec!["rojo".to_string(), "azul".to_string()]);
        assert!(!model.is_available(b1));
        assert!(!model.is_available(b2));
        assert!(model.invariant_holds());
    }

    #[test]
    fn total_price_snapshot() {
        let total = BananaSale::compute_total(100, dec("5.0"));
        assert_eq!(total, dec("500.0"));
    }

    #[test]
    fn deleting_the_sale_restores_both_lots() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("rojo");
        let b2 = model.add_wrapping("azul");
        let (sale_id, _) = model.create_sale(&[b1, b2]).unwrap();

        model.delete_sale(sale_id).unwrap();

        assert!(model.is_available(b1));
        assert!(model.is_available(b2));
        assert!(model.sales.is_empty());
        assert!(model.invariant_holds());
    }

    #[test]
    fn empty_reference_list_is_rejected_before_any_write() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("rojo");

        assert!(model.create_sale(&[]).is_err());
        assert!(model.is_available(b1));
        assert!(model.sales.is_empty());
    }

    #[test]
    fn missing_wrapping_aborts_without_partial_flip() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("rojo");
        let ghost = Uuid::new_v4();

        assert!(model.create_sale(&[b1, ghost]).is_err());
        // Fail-closed: the resolvable lot was not flipped
        assert!(model.is_available(b1));
        assert!(model.sales.is_empty());
    }

    /// An already-sold lot cannot back a second live sale
    #[test]
    fn double_reference_is_rejected() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("verde");

        model.create_sale(&[b1]).unwrap();
        assert!(model.create_sale(&[b1]).is_err());
        assert!(model.invariant_holds());
    }

    #[test]
    fn duplicate_ids_within_one_sale_are_rejected() {
        let id = Uuid::new_v4();
        assert!(validate_wrapping_refs(&[id, id]).is_err());
    }

    /// Editing a live sale's fields never flips any wrapping flag
    #[test]
    fn updating_a_sale_leaves_availability_untouched() {
        let mut model = LinkageModel::default();
        let b1 = model.add_wrapping("rojo");
        let b2 = model.add_wrapping("azul");
        let (sale_id, _) = model.create_sale(&[b1, b2]).unwrap();

        model
            .update_sale(sale_id, 80, dec("4.5"), dec("360.0"))
            .unwrap();

        assert!(!model.is_available(b1));
        assert!(!model.is_available(b2));
        assert!(model.invariant_holds());
        assert_eq!(model.sales[&sale_id].unit_price, dec("4.5"));
        assert_eq!(model.sales[&sale_id].total_price, dec("360.0"));

        // A rejected edit (stale total) changes nothing either
        assert!(model
            .update_sale(sale_id, 90, dec("4.5"), dec("360.0"))
            .is_err());
        assert!(!model.is_available(b1));
        assert_eq!(model.sales[&sale_id].quantity, 80);
    }

    /// Editing quantity or unit price requires a matching resupplied total
    #[test]
    fn edited_totals_must_stay_consistent() {
        assert!(validate_total_snapshot(dec("100"), dec("5.0"), dec("500.0")).is_ok());
        assert!(validate_total_snapshot(dec("80"), dec("5.0"), dec("500.0")).is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// A step in a random create/update/delete workload
    #[derive(Debug, Clone)]
    enum Op {
        /// Create a sale over the lots at these indices (modulo lot count)
        Create(Vec<usize>),
        /// Rewrite the nth live sale's fields (quantity, price in cents)
        Update(usize, i32, i64),
        /// Delete the nth live sale, if any
        Delete(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop::collection::vec(0usize..8, 1..4).prop_map(Op::Create),
            (0usize..4, 1i32..500, 0i64..10_000)
                .prop_map(|(n, q, cents)| Op::Update(n, q, cents)),
            (0usize..4).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// At every point of any create/update/delete sequence, a lot is
        /// unavailable exactly when a live sale references it
        #[test]
        fn prop_availability_matches_live_references(
            ops in prop::collection::vec(op_strategy(), 1..30)
        ) {
            let mut model = LinkageModel::default();
            let lots: Vec<Uuid> = (0..8).map(|_| model.add_wrapping("rojo")).collect();

            for op in ops {
                match op {
                    Op::Create(indices) => {
                        let mut ids: Vec<Uuid> =
                            indices.iter().map(|i| lots[i % lots.len()]).collect();
                        ids.sort();
                        ids.dedup();
                        // Outcome may be Ok or rejected; either way the
                        // invariant must hold afterwards
                        let _ = model.create_sale(&ids);
                    }
                    Op::Update(n, quantity, cents) => {
                        let target = model.sales.keys().nth(n).copied();
                        if let Some(sale_id) = target {
                            let unit_price = Decimal::new(cents, 2);
                            let total = BananaSale::compute_total(quantity, unit_price);
                            model
                                .update_sale(sale_id, quantity, unit_price, total)
                                .unwrap();
                        }
                    }
                    Op::Delete(n) => {
                        let target = model.sales.keys().nth(n).copied();
                        if let Some(sale_id) = target {
                            model.delete_sale(sale_id).unwrap();
                        }
                    }
                }
                prop_assert!(model.invariant_holds());
            }
        }

        /// Create followed immediately by delete is a no-op on availability
        #[test]
        fn prop_create_then_delete_roundtrip(count in 1usize..6) {
            let mut model = LinkageModel::default();
            let lots: Vec<Uuid> = (0..count).map(|_| model.add_wrapping("azul")).collect();

            let (sale_id, _) = model.create_sale(&lots).unwrap();
            model.delete_sale(sale_id).unwrap();

            for lot in &lots {
                prop_assert!(model.is_available(*lot));
            }
            prop_assert!(model.sales.is_empty());
        }

        /// Total snapshot is exactly quantity x unit price
        #[test]
        fn prop_total_snapshot(
            quantity in 1i32..=10000,
            cents in 0i64..=100000
        ) {
            let unit_price = Decimal::new(cents, 2);
            let total = BananaSale::compute_total(quantity, unit_price);
            prop_assert_eq!(total, Decimal::from(quantity) * unit_price);
            prop_assert!(validate_total_snapshot(Decimal::from(quantity), unit_price, total).is_ok());
        }
    }
}
