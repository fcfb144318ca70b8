//! Banana wrapping tests
//!
//! Tests for wrapping lot rules including:
//! - Tape color validation and display labels
//! - Availability filtering for the sale-form picker
//! - Distinct color derivation over available lots

use proptest::prelude::*;

use shared::types::{capitalize, ColorOption, TAPE_COLORS};
use shared::validation::{validate_count, validate_tape_color};

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn known_tape_colors_all_validate() {
        for color in TAPE_COLORS {
            assert!(validate_tape_color(color).is_ok());
        }
    }

    #[test]
    fn tape_color_labels_are_capitalized() {
        let opt = ColorOption::from_value("rojo");
        assert_eq!(opt.label, "Rojo");

        let opt = ColorOption::from_value("amarillo");
        assert_eq!(opt.label, "Amarillo");
    }

    #[test]
    fn free_color_values_are_accepted() {
        // The color list is a suggestion, not an enum
        assert!(validate_tape_color("celeste").is_ok());
    }

    #[test]
    fn blank_or_uppercase_colors_are_rejected() {
        assert!(validate_tape_color("").is_err());
        assert!(validate_tape_color("   ").is_err());
        assert!(validate_tape_color("Rojo").is_err());
    }

    #[test]
    fn quantity_must_be_a_positive_count() {
        assert!(validate_count(1).is_ok());
        assert!(validate_count(250).is_ok());
        assert!(validate_count(0).is_err());
        assert!(validate_count(-10).is_err());
    }

    /// The picker only sees lots that are still available
    #[test]
    fn availability_filter() {
        let lots = [("rojo", true), ("azul", false), ("verde", true)];
        let available: Vec<&str> = lots
            .iter()
            .filter(|(_, available)| *available)
            .map(|(color, _)| *color)
            .collect();

        assert_eq!(available, vec!["rojo", "verde"]);
    }

    /// Distinct colors among available lots, one option per color
    #[test]
    fn unique_colors_over_available_lots() {
        let lots = [
            ("rojo", true),
            ("rojo", true),
            ("azul", false),
            ("verde", true),
        ];

        let mut colors: Vec<&str> = lots
            .iter()
            .filter(|(_, available)| *available)
            .map(|(color, _)| *color)
            .collect();
        colors.sort();
        colors.dedup();

        let options: Vec<ColorOption> = colors.iter().map(|c| ColorOption::from_value(c)).collect();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, "rojo");
        assert_eq!(options[0].label, "Rojo");
        assert_eq!(options[1].value, "verde");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn color_strategy() -> impl Strategy<Value = String> {
        "[a-z]{1,12}"
    }

    proptest! {
        /// Capitalizing only changes the first character
        #[test]
        fn prop_capitalize_preserves_tail(color in color_strategy()) {
            let label = capitalize(&color);
            prop_assert_eq!(label.len(), color.len());
            prop_assert_eq!(&label[1..], &color[1..]);
            prop_assert_eq!(label.to_lowercase(), color);
        }

        /// Any lowercase non-blank value is a valid tape color
        #[test]
        fn prop_lowercase_values_validate(color in color_strategy()) {
            prop_assert!(validate_tape_color(&color).is_ok());
        }
    }
}
