//! Common types used across AgroRegistro

use serde::{Deserialize, Serialize};

/// The tape colors the farm uses to mark wrapping weeks.
///
/// Values are stored lowercase in Spanish; labels are the capitalized
/// display form. Free values outside this list are still accepted by the
/// wrapping form, so this is a suggestion list, not an enum.
pub const TAPE_COLORS: &[&str] = &[
    "rojo", "azul", "verde", "amarillo", "naranja", "violeta", "blanco", "negro",
];

/// A tape color paired with its display label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub value: String,
    pub label: String,
}

impl ColorOption {
    /// Build an option from a stored color value ("rojo" -> label "Rojo")
    pub fn from_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            label: capitalize(value),
        }
    }
}

/// Capitalize the first character of a color value for display
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_standard_colors() {
        assert_eq!(capitalize("rojo"), "Rojo");
        assert_eq!(capitalize("azul"), "Azul");
    }

    #[test]
    fn capitalize_handles_empty_string() {
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn color_option_pairs_value_and_label() {
        let opt = ColorOption::from_value("verde");
        assert_eq!(opt.value, "verde");
        assert_eq!(opt.label, "Verde");
    }

    #[test]
    fn tape_colors_are_lowercase() {
        for color in TAPE_COLORS {
            assert_eq!(*color, color.to_lowercase());
        }
    }
}
