//! Unit vocabulary and dimensional conversion.
//!
//! Every unit belongs to one [`Dimension`] and carries a factor to that
//! dimension's base unit (grams, millilitres, each, metres). Conversion only
//! happens within a dimension; crossing from mass to volume needs a density,
//! which lives in [`crate::mass_to_volume`].

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

pub const GRAMS_PER_OZ: f64 = 28.349523125;
pub const GRAMS_PER_LB: f64 = 453.59237;

/// US customary cup.
pub const ML_PER_CUP: f64 = 236.5882365;
pub const CUPS_PER_TBSP: f64 = 1.0 / 16.0;
pub const CUPS_PER_TSP: f64 = 1.0 / 48.0;
pub const CUPS_PER_FL_OZ: f64 = 1.0 / 8.0;
pub const CUPS_PER_PINT: f64 = 2.0;
pub const CUPS_PER_QUART: f64 = 4.0;
pub const CUPS_PER_GALLON: f64 = 16.0;

/// Canonical names used when the cost is rewritten across dimensions.
pub const POUNDS: &str = "pounds";
pub const CUPS: &str = "cups";

/// Physical category of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Mass,
    Volume,
    Count,
    Length,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Mass => "mass",
            Dimension::Volume => "volume",
            Dimension::Count => "count",
            Dimension::Length => "length",
        };
        f.write_str(name)
    }
}

/// A recognized unit of measure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    /// Canonical display name ("cups", "pounds").
    pub name: &'static str,
    pub dimension: Dimension,
    /// How many base units one of this unit is.
    pub to_base: f64,
}

struct UnitDef {
    unit: Unit,
    aliases: &'static [&'static str],
}

const fn def(
    name: &'static str,
    dimension: Dimension,
    to_base: f64,
    aliases: &'static [&'static str],
) -> UnitDef {
    UnitDef {
        unit: Unit {
            name,
            dimension,
            to_base,
        },
        aliases,
    }
}

const UNIT_DEFS: &[UnitDef] = &[
    // Mass (base: gram)
    def("milligrams", Dimension::Mass, 0.001, &["mg", "milligram", "milligrams"]),
    def("grams", Dimension::Mass, 1.0, &["g", "gm", "gms", "gram", "grams"]),
    def(
        "kilograms",
        Dimension::Mass,
        1000.0,
        &["kg", "kgs", "kilo", "kilos", "kilogram", "kilograms"],
    ),
    def("ounces", Dimension::Mass, GRAMS_PER_OZ, &["oz", "ounce", "ounces"]),
    def("pounds", Dimension::Mass, GRAMS_PER_LB, &["lb", "lbs", "pound", "pounds"]),
    // Volume (base: millilitre)
    def(
        "milliliters",
        Dimension::Volume,
        1.0,
        &["ml", "milliliter", "milliliters", "millilitre", "millilitres"],
    ),
    def(
        "liters",
        Dimension::Volume,
        1000.0,
        &["l", "liter", "liters", "litre", "litres"],
    ),
    def(
        "teaspoons",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_TSP,
        &["tsp", "tsps", "teaspoon", "teaspoons"],
    ),
    def(
        "tablespoons",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_TBSP,
        &["tbsp", "tbsps", "tbs", "tablespoon", "tablespoons"],
    ),
    def(
        "fluid ounces",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_FL_OZ,
        &["fl oz", "fl. oz", "floz", "fluid ounce", "fluid ounces"],
    ),
    def("cups", Dimension::Volume, ML_PER_CUP, &["c", "cup", "cups"]),
    def(
        "pints",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_PINT,
        &["pt", "pint", "pints"],
    ),
    def(
        "quarts",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_QUART,
        &["qt", "quart", "quarts"],
    ),
    def(
        "gallons",
        Dimension::Volume,
        ML_PER_CUP * CUPS_PER_GALLON,
        &["gal", "gallon", "gallons"],
    ),
    // Count (base: each). An empty unit is a plain count, as in "3 eggs".
    def(
        "each",
        Dimension::Count,
        1.0,
        &[
            "", "each", "ea", "unit", "units", "item", "items", "piece", "pieces", "whole",
            "count", "ct",
        ],
    ),
    def("dozen", Dimension::Count, 12.0, &["dozen", "doz", "dz"]),
    // Length (base: metre)
    def(
        "millimeters",
        Dimension::Length,
        0.001,
        &["mm", "millimeter", "millimeters", "millimetre", "millimetres"],
    ),
    def(
        "centimeters",
        Dimension::Length,
        0.01,
        &["cm", "centimeter", "centimeters", "centimetre", "centimetres"],
    ),
    def(
        "meters",
        Dimension::Length,
        1.0,
        &["m", "meter", "meters", "metre", "metres"],
    ),
    def("inches", Dimension::Length, 0.0254, &["in", "inch", "inches"]),
    def("feet", Dimension::Length, 0.3048, &["ft", "foot", "feet"]),
];

/// Alias -> unit, built once from [`UNIT_DEFS`].
static UNIT_INDEX: LazyLock<HashMap<&'static str, Unit>> = LazyLock::new(|| {
    let mut index = HashMap::new();
    for def in UNIT_DEFS {
        for &alias in def.aliases {
            index.insert(alias, def.unit);
        }
    }
    index
});

/// Lowercase, trim, collapse inner whitespace, drop a trailing period ("lbs.").
fn normalize_unit_name(name: &str) -> String {
    let collapsed = name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    match collapsed.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => collapsed,
    }
}

impl Unit {
    /// Resolve a unit name from the vocabulary.
    pub fn parse(name: &str) -> Result<Unit, ConversionError> {
        let normalized = normalize_unit_name(name);
        UNIT_INDEX
            .get(normalized.as_str())
            .copied()
            .ok_or_else(|| ConversionError::UnknownUnit(name.trim().to_string()))
    }

    pub fn is_mass(&self) -> bool {
        self.dimension == Dimension::Mass
    }

    /// Express `quantity` of this unit in `target`.
    pub fn convert_to(&self, quantity: f64, target: &Unit) -> Result<f64, ConversionError> {
        if self.dimension != target.dimension {
            return Err(ConversionError::IncompatibleDimensions {
                from: self.name.to_string(),
                to: target.name.to_string(),
                from_dimension: self.dimension,
                to_dimension: target.dimension,
            });
        }
        if self.name == target.name {
            return Ok(quantity);
        }
        Ok(quantity * self.to_base / target.to_base)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Convert `quantity` from one named unit to another.
pub fn convert(quantity: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    let from = Unit::parse(from_unit)?;
    let to = Unit::parse(to_unit)?;
    from.convert_to(quantity, &to)
}

/// Whether two named units share a dimension.
pub fn dimensions_match(unit_a: &str, unit_b: &str) -> Result<bool, ConversionError> {
    Ok(Unit::parse(unit_a)?.dimension == Unit::parse(unit_b)?.dimension)
}

pub fn is_known_unit(name: &str) -> bool {
    Unit::parse(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_mass_conversions() {
        assert_close(convert(1.0, "pound", "ounces").unwrap(), 16.0);
        assert_close(convert(2.0, "kg", "grams").unwrap(), 2000.0);
        assert_close(convert(1.0, "lb", "g").unwrap(), GRAMS_PER_LB);
    }

    #[test]
    fn test_volume_conversions() {
        assert_close(convert(1.0, "cup", "tablespoons").unwrap(), 16.0);
        assert_close(convert(1.0, "tbsp", "tsp").unwrap(), 3.0);
        assert_close(convert(1.0, "gallon", "cups").unwrap(), 16.0);
        assert_close(convert(2.0, "fl oz", "tsp").unwrap(), 12.0);
        assert_close(convert(1.0, "quart", "pints").unwrap(), 2.0);
        assert_close(convert(1.0, "liter", "ml").unwrap(), 1000.0);
    }

    #[test]
    fn test_count_conversions() {
        assert_close(convert(1.0, "dozen", "each").unwrap(), 12.0);
        assert_close(convert(6.0, "", "dozen").unwrap(), 0.5);
    }

    #[test]
    fn test_length_conversions() {
        assert_close(convert(1.0, "ft", "inches").unwrap(), 12.0);
        assert_close(convert(10.0, "mm", "cm").unwrap(), 1.0);
    }

    #[test]
    fn test_parse_is_forgiving() {
        assert_eq!(Unit::parse("  Cups ").unwrap().name, "cups");
        assert_eq!(Unit::parse("LBS.").unwrap().name, "pounds");
        assert_eq!(Unit::parse("fl   oz").unwrap().name, "fluid ounces");
        assert_eq!(Unit::parse("fl. oz.").unwrap().name, "fluid ounces");
    }

    #[test]
    fn test_unknown_unit() {
        assert_eq!(
            convert(1.0, "smidgen", "cups"),
            Err(ConversionError::UnknownUnit("smidgen".to_string()))
        );
        assert!(!is_known_unit("handful"));
        assert!(is_known_unit("each"));
    }

    #[test]
    fn test_incompatible_dimensions() {
        let err = convert(1.0, "each", "cups").unwrap_err();
        assert_eq!(
            err,
            ConversionError::IncompatibleDimensions {
                from: "each".to_string(),
                to: "cups".to_string(),
                from_dimension: Dimension::Count,
                to_dimension: Dimension::Volume,
            }
        );
        assert_eq!(
            err.to_string(),
            "Cannot convert from 'each' (count) to 'cups' (volume)"
        );
        assert!(convert(1.0, "pounds", "cups").is_err());
    }

    #[test]
    fn test_dimensions_match() {
        assert!(dimensions_match("ounces", "kg").unwrap());
        assert!(dimensions_match("tsp", "gallons").unwrap());
        assert!(!dimensions_match("pounds", "cups").unwrap());
        assert!(dimensions_match("pounds", "bushels").is_err());
    }

    #[test]
    fn test_every_alias_resolves_to_its_own_unit() {
        for def in UNIT_DEFS {
            for alias in def.aliases {
                assert_eq!(Unit::parse(alias).unwrap(), def.unit, "alias {alias:?}");
            }
        }
    }
}
