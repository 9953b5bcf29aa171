//! Ingredient density heuristics for weight-to-volume conversion.
//!
//! Groceries are usually sold by weight while recipes call for cups. This
//! crate holds an ordered table of name rules mapping an ingredient to an
//! approximate number of cups per pound, with a default for everything else.
//! The numbers are kitchen estimates, not physical constants.
//!
//! # Example
//!
//! ```
//! use ingredient_density::{lookup_rate, DensityTable};
//!
//! // A 5 lb bag of flour holds roughly 16.65 cups
//! let cups = 5.0 * lookup_rate("All-Purpose Flour");
//! assert!((cups - 16.65).abs() < 1e-9);
//!
//! // Tables can be replaced wholesale
//! let table = DensityTable::from_json(
//!     r#"{ "rules": [ { "match": "contains", "pattern": "rice", "cups_per_pound": 2.4 } ] }"#,
//! )
//! .unwrap();
//! assert_eq!(table.lookup_rate("basmati rice"), 2.4);
//! ```

mod density_lookup;

pub use density_lookup::{
    lookup_rate, normalize_ingredient_name, DensityError, DensityRule, DensityTable, MatchKind,
    DEFAULT_CUPS_PER_POUND,
};
