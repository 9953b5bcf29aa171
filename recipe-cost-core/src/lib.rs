pub mod apportion;
pub mod config;
pub mod error;
pub mod mass_to_volume;
pub mod quantity;
pub mod recipe;
pub mod report;
pub mod units;

pub use apportion::{
    apportion_ingredient, calculate_recipe_prices, used_fraction, ApportionStats, Apportionment,
};
pub use config::{ConfigError, CostConfig};
pub use error::{ConversionError, QuantityError};
pub use ingredient_density::{DensityRule, DensityTable, MatchKind};
pub use mass_to_volume::{apply_density, bridge_cost, needs_density_bridge};
pub use quantity::{parse_money, parse_positive_quantity, parse_quantity};
pub use recipe::{Cost, Ingredient, ModelError, Recipe};
pub use report::{RecipeReport, ReportLine};
pub use units::{convert, dimensions_match, is_known_unit, Dimension, Unit};
