//! Cost apportionment: what share of a bulk purchase a recipe uses.
//!
//! Each ingredient is priced on its own. A failure for one ingredient
//! leaves its price unset and never stops the rest of the recipe.

use ingredient_density::DensityTable;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::mass_to_volume::bridge_cost;
use crate::recipe::{Cost, Ingredient, Recipe};
use crate::units::convert;

/// Statistics about a pricing pass over a recipe.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApportionStats {
    pub priced: usize,
    pub density_bridged: usize,
    pub skipped_missing_cost: usize,
    pub failed_incompatible_dimensions: usize,
    pub failed_unknown_unit: usize,
    /// Names of ingredients that could not be priced.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unpriced_ingredients: Vec<String>,
}

/// Outcome of pricing a single ingredient.
#[derive(Debug, Clone, PartialEq)]
pub enum Apportionment {
    Priced {
        price: f64,
        /// Share of the bulk purchase the recipe uses.
        used_fraction: f64,
        /// Bulk purchase expressed in the ingredient's unit.
        bulk_in_usage_unit: f64,
        /// The cups-based cost used when the purchase was by weight.
        bridged_cost: Option<Cost>,
    },
    Unpriced(ConversionError),
    MissingCost,
}

impl Apportionment {
    pub fn price(&self) -> Option<f64> {
        match self {
            Apportionment::Priced { price, .. } => Some(*price),
            _ => None,
        }
    }
}

/// Share of `cost` that `ingredient` uses, alongside the bulk quantity
/// expressed in the ingredient's unit.
pub fn used_fraction(ingredient: &Ingredient, cost: &Cost) -> Result<(f64, f64), ConversionError> {
    let bulk_in_usage_unit = convert(cost.quantity(), cost.measure(), ingredient.measure())?;
    let used_fraction = ingredient.quantity() / bulk_in_usage_unit;
    Ok((used_fraction, bulk_in_usage_unit))
}

/// Work out the price of one ingredient without touching it.
pub fn apportion_ingredient(ingredient: &Ingredient, table: &DensityTable) -> Apportionment {
    let Some(cost) = ingredient.cost() else {
        return Apportionment::MissingCost;
    };

    let bridged_cost = match bridge_cost(ingredient, cost, table) {
        Ok(bridged) => bridged,
        Err(e) => return Apportionment::Unpriced(e),
    };
    let effective = bridged_cost.as_ref().unwrap_or(cost);

    match used_fraction(ingredient, effective) {
        Ok((used_fraction, bulk_in_usage_unit)) => Apportionment::Priced {
            price: used_fraction * effective.money(),
            used_fraction,
            bulk_in_usage_unit,
            bridged_cost,
        },
        Err(e) => Apportionment::Unpriced(e),
    }
}

/// Price every ingredient of a recipe, in order.
///
/// Sets each ingredient's price when apportionment succeeds and clears it
/// otherwise. Returns the per-ingredient outcomes in recipe order.
pub fn calculate_recipe_prices(
    recipe: &mut Recipe,
    table: &DensityTable,
    stats: &mut ApportionStats,
) -> Vec<Apportionment> {
    let mut outcomes = Vec::with_capacity(recipe.ingredients.len());

    for ingredient in recipe.ingredients.iter_mut() {
        let outcome = apportion_ingredient(ingredient, table);

        match &outcome {
            Apportionment::Priced {
                price,
                bridged_cost,
                ..
            } => {
                stats.priced += 1;
                if bridged_cost.is_some() {
                    stats.density_bridged += 1;
                }
                tracing::debug!(ingredient = ingredient.thing(), price, "priced ingredient");
            }
            Apportionment::Unpriced(e) => {
                match e {
                    ConversionError::IncompatibleDimensions { .. } => {
                        stats.failed_incompatible_dimensions += 1
                    }
                    ConversionError::UnknownUnit(_) => stats.failed_unknown_unit += 1,
                }
                stats.unpriced_ingredients.push(ingredient.thing().to_string());
                tracing::warn!(ingredient = ingredient.thing(), error = %e, "could not price ingredient");
            }
            Apportionment::MissingCost => {
                stats.skipped_missing_cost += 1;
                stats.unpriced_ingredients.push(ingredient.thing().to_string());
                tracing::warn!(ingredient = ingredient.thing(), "no cost recorded, skipping");
            }
        }

        ingredient.set_price(outcome.price());
        outcomes.push(outcome);
    }

    outcomes
}
