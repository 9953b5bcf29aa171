//! Weight-to-volume bridging for ingredients bought by weight.
//!
//! Flour comes in 5 lb bags but recipes ask for cups. When the purchase is
//! in a mass unit and the recipe is not, the purchase is re-expressed in cups
//! using the ingredient's density rate before apportionment.

use ingredient_density::DensityTable;

use crate::error::ConversionError;
use crate::recipe::{Cost, Ingredient};
use crate::units::{Unit, CUPS, POUNDS};

/// Purchased by weight, used by something other than weight.
pub fn needs_density_bridge(ingredient: &Ingredient, cost: &Cost) -> Result<bool, ConversionError> {
    let purchased = Unit::parse(cost.measure())?;
    let used = Unit::parse(ingredient.measure())?;
    Ok(purchased.is_mass() && !used.is_mass())
}

/// Re-express a mass cost in cups at `cups_per_pound`.
///
/// Returns a new cost and leaves `cost` as it was purchased.
pub fn apply_density(cost: &Cost, cups_per_pound: f64) -> Result<Cost, ConversionError> {
    let pounds = Unit::parse(cost.measure())?.convert_to(cost.quantity(), &Unit::parse(POUNDS)?)?;
    let cups = pounds * cups_per_pound;

    tracing::debug!(
        from_quantity = cost.quantity(),
        from_measure = cost.measure(),
        pounds,
        cups_per_pound,
        cups,
        "bridged mass purchase to volume"
    );

    Ok(cost.remeasured(cups, CUPS))
}

/// The cost to apportion against: bridged to cups when the ingredient is
/// bought by weight and used by volume or count, otherwise `None`.
pub fn bridge_cost(
    ingredient: &Ingredient,
    cost: &Cost,
    table: &DensityTable,
) -> Result<Option<Cost>, ConversionError> {
    if !needs_density_bridge(ingredient, cost)? {
        return Ok(None);
    }
    let rate = table.lookup_rate(ingredient.thing());
    apply_density(cost, rate).map(Some)
}
