//! Recipe, ingredient and purchase-cost records.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::error::QuantityError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Invalid quantity for {field}: {source}")]
    InvalidQuantity {
        field: &'static str,
        #[source]
        source: QuantityError,
    },
}

fn check_positive(field: &'static str, value: f64) -> Result<f64, ModelError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ModelError::InvalidQuantity {
            field,
            source: QuantityError::NotPositive(value),
        })
    }
}

/// What was paid for a bulk purchase, e.g. $2.19 for 5 pounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cost {
    money: f64,
    quantity: f64,
    measure: String,
}

impl Cost {
    pub fn new(money: f64, quantity: f64, measure: impl Into<String>) -> Result<Self, ModelError> {
        if !(money >= 0.0 && money.is_finite()) {
            return Err(ModelError::InvalidQuantity {
                field: "money",
                source: QuantityError::Negative(money),
            });
        }
        Ok(Self {
            money,
            quantity: check_positive("bulk quantity", quantity)?,
            measure: measure.into(),
        })
    }

    pub fn money(&self) -> f64 {
        self.money
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn measure(&self) -> &str {
        &self.measure
    }

    /// Same purchase, same money, expressed in another unit.
    pub(crate) fn remeasured(&self, quantity: f64, measure: &str) -> Cost {
        Cost {
            money: self.money,
            quantity,
            measure: measure.to_string(),
        }
    }
}

/// One line of a recipe: how much of what, plus what it cost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ingredient {
    quantity: f64,
    measure: String,
    thing: String,
    /// The bulk purchase this ingredient comes out of.
    cost: Option<Cost>,
    /// The price for just the amount the recipe uses.
    price: Option<f64>,
}

impl Ingredient {
    pub fn new(
        quantity: f64,
        measure: impl Into<String>,
        thing: impl Into<String>,
    ) -> Result<Self, ModelError> {
        Ok(Self {
            quantity: check_positive("quantity", quantity)?,
            measure: measure.into(),
            thing: thing.into(),
            cost: None,
            price: None,
        })
    }

    /// Attach the bulk purchase cost. Any previously computed price is
    /// dropped since it no longer reflects the cost.
    pub fn set_cost(&mut self, cost: Cost) {
        self.cost = Some(cost);
        self.price = None;
    }

    pub fn with_cost(mut self, cost: Cost) -> Self {
        self.set_cost(cost);
        self
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn measure(&self) -> &str {
        &self.measure
    }

    pub fn thing(&self) -> &str {
        &self.thing
    }

    pub fn cost(&self) -> Option<&Cost> {
        self.cost.as_ref()
    }

    pub fn price(&self) -> Option<f64> {
        self.price
    }

    pub(crate) fn set_price(&mut self, price: Option<f64>) {
        self.price = price;
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} of {}.",
            format_quantity(self.quantity),
            self.measure,
            self.thing
        )?;
        if let Some(cost) = &self.cost {
            write!(
                f,
                "\nPurchased for ${:.2} per {} {}",
                cost.money,
                format_quantity(cost.quantity),
                cost.measure
            )?;
        }
        if let Some(price) = self.price {
            write!(f, "\nTotal price for this ingredient: ${:.2}", price)?;
        }
        Ok(())
    }
}

/// A named, ordered list of ingredients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    name: String,
    pub(crate) ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ingredients: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_ingredient(&mut self, ingredient: Ingredient) {
        self.ingredients.push(ingredient);
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Mutable access for attaching costs. Prices are only ever set by
    /// [`crate::apportion::calculate_recipe_prices`].
    pub fn ingredients_mut(&mut self) -> impl Iterator<Item = &mut Ingredient> {
        self.ingredients.iter_mut()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for ingredient in &self.ingredients {
            write!(f, "\n{}", ingredient)?;
        }
        Ok(())
    }
}

/// Format a quantity for display.
/// Whole numbers print without decimals, others with up to three places.
pub fn format_quantity(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}", rounded)
    } else {
        let text = format!("{:.3}", rounded);
        text.trim_end_matches('0').to_string()
    }
}
