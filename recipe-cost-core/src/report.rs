//! Per-ingredient price listing and recipe total.

use std::fmt;

use serde::Serialize;

use crate::recipe::Recipe;

/// One ingredient's line in the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ReportLine {
    Priced { name: String, price: f64 },
    Unpriced { name: String },
}

impl fmt::Display for ReportLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportLine::Priced { name, price } => write!(f, "{}: ${:.2}", name, price),
            ReportLine::Unpriced { name } => write!(f, "Don't have price for {}", name),
        }
    }
}

/// Costs for a priced recipe.
///
/// The total only counts ingredients that have a price; the others stay in
/// the listing as explicitly unpriced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeReport {
    pub recipe_name: String,
    pub lines: Vec<ReportLine>,
    pub total: f64,
}

impl RecipeReport {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let lines: Vec<ReportLine> = recipe
            .ingredients()
            .iter()
            .map(|ingredient| match ingredient.price() {
                Some(price) => ReportLine::Priced {
                    name: ingredient.thing().to_string(),
                    price,
                },
                None => ReportLine::Unpriced {
                    name: ingredient.thing().to_string(),
                },
            })
            .collect();

        // fold from +0.0: an empty f64 sum is -0.0, which prints as "$-0.00"
        let total = lines.iter().fold(0.0, |sum, line| match line {
            ReportLine::Priced { price, .. } => sum + price,
            ReportLine::Unpriced { .. } => sum,
        });

        Self {
            recipe_name: recipe.name().to_string(),
            lines,
            total,
        }
    }

    pub fn unpriced(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().filter_map(|line| match line {
            ReportLine::Unpriced { name } => Some(name.as_str()),
            ReportLine::Priced { .. } => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.unpriced().next().is_none()
    }
}

impl fmt::Display for RecipeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Costs for recipe {}:", self.recipe_name)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        write!(f, "Total: ${:.2}", self.total)
    }
}
