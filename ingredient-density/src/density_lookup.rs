//! Ingredient density lookup for weight-to-volume conversion.
//!
//! Rates are stored as US cups per pound. A pound of flour fills about
//! 3.33 cups, so a 5 lb bag is treated as 16.65 cups.
//!
//! Rules are evaluated top to bottom and the first match wins, which is
//! what lets "brown sugar" beat the plain "sugar" rule below it.

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

/// Rate used when no rule matches.
pub const DEFAULT_CUPS_PER_POUND: f64 = 2.0;

#[derive(Error, Debug)]
pub enum DensityError {
    #[error("Invalid density table JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Density rule for \"{pattern}\" has a non-positive rate: {rate}")]
    NonPositiveRate { pattern: String, rate: f64 },

    #[error("Default density rate must be positive, got {0}")]
    NonPositiveDefault(f64),

    #[error("Density rule has an empty pattern")]
    EmptyPattern,
}

// =============================================================================
// Data structures
// =============================================================================

/// How a rule's pattern is compared against a normalized ingredient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The name contains the pattern anywhere.
    Contains,
    /// The name is exactly the pattern.
    Equals,
}

/// A single ordered entry in the density table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityRule {
    #[serde(rename = "match")]
    pub kind: MatchKind,
    pub pattern: String,
    pub cups_per_pound: f64,
}

impl DensityRule {
    pub fn contains(pattern: &str, cups_per_pound: f64) -> Self {
        Self {
            kind: MatchKind::Contains,
            pattern: pattern.to_string(),
            cups_per_pound,
        }
    }

    pub fn equals(pattern: &str, cups_per_pound: f64) -> Self {
        Self {
            kind: MatchKind::Equals,
            pattern: pattern.to_string(),
            cups_per_pound,
        }
    }

    /// Check a rule against an already-normalized ingredient name.
    pub fn matches(&self, normalized: &str) -> bool {
        match self.kind {
            MatchKind::Contains => normalized.contains(self.pattern.as_str()),
            MatchKind::Equals => normalized == self.pattern,
        }
    }
}

/// On-disk format for a density table.
#[derive(Deserialize, Serialize)]
struct DensityTableFile {
    #[serde(default = "default_rate")]
    default_cups_per_pound: f64,
    rules: Vec<DensityRule>,
}

fn default_rate() -> f64 {
    DEFAULT_CUPS_PER_POUND
}

/// Ordered rule list plus the fallback rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityTable {
    rules: Vec<DensityRule>,
    default_cups_per_pound: f64,
}

// =============================================================================
// Data loading
// =============================================================================

/// Embedded rule table.
static BUILTIN_JSON: &str = include_str!("data/rules.json");

static BUILTIN: LazyLock<DensityTable> = LazyLock::new(|| {
    DensityTable::from_json(BUILTIN_JSON).expect("rules.json should be a valid density table")
});

impl DensityTable {
    /// Build a table from rules in priority order.
    ///
    /// Patterns are normalized the same way ingredient names are, so a rule
    /// written as "Brown Sugar" still matches.
    pub fn new(rules: Vec<DensityRule>, default_cups_per_pound: f64) -> Result<Self, DensityError> {
        if !(default_cups_per_pound > 0.0 && default_cups_per_pound.is_finite()) {
            return Err(DensityError::NonPositiveDefault(default_cups_per_pound));
        }

        let rules = rules
            .into_iter()
            .map(|rule| {
                let pattern = normalize_ingredient_name(&rule.pattern);
                if pattern.is_empty() {
                    return Err(DensityError::EmptyPattern);
                }
                if !(rule.cups_per_pound > 0.0 && rule.cups_per_pound.is_finite()) {
                    return Err(DensityError::NonPositiveRate {
                        pattern,
                        rate: rule.cups_per_pound,
                    });
                }
                Ok(DensityRule { pattern, ..rule })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            default_cups_per_pound,
        })
    }

    /// Parse a table from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, DensityError> {
        let file: DensityTableFile = serde_json::from_str(json)?;
        Self::new(file.rules, file.default_cups_per_pound)
    }

    /// Serialize the table back to the JSON form accepted by [`DensityTable::from_json`].
    pub fn to_json(&self) -> Result<String, DensityError> {
        let file = DensityTableFile {
            default_cups_per_pound: self.default_cups_per_pound,
            rules: self.rules.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// The table shipped with the crate.
    pub fn builtin() -> &'static DensityTable {
        &BUILTIN
    }

    /// Replace the fallback rate, keeping the rules.
    pub fn with_default_rate(self, default_cups_per_pound: f64) -> Result<Self, DensityError> {
        Self::new(self.rules, default_cups_per_pound)
    }

    pub fn rules(&self) -> &[DensityRule] {
        &self.rules
    }

    pub fn default_rate(&self) -> f64 {
        self.default_cups_per_pound
    }

    /// First rule matching the ingredient name, if any.
    pub fn find_rule(&self, ingredient_name: &str) -> Option<&DensityRule> {
        let normalized = normalize_ingredient_name(ingredient_name);
        self.rules.iter().find(|rule| rule.matches(&normalized))
    }

    /// Cups per pound for an ingredient, falling back to the default rate.
    pub fn lookup_rate(&self, ingredient_name: &str) -> f64 {
        match self.find_rule(ingredient_name) {
            Some(rule) => {
                tracing::debug!(
                    ingredient = ingredient_name,
                    pattern = %rule.pattern,
                    rate = rule.cups_per_pound,
                    "density rule matched"
                );
                rule.cups_per_pound
            }
            None => {
                tracing::debug!(
                    ingredient = ingredient_name,
                    rate = self.default_cups_per_pound,
                    "no density rule matched, using default"
                );
                self.default_cups_per_pound
            }
        }
    }
}

impl Default for DensityTable {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Normalize ingredient name for matching.
pub fn normalize_ingredient_name(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Look up cups per pound in the built-in table.
pub fn lookup_rate(ingredient_name: &str) -> f64 {
    BUILTIN.lookup_rate(ingredient_name)
}

// =============================================================================
// Tests
// =============================================================================
