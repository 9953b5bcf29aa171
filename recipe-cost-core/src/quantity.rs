//! Parsing of typed-in quantities and prices.
//!
//! Accepts plain decimals ("2.5") and whitespace-separated fraction tokens
//! that are summed ("1 1/2", "3/4", "2 1/4").

use crate::error::QuantityError;

/// Parse a quantity string into a decimal value.
///
/// Handles:
/// - Integers: "8" → 8.0
/// - Decimals: "2.5" → 2.5
/// - Fractions: "3/4" → 0.75
/// - Mixed numbers: "1 1/2" → 1.5
pub fn parse_quantity(input: &str) -> Result<f64, QuantityError> {
    let trimmed = input.trim();
    let malformed = || QuantityError::Malformed(trimmed.to_string());

    if trimmed.is_empty() {
        return Err(malformed());
    }

    let value = if trimmed.contains('/') {
        let mut sum = 0.0;
        for token in trimmed.split_whitespace() {
            sum += parse_token(token).ok_or_else(malformed)?;
        }
        sum
    } else {
        parse_number(trimmed).ok_or_else(malformed)?
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed())
    }
}

/// Parse a quantity that must be strictly positive.
pub fn parse_positive_quantity(input: &str) -> Result<f64, QuantityError> {
    let value = parse_quantity(input)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(QuantityError::NotPositive(value))
    }
}

/// Parse a price. A leading `$` is allowed and zero is fine.
pub fn parse_money(input: &str) -> Result<f64, QuantityError> {
    let trimmed = input.trim();
    let value = parse_quantity(trimmed.strip_prefix('$').unwrap_or(trimmed))?;
    if value < 0.0 {
        Err(QuantityError::Negative(value))
    } else {
        Ok(value)
    }
}

fn parse_token(token: &str) -> Option<f64> {
    if token.contains('/') {
        parse_fraction(token)
    } else {
        parse_number(token)
    }
}

/// Parse a fraction string like "1/2" or "3/4".
fn parse_fraction(s: &str) -> Option<f64> {
    let (num, denom) = s.split_once('/')?;
    let num = parse_number(num)?;
    let denom = parse_number(denom)?;
    if denom == 0.0 {
        return None;
    }
    Some(num / denom)
}

/// Finite decimals only; `str::parse` would otherwise accept "inf" and "NaN".
fn parse_number(s: &str) -> Option<f64> {
    let value: f64 = s.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
