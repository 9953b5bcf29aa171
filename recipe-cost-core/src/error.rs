use thiserror::Error;

use crate::units::Dimension;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("Unknown unit: \"{0}\"")]
    UnknownUnit(String),

    #[error("Cannot convert from '{from}' ({from_dimension}) to '{to}' ({to_dimension})")]
    IncompatibleDimensions {
        from: String,
        to: String,
        from_dimension: Dimension,
        to_dimension: Dimension,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantityError {
    #[error("Not a number or fraction: \"{0}\"")]
    Malformed(String),

    #[error("Quantity must be greater than zero, got {0}")]
    NotPositive(f64),

    #[error("Amount cannot be negative, got {0}")]
    Negative(f64),
}
