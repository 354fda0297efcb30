use thiserror::Error;

use crate::CalculatorId;

/// Errors raised by presets, validation, calculators and configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FootprintError {
    /// A field is missing, non-finite, or outside its declared domain.
    #[error("invalid input for {calculator}: {field} {rule}")]
    InvalidInput {
        calculator: CalculatorId,
        field: &'static str,
        rule: &'static str,
    },
    /// A preset key, device id or chip id that no reference table carries.
    #[error("unknown reference: {key:?} is not in the {table} table")]
    UnknownReference { table: &'static str, key: String },
    #[error("unit mismatch: table is in {found}, quantity is in {expected}")]
    UnitMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("non-finite {quantity} computed by {calculator}")]
    NonFiniteResult {
        calculator: CalculatorId,
        quantity: &'static str,
    },
    #[error("config error: {0}")]
    Config(String),
}

impl FootprintError {
    /// True for rejections the user can fix by editing a form field.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            FootprintError::InvalidInput { .. } | FootprintError::NonFiniteResult { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FootprintError>;
