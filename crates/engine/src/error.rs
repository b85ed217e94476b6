use thiserror::Error;

use satparity_common::error::AppError;

/// Reference curve construction faults.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve needs at least 2 control points, got {0}")]
    TooFewPoints(usize),

    #[error("control point {index} is not later than the one before it")]
    NonMonotoneDates { index: usize },

    #[error("control point {index} price {price} is not above the one before it")]
    NonMonotonePrices { index: usize, price: f64 },

    #[error("control point {index} has invalid price {price}")]
    InvalidPrice { index: usize, price: f64 },

    #[error("invalid control point date {0}")]
    InvalidDate(String),
}

/// Parity estimation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("invalid {field} for {code}: {value}")]
    InvalidInput {
        code: String,
        field: &'static str,
        value: f64,
    },
}

impl From<EstimateError> for AppError {
    fn from(err: EstimateError) -> Self {
        AppError::Validation(err.to_string())
    }
}
