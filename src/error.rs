//! Error types for the predict_trade crate

use thiserror::Error;

/// Custom error types for the predict_trade crate
#[derive(Debug, Error)]
pub enum PredictError {
    /// Not enough history to build a usable training table
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Requested forecast horizon is not a positive number of days
    #[error("Invalid horizon: {0} (must be at least 1 day)")]
    InvalidHorizon(usize),

    /// Failure surfaced by the regression model during fit or predict
    #[error("Model failure: {0}")]
    ModelFailure(String),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from invalid parameters
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, PredictError>;
