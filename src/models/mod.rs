//! Regression models behind a fit/predict contract
//!
//! The forecasting core only depends on these traits; the training algorithm
//! itself is swappable. Trained models are assumed deterministic for a fixed
//! seed and idempotent under repeated prediction, so failures are propagated
//! unchanged and never retried.

use crate::error::Result;
use crate::features::FeatureTable;
use std::fmt::Debug;

/// Fitted regression model
pub trait TrainedRegressor: Debug {
    /// Predict the target for a single feature row
    fn predict_one(&self, row: &[f64]) -> Result<f64>;

    /// Predict targets for a batch of feature rows
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regression model that can be fitted to a feature table
pub trait Regressor: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedRegressor;

    /// Fit the model to the table's rows and targets
    fn fit(&self, table: &FeatureTable) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod random_forest;
