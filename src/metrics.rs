//! Metrics for evaluating regression performance on held-out data

use crate::error::{PredictError, Result};
use crate::features::FeatureTable;
use crate::models::TrainedRegressor;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Held-out regression error metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Error
    pub mae: f64,
}

impl std::fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Regression Metrics:")?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        Ok(())
    }
}

/// Calculate error metrics for predictions against actual values
pub fn regression_metrics(predicted: &[f64], actual: &[f64]) -> Result<RegressionMetrics> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(PredictError::ValidationError(
            "Predicted and actual values must have the same non-zero length".to_string(),
        ));
    }

    let errors: Vec<f64> = predicted
        .iter()
        .zip(actual.iter())
        .map(|(&p, &a)| a - p)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).collect::<Vec<f64>>().mean();
    let mse = errors.iter().map(|e| e.powi(2)).collect::<Vec<f64>>().mean();

    Ok(RegressionMetrics {
        mse,
        rmse: mse.sqrt(),
        mae,
    })
}

/// Evaluate a trained model on a held-out test table
pub fn evaluate_model<M: TrainedRegressor>(
    model: &M,
    test: &FeatureTable,
) -> Result<RegressionMetrics> {
    if test.is_empty() {
        return Err(PredictError::ValidationError(
            "Test set is empty; nothing to evaluate".to_string(),
        ));
    }

    let predicted = model.predict(test.rows())?;
    regression_metrics(&predicted, test.targets())
}
