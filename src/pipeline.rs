//! End-to-end prediction pipeline
//!
//! History in, report out: select the feature set for the available history,
//! derive the table, split, fit the forest, evaluate on the held-out rows,
//! then run the recursive forecast. Every stage aborts the run on error; no
//! partial forecast is ever returned.

use crate::data::PriceHistory;
use crate::error::{PredictError, Result};
use crate::features::{FeatureSet, FeatureTable};
use crate::forecast::{forecast, FeedbackPolicy, Forecast};
use crate::metrics::{evaluate_model, RegressionMetrics};
use crate::models::random_forest::{ForestConfig, RandomForestRegressor};
use crate::models::Regressor;
use crate::utils::train_test_split;
use serde::Serialize;
use tracing::{debug, info};

/// Pipeline configuration
///
/// The seed drives both the train/test shuffle and the forest, so a run is
/// fully reproducible from (history, config).
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Fraction of rows held out for evaluation
    pub test_fraction: f64,
    /// Seed for partitioning and model training
    pub seed: u64,
    /// Number of future days to forecast
    pub horizon: usize,
    /// How predictions feed back into rolling-mean features
    pub feedback: FeedbackPolicy,
    /// Forest hyperparameters (its seed field is overridden by `seed`)
    pub forest: ForestConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            test_fraction: 0.2,
            seed: 123,
            horizon: 7,
            feedback: FeedbackPolicy::default(),
            forest: ForestConfig::default(),
        }
    }
}

/// Output of one pipeline run, ready for an external presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct PredictionReport {
    /// Feature names the model was trained with, in order
    pub features: Vec<String>,
    /// Held-out error metrics
    pub metrics: RegressionMetrics,
    /// Multi-step forecast
    pub forecast: Forecast,
}

impl PredictionReport {
    /// Serialize the report to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PredictError::DataError(format!("Report serialization failed: {}", e)))
    }
}

/// Run the full train/evaluate/forecast pipeline over a price history
pub fn run(history: &PriceHistory, config: &PipelineConfig) -> Result<PredictionReport> {
    if history.is_empty() {
        return Err(PredictError::InsufficientData(
            "No observations ingested for this ticker and date range".to_string(),
        ));
    }

    let feature_set = FeatureSet::for_record_count(history.len());
    info!(features = ?feature_set.names(), "selected model features");

    let table = FeatureTable::build(history, &feature_set)?;
    debug!(rows = table.len(), "derived feature table");

    let (train, test) = train_test_split(&table, config.test_fraction, config.seed)?;
    debug!(train = train.len(), test = test.len(), "partitioned dataset");

    let model = RandomForestRegressor::new(ForestConfig {
        seed: config.seed,
        ..config.forest.clone()
    })?;
    let trained = model.fit(&train)?;

    let metrics = evaluate_model(&trained, &test)?;
    info!(mse = metrics.mse, rmse = metrics.rmse, "held-out evaluation");

    let forecast = forecast(
        &trained,
        &feature_set,
        history,
        config.horizon,
        config.feedback,
    )?;

    Ok(PredictionReport {
        features: feature_set.names().iter().map(|s| s.to_string()).collect(),
        metrics,
        forecast,
    })
}
