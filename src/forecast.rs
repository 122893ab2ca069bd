//! Recursive multi-step forecasting
//!
//! The engine walks the horizon one day at a time: each step builds a single
//! feature row from the working state, asks the trained model for the next
//! close, and feeds that close back into the state for the following step.

use crate::data::PriceHistory;
use crate::error::{PredictError, Result};
use crate::features::{trailing_mean, Feature, FeatureSet};
use crate::models::TrainedRegressor;
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How predictions feed back into the rolling-mean features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FeedbackPolicy {
    /// Rolling means are recomputed from the historical closes only, so they
    /// stay constant across the horizon and predictions feed back solely
    /// through `prev_close`. Matches the observed behavior of the system
    /// this engine reproduces.
    #[default]
    StaticTail,
    /// Rolling means are taken over the historical closes extended with the
    /// predictions made so far in this run.
    Recursive,
}

/// Mutable working row for the recursive loop
///
/// Only `close` evolves; open, high and low keep their last historical
/// values for every step, since the model predicts closes only.
#[derive(Debug, Clone, Copy)]
struct ForecastState {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

/// One forecasted day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Calendar date of the prediction
    pub date: NaiveDate,
    /// Predicted closing price
    pub close: f64,
}

/// Ordered multi-step forecast
///
/// Exactly `horizon` points, dates strictly increasing by one calendar day
/// from the last historical date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    points: Vec<ForecastPoint>,
}

impl Forecast {
    /// Get the forecasted points
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Get the predicted closes in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Get the forecast dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// Number of forecasted days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the forecast is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Forecast `horizon` future closes by recursive single-step prediction
///
/// The feature rows use the same `feature_set` the model was trained with.
/// Step `i + 1` cannot begin before step `i` has produced its close, so the
/// loop is strictly sequential.
pub fn forecast<M: TrainedRegressor>(
    model: &M,
    feature_set: &FeatureSet,
    history: &PriceHistory,
    horizon: usize,
    policy: FeedbackPolicy,
) -> Result<Forecast> {
    if horizon < 1 {
        return Err(PredictError::InvalidHorizon(horizon));
    }

    let last = history.last().ok_or_else(|| {
        PredictError::InsufficientData("Cannot forecast from an empty history".to_string())
    })?;

    let mut state = ForecastState {
        open: last.open,
        high: last.high,
        low: last.low,
        close: last.close,
    };

    let historical_closes = history.closes();
    // Only consulted under the Recursive policy; grows by one close per step.
    let mut extended_closes = historical_closes.clone();

    let dates = future_dates(last.date, horizon);
    let mut points = Vec::with_capacity(horizon);

    for date in dates {
        let mut row = Vec::with_capacity(feature_set.len());

        for feature in feature_set.features() {
            let value = match feature {
                Feature::PrevClose => state.close,
                Feature::HighLowSpread => state.high - state.low,
                Feature::OpenCloseSpread => state.open - state.close,
                Feature::Ma10 | Feature::Ma50 => {
                    let window = feature.window().unwrap_or(1);
                    let series = match policy {
                        FeedbackPolicy::StaticTail => &historical_closes,
                        FeedbackPolicy::Recursive => &extended_closes,
                    };
                    trailing_mean(series, window).ok_or_else(|| {
                        PredictError::InsufficientData(format!(
                            "History shorter than the {}-day rolling window",
                            window
                        ))
                    })?
                }
            };
            row.push(value);
        }

        let next_close = model.predict_one(&row)?;
        points.push(ForecastPoint {
            date,
            close: next_close,
        });

        state.close = next_close;
        if policy == FeedbackPolicy::Recursive {
            extended_closes.push(next_close);
        }
    }

    Ok(Forecast { points })
}
