//! Supervised feature engineering over daily OHLC history
//!
//! The feature set is an explicit, ordered value chosen once per run from the
//! available history length and threaded through training and forecasting;
//! downstream code never infers it from table shape.

use crate::data::PriceHistory;
use crate::error::{PredictError, Result};
use serde::{Deserialize, Serialize};

/// Minimum eligible rows required after dropping undefined leading rows
pub const MIN_TRAINING_ROWS: usize = 10;

/// History length at which the 10-day rolling mean becomes eligible
pub const MA10_THRESHOLD: usize = 20;

/// History length at which the 50-day rolling mean becomes eligible
pub const MA50_THRESHOLD: usize = 60;

/// One supervised feature derived from the OHLC history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    /// Previous day's close
    PrevClose,
    /// Daily high minus daily low
    HighLowSpread,
    /// Daily open minus daily close
    OpenCloseSpread,
    /// 10-day trailing mean of close, inclusive of the current day
    Ma10,
    /// 50-day trailing mean of close, inclusive of the current day
    Ma50,
}

impl Feature {
    /// Stable column name for reports and logs
    pub fn name(&self) -> &'static str {
        match self {
            Feature::PrevClose => "prev_close",
            Feature::HighLowSpread => "high_low_spread",
            Feature::OpenCloseSpread => "open_close_spread",
            Feature::Ma10 => "ma10",
            Feature::Ma50 => "ma50",
        }
    }

    /// Trailing window width for rolling features
    pub fn window(&self) -> Option<usize> {
        match self {
            Feature::Ma10 => Some(10),
            Feature::Ma50 => Some(50),
            _ => None,
        }
    }

    /// Number of leading history rows for which this feature is undefined
    fn leading_rows(&self) -> usize {
        match self {
            Feature::PrevClose => 1,
            Feature::HighLowSpread | Feature::OpenCloseSpread => 0,
            Feature::Ma10 => 9,
            Feature::Ma50 => 49,
        }
    }
}

/// Ordered list of features selected for a run
///
/// Every row derived during a run contains exactly these features, in this
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    /// Create a feature set from an explicit ordered list
    pub fn new(features: Vec<Feature>) -> Result<Self> {
        if features.is_empty() {
            return Err(PredictError::ValidationError(
                "Feature set must contain at least one feature".to_string(),
            ));
        }

        for (i, feature) in features.iter().enumerate() {
            if features[..i].contains(feature) {
                return Err(PredictError::ValidationError(format!(
                    "Duplicate feature in set: {}",
                    feature.name()
                )));
            }
        }

        Ok(Self { features })
    }

    /// Select the feature set for a given history length
    ///
    /// The base features are always included; each rolling mean requires
    /// twice its window of history so that a useful number of defined rows
    /// remains after the leading rows are dropped.
    pub fn for_record_count(record_count: usize) -> Self {
        let mut features = vec![
            Feature::PrevClose,
            Feature::HighLowSpread,
            Feature::OpenCloseSpread,
        ];

        if record_count >= MA10_THRESHOLD {
            features.push(Feature::Ma10);
        }
        if record_count >= MA50_THRESHOLD {
            features.push(Feature::Ma50);
        }

        Self { features }
    }

    /// Get the ordered features
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Get the ordered feature names
    pub fn names(&self) -> Vec<&'static str> {
        self.features.iter().map(Feature::name).collect()
    }

    /// Check whether a feature is selected
    pub fn contains(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// Number of selected features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Check whether the set is empty (never true for a selected set)
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Rows at the start of the history for which any selected feature is
    /// undefined
    fn leading_rows(&self) -> usize {
        self.features
            .iter()
            .map(Feature::leading_rows)
            .max()
            .unwrap_or(0)
    }
}

/// Trailing arithmetic mean over the last `window` values of a series
///
/// Returns `None` when fewer than `window` values are available.
pub fn trailing_mean(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }

    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Feature table with one row per eligible observation
///
/// The target is the same-day close; `prev_close` carries the lag, so each
/// row pairs yesterday's state with today's outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    feature_set: FeatureSet,
    rows: Vec<Vec<f64>>,
    targets: Vec<f64>,
}

impl FeatureTable {
    /// Derive the feature table for a history and a selected feature set
    ///
    /// Leading rows with any undefined lagged or rolling value are dropped.
    /// Fails with [`PredictError::InsufficientData`] when the history is
    /// empty or fewer than [`MIN_TRAINING_ROWS`] rows remain.
    pub fn build(history: &PriceHistory, feature_set: &FeatureSet) -> Result<Self> {
        if history.is_empty() {
            return Err(PredictError::InsufficientData(
                "No observations ingested; cannot derive features".to_string(),
            ));
        }

        let observations = history.observations();
        let closes = history.closes();
        let skip = feature_set.leading_rows();

        let mut rows = Vec::with_capacity(observations.len().saturating_sub(skip));
        let mut targets = Vec::with_capacity(rows.capacity());

        for t in skip..observations.len() {
            let obs = &observations[t];
            let mut row = Vec::with_capacity(feature_set.len());

            for feature in feature_set.features() {
                let value = match feature {
                    Feature::PrevClose => closes[t - 1],
                    Feature::HighLowSpread => obs.high - obs.low,
                    Feature::OpenCloseSpread => obs.open - obs.close,
                    Feature::Ma10 | Feature::Ma50 => {
                        let window = feature.window().unwrap_or(1);
                        trailing_mean(&closes[..=t], window).ok_or_else(|| {
                            PredictError::DataError(format!(
                                "Rolling window {} undefined at row {}",
                                window, t
                            ))
                        })?
                    }
                };
                row.push(value);
            }

            rows.push(row);
            targets.push(obs.close);
        }

        if rows.len() < MIN_TRAINING_ROWS {
            return Err(PredictError::InsufficientData(format!(
                "Only {} usable rows after dropping undefined values; need at least {}. \
                 Use an earlier start date.",
                rows.len(),
                MIN_TRAINING_ROWS
            )));
        }

        Ok(Self {
            feature_set: feature_set.clone(),
            rows,
            targets,
        })
    }

    /// Assemble a table from pre-built rows and targets
    pub fn from_parts(
        feature_set: FeatureSet,
        rows: Vec<Vec<f64>>,
        targets: Vec<f64>,
    ) -> Result<Self> {
        if rows.len() != targets.len() {
            return Err(PredictError::ValidationError(format!(
                "Row count ({}) doesn't match target count ({})",
                rows.len(),
                targets.len()
            )));
        }

        if let Some(bad) = rows.iter().find(|row| row.len() != feature_set.len()) {
            return Err(PredictError::ValidationError(format!(
                "Row width ({}) doesn't match feature set width ({})",
                bad.len(),
                feature_set.len()
            )));
        }

        Ok(Self {
            feature_set,
            rows,
            targets,
        })
    }

    /// Get the feature set the table was built with
    pub fn feature_set(&self) -> &FeatureSet {
        &self.feature_set
    }

    /// Get the feature rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Get the training targets
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy a subset of rows into a new table, in the order given
    pub(crate) fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_set: self.feature_set.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
        }
    }
}
