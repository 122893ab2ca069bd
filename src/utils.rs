//! Utility functions for the predict_trade crate

use crate::error::{PredictError, Result};
use crate::features::FeatureTable;
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Split a feature table into training and test sets
///
/// Rows are assigned by a uniform random shuffle under the given seed, so the
/// same seed always yields the same partition. When the table is so small
/// that `len * test_fraction` rounds below one row, the fraction is
/// overridden to `1 / len` so the test set still gets exactly one row.
pub fn train_test_split(
    table: &FeatureTable,
    test_fraction: f64,
    seed: u64,
) -> Result<(FeatureTable, FeatureTable)> {
    if table.len() < 2 {
        return Err(PredictError::ValidationError(format!(
            "Cannot split a table of {} row(s) into train and test sets",
            table.len()
        )));
    }

    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(PredictError::ValidationError(format!(
            "Test fraction must be between 0 and 1, got {}",
            test_fraction
        )));
    }

    let len = table.len();
    let fraction = if (len as f64) * test_fraction < 1.0 {
        1.0 / len as f64
    } else {
        test_fraction
    };

    let test_len = ((len as f64 * fraction).ceil() as usize).clamp(1, len - 1);

    let mut indices: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let (test_indices, train_indices) = indices.split_at(test_len);

    Ok((table.subset(train_indices), table.subset(test_indices)))
}

/// Calendar dates for each forecast step after the last historical date
///
/// Consecutive days with no weekend or holiday adjustment.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon)
        .map(|i| last_date + Duration::days(i as i64))
        .collect()
}
