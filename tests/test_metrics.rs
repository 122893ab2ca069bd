use assert_approx_eq::assert_approx_eq;
use predict_trade::error::{PredictError, Result};
use predict_trade::features::{FeatureSet, FeatureTable};
use predict_trade::metrics::{evaluate_model, regression_metrics};
use predict_trade::models::TrainedRegressor;

#[test]
fn known_error_values() {
    let predicted = vec![1.0, 2.0, 3.0];
    let actual = vec![2.0, 3.0, 4.0];

    let metrics = regression_metrics(&predicted, &actual).unwrap();
    assert_approx_eq!(metrics.mae, 1.0);
    assert_approx_eq!(metrics.mse, 1.0);
    assert_approx_eq!(metrics.rmse, 1.0);
}

#[test]
fn mixed_sign_errors() {
    let predicted = vec![10.0, 10.0];
    let actual = vec![7.0, 13.0];

    let metrics = regression_metrics(&predicted, &actual).unwrap();
    assert_approx_eq!(metrics.mae, 3.0);
    assert_approx_eq!(metrics.mse, 9.0);
    assert_approx_eq!(metrics.rmse, 3.0);
}

#[test]
fn perfect_prediction_scores_zero() {
    let values = vec![5.0, 6.0, 7.0];
    let metrics = regression_metrics(&values, &values).unwrap();
    assert_approx_eq!(metrics.mse, 0.0);
    assert_approx_eq!(metrics.mae, 0.0);
}

#[test]
fn length_mismatch_is_rejected() {
    let result = regression_metrics(&[1.0, 2.0], &[1.0]);
    assert!(matches!(result, Err(PredictError::ValidationError(_))));

    let result = regression_metrics(&[], &[]);
    assert!(matches!(result, Err(PredictError::ValidationError(_))));
}

/// Predicts the first feature of each row unchanged
#[derive(Debug)]
struct FirstFeature;

impl TrainedRegressor for FirstFeature {
    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        row.first().copied().ok_or_else(|| {
            PredictError::ModelFailure("Empty feature row".to_string())
        })
    }

    fn name(&self) -> &str {
        "First Feature Stub"
    }
}

#[test]
fn evaluate_model_on_a_test_table() {
    let set = FeatureSet::for_record_count(5);
    let rows = vec![
        vec![10.0, 2.0, -0.5],
        vec![20.0, 2.0, -0.5],
        vec![30.0, 2.0, -0.5],
    ];
    let targets = vec![11.0, 19.0, 30.0];
    let table = FeatureTable::from_parts(set, rows, targets).unwrap();

    let metrics = evaluate_model(&FirstFeature, &table).unwrap();
    // Errors are 1, -1, 0
    assert_approx_eq!(metrics.mse, 2.0 / 3.0);
    assert_approx_eq!(metrics.mae, 2.0 / 3.0);
}

#[test]
fn evaluate_model_rejects_an_empty_table() {
    let set = FeatureSet::for_record_count(5);
    let table = FeatureTable::from_parts(set, vec![], vec![]).unwrap();

    let result = evaluate_model(&FirstFeature, &table);
    assert!(matches!(result, Err(PredictError::ValidationError(_))));
}

#[test]
fn metrics_display_is_readable() {
    let metrics = regression_metrics(&[1.0, 2.0], &[2.0, 3.0]).unwrap();
    let text = format!("{}", metrics);
    assert!(text.contains("MSE"));
    assert!(text.contains("RMSE"));
    assert!(text.contains("MAE"));
}
