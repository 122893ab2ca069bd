use chrono::NaiveDate;
use predict_trade::error::PredictError;
use predict_trade::features::{FeatureSet, FeatureTable};
use predict_trade::utils::{future_dates, train_test_split};
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Table with `rows` rows over the three base features; targets are the row
/// index so partitions can be compared.
fn table_of(rows: usize) -> FeatureTable {
    let set = FeatureSet::for_record_count(5);
    let data: Vec<Vec<f64>> = (0..rows)
        .map(|i| vec![i as f64, 2.0, -0.5])
        .collect();
    let targets: Vec<f64> = (0..rows).map(|i| 100.0 + i as f64).collect();
    FeatureTable::from_parts(set, data, targets).unwrap()
}

#[test]
fn tiny_table_guard_yields_single_test_row() {
    // 3 rows at fraction 0.2: 3 * 0.2 = 0.6 < 1, so the fraction is
    // overridden to 1/3 and exactly one row lands in the test set
    let table = table_of(3);
    let (train, test) = train_test_split(&table, 0.2, 123).unwrap();

    assert_eq!(test.len(), 1);
    assert_eq!(train.len(), 2);
}

#[rstest]
#[case(10, 0.2, 2)]
#[case(21, 0.2, 5)] // ceil(4.2)
#[case(50, 0.5, 25)]
fn split_sizes(#[case] rows: usize, #[case] fraction: f64, #[case] expected_test: usize) {
    let table = table_of(rows);
    let (train, test) = train_test_split(&table, fraction, 123).unwrap();

    assert_eq!(test.len(), expected_test);
    assert_eq!(train.len() + test.len(), rows);
    assert!(test.len() >= 1);
    assert!(train.len() >= 1);
}

#[test]
fn split_partitions_without_replacement() {
    let table = table_of(20);
    let (train, test) = train_test_split(&table, 0.2, 7).unwrap();

    let mut all: Vec<f64> = train
        .targets()
        .iter()
        .chain(test.targets().iter())
        .copied()
        .collect();
    all.sort_by(|a, b| a.partial_cmp(b).unwrap());

    let expected: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
    assert_eq!(all, expected);
}

#[test]
fn split_is_reproducible_for_a_fixed_seed() {
    let table = table_of(30);

    let (train_a, test_a) = train_test_split(&table, 0.2, 123).unwrap();
    let (train_b, test_b) = train_test_split(&table, 0.2, 123).unwrap();
    assert_eq!(train_a.targets(), train_b.targets());
    assert_eq!(test_a.targets(), test_b.targets());

    let (_, test_c) = train_test_split(&table, 0.2, 456).unwrap();
    assert_ne!(test_a.targets(), test_c.targets());
}

#[test]
fn split_rejects_bad_fractions() {
    let table = table_of(10);
    assert!(matches!(
        train_test_split(&table, 0.0, 123),
        Err(PredictError::ValidationError(_))
    ));
    assert!(matches!(
        train_test_split(&table, 1.0, 123),
        Err(PredictError::ValidationError(_))
    ));
}

#[test]
fn split_rejects_single_row_table() {
    let table = table_of(1);
    assert!(matches!(
        train_test_split(&table, 0.2, 123),
        Err(PredictError::ValidationError(_))
    ));
}

#[test]
fn future_dates_are_consecutive_calendar_days() {
    let last = NaiveDate::from_ymd_opt(2023, 3, 10).unwrap();
    let dates = future_dates(last, 5);

    assert_eq!(dates.len(), 5);
    assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 3, 11).unwrap());
    // No weekend adjustment: the 11th and 12th are a Saturday and Sunday
    assert_eq!(dates[4], NaiveDate::from_ymd_opt(2023, 3, 15).unwrap());
    for pair in dates.windows(2) {
        assert_eq!((pair[1] - pair[0]).num_days(), 1);
    }
}
