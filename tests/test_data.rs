use chrono::NaiveDate;
use predict_trade::data::{CachedSource, DataLoader, Observation, PriceHistory, PriceSource};
use predict_trade::error::{PredictError, Result};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn obs(date: &str, close: f64) -> Observation {
    Observation {
        date: date.parse().unwrap(),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: None,
    }
}

#[test]
fn history_accepts_chronological_observations() {
    let history = PriceHistory::new(vec![
        obs("2023-01-02", 100.0),
        obs("2023-01-03", 101.0),
        obs("2023-01-04", 102.0),
    ])
    .unwrap();

    assert_eq!(history.len(), 3);
    assert_eq!(history.closes(), vec![100.0, 101.0, 102.0]);
    assert_eq!(history.last().unwrap().close, 102.0);
}

#[test]
fn history_rejects_out_of_order_dates() {
    let result = PriceHistory::new(vec![obs("2023-01-03", 100.0), obs("2023-01-02", 101.0)]);
    assert!(matches!(result, Err(PredictError::DataError(_))));
}

#[test]
fn history_rejects_duplicate_dates() {
    let result = PriceHistory::new(vec![obs("2023-01-02", 100.0), obs("2023-01-02", 101.0)]);
    assert!(matches!(result, Err(PredictError::DataError(_))));
}

#[test]
fn load_yfinance_style_csv() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Date,Open,High,Low,Close,Volume").unwrap();
    writeln!(file, "2023-01-02,99.5,101.0,99.0,100.0,1200").unwrap();
    writeln!(file, "2023-01-03,100.5,102.0,100.0,101.0,1500").unwrap();

    let history = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(history.len(), 2);

    let first = &history.observations()[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    assert_eq!(first.close, 100.0);
    assert_eq!(first.volume, Some(1200.0));
}

#[test]
fn load_csv_without_volume_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,open,high,low,close").unwrap();
    writeln!(file, "2023-01-02,99.5,101.0,99.0,100.0").unwrap();

    let history = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history.observations()[0].volume, None);
}

#[test]
fn load_csv_missing_file_fails() {
    let result = DataLoader::from_csv("/nonexistent/prices.csv");
    assert!(result.is_err());
}

/// Source that counts fetches and serves a fixed three-day history
#[derive(Debug, Default)]
struct CountingSource {
    fetches: usize,
}

impl PriceSource for CountingSource {
    fn fetch(&mut self, _ticker: &str, _start: NaiveDate, _end: NaiveDate) -> Result<PriceHistory> {
        self.fetches += 1;
        PriceHistory::new(vec![
            obs("2023-01-02", 100.0),
            obs("2023-01-03", 101.0),
            obs("2023-01-04", 102.0),
        ])
    }
}

#[test]
fn cached_source_memoizes_by_range() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();

    let mut source = CachedSource::new(CountingSource::default());

    let first = source.fetch("TSLA", start, end).unwrap();
    let second = source.fetch("TSLA", start, end).unwrap();
    assert_eq!(first, second);
    assert_eq!(source.inner().fetches, 1);
    assert_eq!(source.cached_ranges(), 1);

    // A different key misses the cache
    source.fetch("AAPL", start, end).unwrap();
    assert_eq!(source.inner().fetches, 2);
}

#[test]
fn cached_source_invalidation_forces_refetch() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let end = NaiveDate::from_ymd_opt(2023, 1, 4).unwrap();

    let mut source = CachedSource::new(CountingSource::default());
    source.fetch("TSLA", start, end).unwrap();
    source.invalidate("TSLA", start, end);
    source.fetch("TSLA", start, end).unwrap();
    assert_eq!(source.inner().fetches, 2);

    source.clear();
    assert_eq!(source.cached_ranges(), 0);
    source.fetch("TSLA", start, end).unwrap();
    assert_eq!(source.inner().fetches, 3);
}
