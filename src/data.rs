//! Daily price history handling and ingestion boundaries

use crate::error::{PredictError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One calendar day's open/high/low/close observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Trading date
    #[serde(alias = "Date")]
    pub date: NaiveDate,
    /// Opening price
    #[serde(alias = "Open")]
    pub open: f64,
    /// Daily high
    #[serde(alias = "High")]
    pub high: f64,
    /// Daily low
    #[serde(alias = "Low")]
    pub low: f64,
    /// Closing price
    #[serde(alias = "Close")]
    pub close: f64,
    /// Traded volume, when the source provides it (unused by the core)
    #[serde(alias = "Volume", default)]
    pub volume: Option<f64>,
}

/// Ordered, validated sequence of daily observations
///
/// Dates are strictly increasing with no duplicates; observations are
/// read-only once ingested.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceHistory {
    observations: Vec<Observation>,
}

impl PriceHistory {
    /// Create a price history, validating chronological order
    pub fn new(observations: Vec<Observation>) -> Result<Self> {
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(PredictError::DataError(format!(
                    "Observations out of order: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Get the observations
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Get the closing prices as a vector
    pub fn closes(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.close).collect()
    }

    /// Get the most recent observation
    pub fn last(&self) -> Option<&Observation> {
        self.observations.last()
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Check whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}

/// Data loader for daily OHLC files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price history from a CSV file
    ///
    /// Accepts yfinance-style headers (`Date,Open,High,Low,Close,Volume`)
    /// as well as lowercase variants; the volume column is optional.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceHistory> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut observations = Vec::new();

        for record in reader.deserialize() {
            let obs: Observation = record?;
            observations.push(obs);
        }

        PriceHistory::new(observations)
    }
}

/// Ingestion boundary for a market-data provider
///
/// The core only consumes this interface; an empty result is rejected as
/// insufficient data before any feature work begins.
pub trait PriceSource {
    /// Fetch daily observations for a ticker over an inclusive date range
    fn fetch(&mut self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceHistory>;
}

type CacheKey = (String, NaiveDate, NaiveDate);

/// Caller-owned memoization wrapper around a [`PriceSource`]
///
/// Results are keyed by (ticker, start, end) and live until the caller
/// invalidates them; nothing is cached implicitly.
#[derive(Debug)]
pub struct CachedSource<S> {
    inner: S,
    cache: HashMap<CacheKey, PriceHistory>,
}

impl<S: PriceSource> CachedSource<S> {
    /// Wrap a source with an empty cache
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: HashMap::new(),
        }
    }

    /// Drop every cached range
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Drop the cached result for a single range, if present
    pub fn invalidate(&mut self, ticker: &str, start: NaiveDate, end: NaiveDate) {
        self.cache.remove(&(ticker.to_string(), start, end));
    }

    /// Number of cached ranges
    pub fn cached_ranges(&self) -> usize {
        self.cache.len()
    }

    /// Access the wrapped source
    pub fn inner(&self) -> &S {
        &self.inner
    }
}

impl<S: PriceSource> PriceSource for CachedSource<S> {
    fn fetch(&mut self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceHistory> {
        let key = (ticker.to_string(), start, end);

        if let Some(history) = self.cache.get(&key) {
            return Ok(history.clone());
        }

        let history = self.inner.fetch(ticker, start, end)?;
        self.cache.insert(key, history.clone());
        Ok(history)
    }
}
