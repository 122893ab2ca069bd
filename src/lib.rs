//! # Predict Trade
//!
//! A Rust library for iterative, multi-step stock price forecasting.
//!
//! ## Features
//!
//! - Daily OHLC history handling with a pluggable, cacheable ingestion boundary
//! - Dynamic feature engineering: rolling-mean features are only selected
//!   when enough history exists to support them
//! - Seeded, shuffled train/test partitioning with a small-dataset guard
//! - Random forest regression behind a swappable fit/predict contract
//! - Recursive multi-step forecasting with a configurable feedback policy
//! - Held-out error metrics and a JSON-serializable run report
//!
//! ## Quick Start
//!
//! ```no_run
//! use predict_trade::data::DataLoader;
//! use predict_trade::pipeline::{self, PipelineConfig};
//!
//! # fn main() -> predict_trade::error::Result<()> {
//! // Load daily OHLC history
//! let history = DataLoader::from_csv("prices.csv")?;
//!
//! // Train, evaluate and forecast 7 days ahead
//! let config = PipelineConfig {
//!     horizon: 7,
//!     ..PipelineConfig::default()
//! };
//! let report = pipeline::run(&history, &config)?;
//!
//! println!("{}", report.metrics);
//! for point in report.forecast.points() {
//!     println!("{}: {:.2}", point.date, point.close);
//! }
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod forecast;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DataLoader, Observation, PriceHistory, PriceSource};
pub use crate::error::PredictError;
pub use crate::features::{Feature, FeatureSet, FeatureTable};
pub use crate::forecast::{Forecast, ForecastPoint};
pub use crate::metrics::RegressionMetrics;
pub use crate::models::{Regressor, TrainedRegressor};
pub use crate::pipeline::{PipelineConfig, PredictionReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
