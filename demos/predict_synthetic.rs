use chrono::{Duration, NaiveDate};
use predict_trade::data::{Observation, PriceHistory};
use predict_trade::forecast::FeedbackPolicy;
use predict_trade::models::random_forest::ForestConfig;
use predict_trade::pipeline::{self, PipelineConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Predict Trade: Synthetic Random-Walk Example");
    println!("============================================\n");

    println!("Generating synthetic daily history...");
    let history = synthetic_history(120, 100.0, 42)?;
    println!("Generated {} observations\n", history.len());

    let config = PipelineConfig {
        horizon: 7,
        feedback: FeedbackPolicy::StaticTail,
        forest: ForestConfig {
            n_trees: 100,
            ..ForestConfig::default()
        },
        ..PipelineConfig::default()
    };

    println!("Training and evaluating...");
    let report = pipeline::run(&history, &config)?;

    println!("Features used: {:?}", report.features);
    println!("{}", report.metrics);

    println!("7-day forecast:");
    for point in report.forecast.points() {
        println!("  {}: {:.2}", point.date, point.close);
    }

    println!("\nReport as JSON:");
    println!("{}", report.to_json()?);

    Ok(())
}

/// Random walk with small daily normal increments and a plausible OHLC shape
fn synthetic_history(
    days: usize,
    start_price: f64,
    seed: u64,
) -> Result<PriceHistory, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = Normal::new(0.0, 1.0)?;
    let spread: Normal<f64> = Normal::new(0.5, 0.2)?;

    let start_date = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
    let mut close = start_price;
    let mut observations = Vec::with_capacity(days);

    for i in 0..days {
        let open = close;
        close = (close + step.sample(&mut rng)).max(1.0);
        let wiggle = spread.sample(&mut rng).abs();
        let high = open.max(close) + wiggle;
        let low = (open.min(close) - wiggle).max(0.5);

        observations.push(Observation {
            date: start_date + Duration::days(i as i64),
            open,
            high,
            low,
            close,
            volume: None,
        });
    }

    Ok(PriceHistory::new(observations)?)
}
