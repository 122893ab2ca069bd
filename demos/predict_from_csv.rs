use predict_trade::data::DataLoader;
use predict_trade::pipeline::{self, PipelineConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: predict_from_csv <prices.csv> [horizon]")?;
    let horizon: usize = std::env::args()
        .nth(2)
        .map(|h| h.parse())
        .transpose()?
        .unwrap_or(7);

    println!("Loading {}...", path);
    let history = DataLoader::from_csv(&path)?;
    println!("Loaded {} observations", history.len());

    let config = PipelineConfig {
        horizon,
        ..PipelineConfig::default()
    };
    let report = pipeline::run(&history, &config)?;

    println!("Features used: {:?}", report.features);
    println!("{}", report.metrics);

    println!("{}-day forecast:", horizon);
    for point in report.forecast.points() {
        println!("  {}: {:.2}", point.date, point.close);
    }

    Ok(())
}
