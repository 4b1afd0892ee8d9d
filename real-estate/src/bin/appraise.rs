//! Trains a price estimator on a JSON data file and appraises one property.
//!
//! ```text
//! appraise --data real-estate/data/sample_properties.json \
//!     --square-meters 120 --rooms 3 --bathrooms 2 --floor 3 --zone-rating 8
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use real_estate::{EstimatorConfig, PriceEstimator, Property, PropertyDataset};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "appraise")]
#[command(about = "Estimate a property price with a small neural network", long_about = None)]
struct Args {
    /// JSON file with "properties" and "prices" to train on
    #[arg(short, long)]
    data: PathBuf,

    /// JSON estimator config; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of training epochs, overriding the config
    #[arg(short, long)]
    epochs: Option<u32>,

    /// Seed for weight initialization and dropout, overriding the config
    #[arg(long)]
    seed: Option<u64>,

    /// Report the mean absolute percentage error on the training data
    #[arg(long)]
    evaluate: bool,

    /// Living area of the property to appraise
    #[arg(long)]
    square_meters: f64,

    #[arg(long, default_value_t = 3)]
    rooms: u32,

    #[arg(long, default_value_t = 1)]
    bathrooms: u32,

    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    floor: i32,

    /// Neighbourhood quality from 1 to 10
    #[arg(long, default_value_t = 5)]
    zone_rating: u8,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => EstimatorConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EstimatorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.network.seed = Some(seed);
        config.training.seed = Some(seed);
    }
    let epochs = args.epochs.unwrap_or(config.training.epochs);

    let data = PropertyDataset::load(&args.data)
        .with_context(|| format!("Failed to load data from {}", args.data.display()))?;
    info!(properties = data.properties.len(), "Loaded training data");

    let mut estimator =
        PriceEstimator::from_config(&config).context("Failed to build the estimator")?;

    let history = estimator
        .train(&data.properties, &data.prices, epochs)
        .context("Training failed")?;
    print!("{history}");

    if args.evaluate {
        let mape = estimator
            .evaluate(&data.properties, &data.prices)
            .context("Evaluation failed")?;
        println!("Mean absolute percentage error: {mape:.2}%");
    }

    let property = Property::new(
        args.square_meters,
        args.rooms,
        args.bathrooms,
        args.floor,
        args.zone_rating,
    );
    let price = estimator
        .estimate_price(&property)
        .context("Failed to estimate the price")?;
    println!("Estimated price: {price:.2}");

    Ok(())
}
