use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use close_forecast::config::{DEMO, PERSISTENCE};
use close_forecast::data::{ModelFile, load_historical_series};
use close_forecast::models::{ForecastModel, build_demo_model};
use close_forecast::utils::time_utils::epoch_ms_to_utc;

/// Writes a runnable model file from the historical table using fixed demo coefficients.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Historical price table to take the model history from
    #[arg(long, default_value = PERSISTENCE.historical.csv_path)]
    data: PathBuf,

    /// Output path (.json for JSON, anything else is bincode)
    #[arg(long, default_value = DEMO.output_path)]
    out: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    build_model_file(&args)
}

fn build_model_file(args: &Args) -> Result<()> {
    let series = load_historical_series(&args.data)
        .with_context(|| format!("Failed to load source table {:?}", args.data))?;

    println!(
        "Loaded {} closes ({} → {}) from {:?}",
        series.len(),
        series.first_date(),
        series.last_date(),
        args.data
    );

    let model = build_demo_model(&series)?;
    let history_len = model.history.len();
    let output = ModelFile::new(ForecastModel::Sarima(model), DEMO.description);
    output.save_to_path(&args.out)?;

    println!(
        "✅ Demo model written to {:?} ({}, {} trailing closes, created {}).",
        args.out,
        output.description,
        history_len,
        epoch_ms_to_utc(output.timestamp_ms)
    );
    Ok(())
}
