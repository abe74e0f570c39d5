#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]

// Core modules
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use data::{LoadedResources, ResourceCache, load_historical_series};
pub use domain::{ForecastRequest, business_days_from};
pub use engine::{ForecastEngine, ForecastError, ForecastResult};
pub use models::{ForecastModel, Forecaster, HistoricalSeries};
pub use ui::ForecastApp;

use std::path::PathBuf;

// CLI argument parsing
use clap::Parser;

use crate::config::PERSISTENCE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Historical price table (CSV with Date and Close columns)
    #[arg(long, default_value = PERSISTENCE.historical.csv_path)]
    pub data: PathBuf,

    /// Pre-trained model file (.json for JSON, anything else is bincode)
    #[arg(long, default_value = PERSISTENCE.model.model_path)]
    pub model: PathBuf,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(
    cc: &eframe::CreationContext,
    loaded: anyhow::Result<LoadedResources>,
) -> Box<dyn eframe::App> {
    Box::new(ui::ForecastApp::new(cc, loaded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults_to_fixed_paths() {
        let args = Cli::try_parse_from(["close-forecast"]).unwrap();
        assert_eq!(args.data, PathBuf::from("Appledataset.csv"));
        assert_eq!(args.model, PathBuf::from("sarima_model.bin"));
    }

    #[test]
    fn test_cli_overrides() {
        let args = Cli::try_parse_from([
            "close-forecast",
            "--data",
            "prices/aapl.csv",
            "--model",
            "models/arima.json",
        ])
        .unwrap();
        assert_eq!(args.data, PathBuf::from("prices/aapl.csv"));
        assert_eq!(args.model, PathBuf::from("models/arima.json"));
    }
}
