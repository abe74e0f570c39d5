// Domain models: the historical table and the forecasting capability.
// These modules contain pure logic independent of UI/visualization

pub mod demo;
pub mod forecaster;
pub mod sarima;
pub mod timeseries;

// Re-export key types for convenience
pub use demo::build_demo_model;
pub use forecaster::{ForecastModel, Forecaster};
pub use sarima::{SarimaModel, SarimaOrder, SeasonalOrder};
pub use timeseries::HistoricalSeries;
