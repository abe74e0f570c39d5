pub mod core;
pub mod error;
pub mod result;

// Re-export key components
pub use self::core::ForecastEngine;
pub use error::ForecastError;
pub use result::{ForecastResult, ForecastRow};
