//! Configuration module for the forecast dashboard.

pub mod forecast;

mod debug; // Private: files go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod demo;
pub mod persistence;
pub mod plot;

// Re-export commonly used items
pub use demo::DEMO;
pub use forecast::FORECAST;
pub use persistence::PERSISTENCE;
