// Domain types and value objects
pub mod business_days;
pub mod forecast_request;

// Re-export commonly used types
pub use business_days::business_days_from;
pub use forecast_request::ForecastRequest;
