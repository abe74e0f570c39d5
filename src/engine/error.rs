use std::fmt;

/// Per-request failures. None of these end the session: the message is shown
/// inline and the next request runs normally.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Start date after end date
    InvalidRange,
    /// The model returned a different number of values than the calendar has dates
    LengthMismatch { expected: usize, actual: usize },
    /// The model returned NaN or infinity at this position
    NonFinitePrediction { index: usize },
    /// The model itself failed
    Model(String),
}

impl fmt::Display for ForecastError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForecastError::InvalidRange => write!(f, "End date must be after start date"),
            ForecastError::LengthMismatch { expected, actual } => write!(
                f,
                "Model returned {} predictions for {} business days",
                actual, expected
            ),
            ForecastError::NonFinitePrediction { index } => {
                write!(f, "Model returned a non-finite prediction at step {}", index + 1)
            }
            ForecastError::Model(msg) => write!(f, "Forecast failed: {}", msg),
        }
    }
}

impl std::error::Error for ForecastError {}
