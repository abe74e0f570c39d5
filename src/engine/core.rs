use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{ForecastRequest, business_days_from};
use crate::models::Forecaster;

use super::error::ForecastError;
use super::result::{ForecastResult, ForecastRow};

/// Turns a date range into a dated forecast using the loaded model.
/// Stateless between requests; the model is shared read-only.
pub struct ForecastEngine {
    model: Arc<dyn Forecaster>,
}

impl ForecastEngine {
    pub fn new(model: Arc<dyn Forecaster>) -> Self {
        Self { model }
    }

    pub fn model_description(&self) -> String {
        self.model.describe()
    }

    /// Validate, size, call the model once, then date the output on business days.
    ///
    /// The step count is the inclusive calendar span of the request, while the
    /// output calendar walks business days from `start`; the calendar therefore
    /// usually runs past `end`. A model answer of any other length is rejected
    /// rather than realigned.
    pub fn handle(&self, request: &ForecastRequest) -> Result<ForecastResult, ForecastError> {
        let steps = request.step_count().ok_or(ForecastError::InvalidRange)?;

        let predictions = self
            .model
            .forecast(steps)
            .map_err(|e| ForecastError::Model(format!("{:#}", e)))?;

        let calendar = business_days_from(request.start, steps);
        if predictions.len() != calendar.len() {
            log::warn!(
                "Model returned {} values for a {}-day calendar",
                predictions.len(),
                calendar.len()
            );
            return Err(ForecastError::LengthMismatch {
                expected: calendar.len(),
                actual: predictions.len(),
            });
        }
        if let Some(index) = predictions.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::NonFinitePrediction { index });
        }

        let rows = calendar
            .into_iter()
            .zip(predictions)
            .map(|(date, predicted_close)| ForecastRow {
                date,
                predicted_close,
            })
            .collect();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_forecast_requests {
            log::info!(
                "Forecast {} → {}: {} steps from {}",
                request.start,
                request.end,
                steps,
                self.model.describe()
            );
        }

        Ok(ForecastResult {
            request: *request,
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::business_days::is_business_day;
    use anyhow::{Result, anyhow};
    use chrono::NaiveDate;
    use std::cell::{Cell, RefCell};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Returns 0, 1, 2, ... and records every horizon it is asked for.
    #[derive(Default)]
    struct CountingModel {
        calls: RefCell<Vec<usize>>,
    }

    impl Forecaster for CountingModel {
        fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
            self.calls.borrow_mut().push(steps);
            Ok((0..steps).map(|i| i as f64).collect())
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    /// Always answers with a fixed vector.
    struct FixedModel(Vec<f64>);

    impl Forecaster for FixedModel {
        fn forecast(&self, _steps: usize) -> Result<Vec<f64>> {
            Ok(self.0.clone())
        }

        fn describe(&self) -> String {
            "fixed".to_string()
        }
    }

    struct FailingModel {
        called: Cell<bool>,
    }

    impl Forecaster for FailingModel {
        fn forecast(&self, _steps: usize) -> Result<Vec<f64>> {
            self.called.set(true);
            Err(anyhow!("singular matrix"))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    fn engine_with(model: Arc<CountingModel>) -> ForecastEngine {
        ForecastEngine::new(model)
    }

    #[test]
    fn test_thirty_day_window_asks_for_thirty_steps() {
        let model = Arc::new(CountingModel::default());
        let engine = engine_with(Arc::clone(&model));

        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 9, 11));
        let result = engine.handle(&request).unwrap();

        assert_eq!(*model.calls.borrow(), vec![30]);
        assert_eq!(result.len(), 30);
        assert_eq!(result.rows[0].date, ymd(2019, 8, 13));
        assert_eq!(result.last_date(), Some(ymd(2019, 9, 23)));
        assert!(result.dates().all(is_business_day), "Weekends must be skipped");

        // One-to-one pairing, in sequence order
        let values: Vec<f64> = result.values().collect();
        assert_eq!(values, (0..30).map(|i| i as f64).collect::<Vec<_>>());
        assert_eq!(result.request, request);
    }

    #[test]
    fn test_inverted_window_never_calls_model() {
        let model = Arc::new(CountingModel::default());
        let engine = engine_with(Arc::clone(&model));

        let request = ForecastRequest::new(ymd(2019, 9, 10), ymd(2019, 9, 9));
        let err = engine.handle(&request).unwrap_err();

        assert_eq!(err, ForecastError::InvalidRange);
        assert_eq!(err.to_string(), "End date must be after start date");
        assert!(model.calls.borrow().is_empty());
    }

    #[test]
    fn test_step_count_matches_span_for_many_windows() {
        let model = Arc::new(CountingModel::default());
        let engine = engine_with(Arc::clone(&model));
        let start = ymd(2019, 8, 10); // Saturday

        for span in 0..45u64 {
            let end = start.checked_add_days(chrono::Days::new(span)).unwrap();
            let result = engine.handle(&ForecastRequest::new(start, end)).unwrap();
            assert_eq!(result.len(), span as usize + 1, "span {}", span);
            assert!(result.dates().all(is_business_day));
            assert_eq!(result.rows[0].date, ymd(2019, 8, 12), "Rolls to Monday");
        }
    }

    #[test]
    fn test_short_model_answer_is_rejected() {
        let engine = ForecastEngine::new(Arc::new(FixedModel(vec![1.0, 2.0])));
        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 15));
        assert_eq!(
            engine.handle(&request).unwrap_err(),
            ForecastError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_long_model_answer_is_rejected() {
        let engine = ForecastEngine::new(Arc::new(FixedModel(vec![1.0; 10])));
        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 15));
        assert!(matches!(
            engine.handle(&request),
            Err(ForecastError::LengthMismatch {
                expected: 3,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_non_finite_prediction_is_rejected() {
        let engine = ForecastEngine::new(Arc::new(FixedModel(vec![1.0, f64::NAN])));
        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 14));
        assert_eq!(
            engine.handle(&request).unwrap_err(),
            ForecastError::NonFinitePrediction { index: 1 }
        );
    }

    #[test]
    fn test_model_failure_is_reported() {
        let model = Arc::new(FailingModel {
            called: Cell::new(false),
        });
        let engine = ForecastEngine::new(model.clone());
        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 14));

        let err = engine.handle(&request).unwrap_err();
        assert!(model.called.get());
        assert_eq!(err.to_string(), "Forecast failed: singular matrix");
    }
}
