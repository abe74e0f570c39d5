use anyhow::{Result, ensure};

use crate::config::DEMO;
use crate::models::{HistoricalSeries, SarimaModel, SarimaOrder, SeasonalOrder};

/// Stamps the fixed demo coefficients onto the tail of `series` and filters
/// in-sample residuals. No parameter is estimated.
pub fn build_demo_model(series: &HistoricalSeries) -> Result<SarimaModel> {
    let history = series.tail_closes(DEMO.history_len).to_vec();
    ensure!(
        history.len() >= 2,
        "Need at least 2 closes to build the demo model, got {}",
        history.len()
    );

    let order = SarimaOrder {
        p: DEMO.order.ar.len(),
        d: DEMO.order.d,
        q: DEMO.order.ma.len(),
    };
    let seasonal_order = SeasonalOrder {
        p: DEMO.seasonal.ar.len(),
        d: DEMO.seasonal.d,
        q: DEMO.seasonal.ma.len(),
        period: DEMO.seasonal.period,
    };

    let mut model = SarimaModel::new(
        order,
        seasonal_order,
        DEMO.order.ar.to_vec(),
        DEMO.order.ma.to_vec(),
        DEMO.seasonal.ar.to_vec(),
        DEMO.seasonal.ma.to_vec(),
        DEMO.constant,
        history,
    );
    model.filter_residuals()?;
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, NaiveDate};

    fn series_of(len: usize) -> HistoricalSeries {
        let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let points = (0..len)
            .map(|i| {
                let date = start.checked_add_days(Days::new(i as u64)).unwrap();
                (date, 150.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            })
            .collect();
        HistoricalSeries::from_points("synthetic", points).unwrap()
    }

    #[test]
    fn test_demo_model_uses_trailing_history() {
        let series = series_of(400);
        let model = build_demo_model(&series).unwrap();

        assert_eq!(model.history.len(), DEMO.history_len);
        assert_eq!(model.history.last(), Some(&series.last_close()));
        assert!(!model.residuals.is_empty());
        assert!(model.validate().is_ok());
        assert_eq!(model.describe(), "SARIMA(1,1,1)(1,0,0,5)");

        let forecast = model.forecast(30).unwrap();
        assert_eq!(forecast.len(), 30);
        assert!(forecast.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_demo_model_rejects_tiny_series() {
        assert!(build_demo_model(&series_of(1)).is_err());
    }
}
