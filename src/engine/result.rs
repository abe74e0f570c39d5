use chrono::NaiveDate;

use crate::domain::ForecastRequest;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub predicted_close: f64,
}

/// One request's output: business dates paired one-to-one with predictions.
/// Built fresh per request and dropped with the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResult {
    pub request: ForecastRequest,
    pub rows: Vec<ForecastRow>,
}

impl ForecastResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(|row| row.predicted_close)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }
}
