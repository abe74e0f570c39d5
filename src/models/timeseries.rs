use anyhow::{Result, bail};
use chrono::NaiveDate;

use crate::utils::TimeUtils;

// ============================================================================
// HistoricalSeries: daily closing prices, ordered and indexed by date
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    pub name: String, // Metadata e.g. the source file name
    dates: Vec<NaiveDate>,
    closes: Vec<f64>,
}

impl HistoricalSeries {
    /// Builds the series from unordered rows.
    /// Rows are sorted by date. Empty input, duplicate dates and non-finite
    /// prices are rejected.
    pub fn from_points(name: impl Into<String>, mut points: Vec<(NaiveDate, f64)>) -> Result<Self> {
        if points.is_empty() {
            bail!("Historical series is empty");
        }
        if let Some((date, close)) = points.iter().find(|(_, close)| !close.is_finite()) {
            bail!("Non-finite close {} on {}", close, TimeUtils::format_date(*date));
        }

        points.sort_by_key(|(date, _)| *date);
        if let Some(pair) = points.windows(2).find(|pair| pair[0].0 == pair[1].0) {
            bail!("Duplicate date {}", TimeUtils::format_date(pair[0].0));
        }

        let (dates, closes) = points.into_iter().unzip();
        Ok(Self {
            name: name.into(),
            dates,
            closes,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    pub fn first_date(&self) -> NaiveDate {
        self.dates[0]
    }

    /// Last observation date. Non-empty by construction.
    pub fn last_date(&self) -> NaiveDate {
        self.dates[self.dates.len() - 1]
    }

    pub fn last_close(&self) -> f64 {
        self.closes[self.closes.len() - 1]
    }

    /// Closing price on `date`, if it is a trading day in the table.
    pub fn close_on(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|idx| self.closes[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.closes.iter().copied())
    }

    /// The last `count` observations (or all of them if shorter).
    pub fn tail(&self, count: usize) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        let skip = self.len().saturating_sub(count);
        self.iter().skip(skip)
    }

    /// The last `count` closes (or all of them if shorter).
    pub fn tail_closes(&self, count: usize) -> &[f64] {
        let skip = self.len().saturating_sub(count);
        &self.closes[skip..]
    }
}
