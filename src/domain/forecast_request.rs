use chrono::{Days, NaiveDate};

use crate::config::FORECAST;

/// A user-selected forecast window. Both ends are inclusive calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastRequest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ForecastRequest {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The window offered on startup: the day after the last observation
    /// through 30 days after it.
    pub fn default_after(last_observation: NaiveDate) -> Self {
        let start = last_observation
            .checked_add_days(Days::new(FORECAST.date_range.start_offset_days))
            .unwrap_or(last_observation);
        let end = last_observation
            .checked_add_days(Days::new(FORECAST.date_range.end_offset_days))
            .unwrap_or(start);
        Self { start, end }
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    /// Forecast horizon: inclusive calendar-day span of the window.
    /// `None` when the window is inverted.
    pub fn step_count(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let days = (self.end - self.start).num_days();
        usize::try_from(days + 1).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_step_count_is_inclusive_calendar_span() {
        let request = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 9, 11));
        assert_eq!(request.step_count(), Some(30));

        let single_day = ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 13));
        assert_eq!(single_day.step_count(), Some(1));
    }

    #[test]
    fn test_inverted_window_has_no_steps() {
        let request = ForecastRequest::new(ymd(2019, 9, 10), ymd(2019, 9, 9));
        assert!(!request.is_valid());
        assert_eq!(request.step_count(), None);
    }

    #[test]
    fn test_default_window_follows_last_observation() {
        let last = ymd(2019, 8, 12);
        let request = ForecastRequest::default_after(last);
        assert_eq!(request.start, ymd(2019, 8, 13));
        assert_eq!(request.end, ymd(2019, 9, 11));
        assert_eq!(request.step_count(), Some(30));
    }
}
