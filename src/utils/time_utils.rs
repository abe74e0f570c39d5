use chrono::{DateTime, Datelike, NaiveDate};

pub struct TimeUtils;

impl TimeUtils {
    pub const MS_IN_S: i64 = 1000;
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d";
    /// `num_days_from_ce()` of 1970-01-01
    pub const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

    /// Plot x coordinate for a calendar date: whole days since the Unix epoch.
    /// Keeps both charts on one shared, linear date axis.
    pub fn date_to_plot_x(date: NaiveDate) -> f64 {
        (date.num_days_from_ce() - Self::UNIX_EPOCH_DAYS_FROM_CE) as f64
    }

    /// Inverse of `date_to_plot_x`, rounding to the nearest day.
    pub fn plot_x_to_date(x: f64) -> Option<NaiveDate> {
        if !x.is_finite() {
            return None;
        }
        let days = i32::try_from(x.round() as i64).ok()?;
        NaiveDate::from_num_days_from_ce_opt(days.checked_add(Self::UNIX_EPOCH_DAYS_FROM_CE)?)
    }

    pub fn format_date(date: NaiveDate) -> String {
        date.format(Self::STANDARD_TIME_FORMAT).to_string()
    }

    pub fn parse_date(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text.trim(), Self::STANDARD_TIME_FORMAT).ok()
    }
}

pub fn epoch_ms_to_utc(epoch_ms: i64) -> String {
    // Used for display purposes
    match DateTime::from_timestamp(epoch_ms / TimeUtils::MS_IN_S, 0) {
        Some(dt) => format!("{}", dt.format(TimeUtils::STANDARD_TIME_FORMAT)),
        None => String::from("invalid timestamp"),
    }
}
