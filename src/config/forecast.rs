//! Forecast request defaults and chart windowing

/// Defaults applied to the date-range inputs on startup
pub struct DateRangeDefaults {
    /// Start = last historical date + this many days
    pub start_offset_days: u64,
    /// End = last historical date + this many days
    pub end_offset_days: u64,
}

pub struct ForecastConfig {
    /// Display name of the instrument (used in titles)
    pub asset_name: &'static str,
    pub date_range: DateRangeDefaults,
    /// Number of trailing historical closes drawn under the forecast overlay
    pub overlay_history_points: usize,
}

pub const FORECAST: ForecastConfig = ForecastConfig {
    asset_name: "Apple",
    date_range: DateRangeDefaults {
        start_offset_days: 1,
        end_offset_days: 30,
    },
    overlay_history_points: 60,
};
