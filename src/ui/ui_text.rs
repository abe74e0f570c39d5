//! Every user-facing string in one place.

pub struct UiText {
    pub title_suffix: &'static str,
    pub description: &'static str,

    // Sections
    pub history_heading: &'static str,
    pub date_range_heading: &'static str,
    pub table_heading: &'static str,
    pub overlay_heading: &'static str,
    pub view_options_heading: &'static str,
    pub dataset_heading: &'static str,

    // Date inputs
    pub start_date_label: &'static str,
    pub end_date_label: &'static str,
    pub date_format_hint: &'static str,
    pub invalid_range_message: &'static str,
    pub generate_button: &'static str,

    // Table
    pub table_date_column: &'static str,
    pub table_price_column: &'static str,

    // Plots
    pub plot_x_axis: &'static str,
    pub plot_y_axis: &'static str,
    pub history_series_label: &'static str,
    pub overlay_history_label: &'static str,
    pub forecast_series_label: &'static str,

    // View toggles
    pub label_show_history_chart: &'static str,
    pub label_show_table: &'static str,

    // Errors
    pub load_error_heading: &'static str,
    pub load_error_hint: &'static str,
    pub forecast_error_prefix: &'static str,

    // Help
    pub help_heading: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    title_suffix: "Stock Price Forecasting",
    description: "This app predicts stock prices using a pre-trained SARIMA model. \
                  Select a date range to generate forecasts, then compare them with \
                  recent history.",

    history_heading: "📊 Historical Stock Price Trend",
    date_range_heading: "🔮 Select Forecast Date Range",
    table_heading: "📋 Predicted Stock Prices",
    overlay_heading: "📈 Historical vs Forecasted Prices",
    view_options_heading: "View Options",
    dataset_heading: "Dataset",

    start_date_label: "Forecast Start Date",
    end_date_label: "Forecast End Date",
    date_format_hint: "Use YYYY-MM-DD",
    invalid_range_message: "❌ End date must be after start date.",
    generate_button: "Generate Forecast",

    table_date_column: "Date",
    table_price_column: "Predicted Closing Price",

    plot_x_axis: "Date",
    plot_y_axis: "Price",
    history_series_label: "Close Price",
    overlay_history_label: "Historical Prices",
    forecast_series_label: "Forecasted Prices",

    label_show_history_chart: "Show historical trend",
    label_show_table: "Show prediction table",

    load_error_heading: "⚠ Unable to start the dashboard",
    load_error_hint: "Check the --data and --model paths and restart.",
    forecast_error_prefix: "❌",

    help_heading: "⌨️ Keyboard Shortcuts",
};
