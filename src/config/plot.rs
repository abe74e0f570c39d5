//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    pub history_line_color: Color32,
    pub overlay_history_color: Color32,
    pub forecast_line_color: Color32,
    pub history_line_width: f32,
    pub forecast_line_width: f32,
    pub forecast_marker_radius: f32,
    /// Plot aspect ratio (width:height) for the full-history chart
    pub history_aspect_ratio: f32,
    /// Plot aspect ratio for the historical-vs-forecast overlay (10x4 figure)
    pub overlay_aspect_ratio: f32,
    /// Fraction of the price span added above and below the data
    pub y_padding_pct: f64,
    /// Upper bound on labelled ticks along the date axis
    pub max_date_marks: f64,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    history_line_color: Color32::from_rgb(80, 160, 255), // Sky blue
    overlay_history_color: Color32::from_rgb(31, 119, 180), // Matplotlib default blue
    forecast_line_color: Color32::from_rgb(220, 30, 30), // Red
    history_line_width: 1.5,
    forecast_line_width: 2.0,
    forecast_marker_radius: 2.5,
    history_aspect_ratio: 2.5,
    overlay_aspect_ratio: 2.5,
    y_padding_pct: 0.05,
    max_date_marks: 8.0,
};
