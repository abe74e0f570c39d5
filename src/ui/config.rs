use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub error: Color32,
    pub warning: Color32,
    pub positive: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    /// Height of the scrollable forecast table before it starts scrolling
    pub table_max_height: f32,
    /// Minimum width of each forecast table column
    pub table_column_width: f32,
    pub side_panel_min_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,     // This sets every label globally to this color
        heading: Color32::YELLOW, // Sets every heading
        subsection_heading: Color32::ORANGE, // Sets every subsection heading
        central_panel: Color32::from_rgb(30, 30, 36),
        side_panel: Color32::from_rgb(25, 25, 25),
        error: Color32::from_rgb(255, 100, 100),
        warning: Color32::from_rgb(255, 215, 0),
        positive: Color32::from_rgb(100, 200, 100),
    },
    table_max_height: 320.0,
    table_column_width: 120.0,
    side_panel_min_width: 180.0,
};
