use eframe::egui::{Context, RichText, Ui, Visuals};

use crate::engine::ForecastRow;
use crate::ui::config::UI_CONFIG;
use crate::utils::TimeUtils;

/// Creates a colored heading, monospace
pub fn colored_heading(text: impl Into<String>) -> RichText {
    RichText::new(text.into())
        .color(UI_CONFIG.colors.heading)
        .monospace()
}

/// Sets up custom visuals for the entire application
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();

    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;

    // Make the widgets stand out a bit more
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Creates a section heading with standard spacing
pub fn section_heading(ui: &mut Ui, text: impl Into<String>) {
    ui.add_space(10.0);
    ui.heading(colored_heading(text));
    ui.add_space(5.0);
}

/// Creates a separator with standard spacing
pub fn spaced_separator(ui: &mut Ui) {
    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);
}

/// Formats a stock price for tables and tooltips.
/// - Normal prices: 2 decimals with thousands separators ($1,234.57)
/// - Sub-dollar: 4 decimals ($0.4821)
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return "n/a".to_string();
    }
    let sign = if price < 0.0 { "-" } else { "" };
    let abs_price = price.abs();

    if abs_price < 1.0 {
        return format!("{}${:.4}", sign, abs_price);
    }

    let fixed = format!("{:.2}", abs_price);
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}${}.{}", sign, grouped, cents)
}

/// Display text for one forecast table row: `[date, predicted close]`.
pub fn forecast_table_cells(row: &ForecastRow) -> [String; 2] {
    [
        TimeUtils::format_date(row.date),
        format_price(row.predicted_close),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_forecast_table_cells() {
        let row = ForecastRow {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            predicted_close: 1234.567,
        };
        assert_eq!(
            forecast_table_cells(&row),
            ["2024-03-01".to_string(), "$1,234.57".to_string()]
        );
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(207.156), "$207.16");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(0.48213), "$0.4821");
        assert_eq!(format_price(-12.0), "-$12.00");
        assert_eq!(format_price(f64::NAN), "n/a");
    }
}
