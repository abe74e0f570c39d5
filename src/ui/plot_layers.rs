use eframe::egui::Color32;
use egui_plot::{Line, PlotPoints, PlotUi, Points};

use crate::config::plot::PLOT_CONFIG;
use crate::engine::ForecastResult;
use crate::ui::app::{OverlaySeries, PlotVisibility};
use crate::ui::ui_plot_view::PlotCache;
use crate::utils::TimeUtils;

/// Context passed to every layer during rendering.
/// This prevents argument explosion.
pub struct LayerContext<'a> {
    pub cache: &'a PlotCache,
    pub forecast: Option<&'a ForecastResult>,
    pub visibility: &'a PlotVisibility,
    /// Draw only the last N historical points (`None` = all of them)
    pub history_tail: Option<usize>,
}

impl<'a> LayerContext<'a> {
    pub fn history_points(&self) -> &'a [[f64; 2]] {
        let points: &'a [[f64; 2]] = &self.cache.history;
        match self.history_tail {
            Some(count) => &points[points.len().saturating_sub(count)..],
            None => points,
        }
    }
}

/// A standardized layer in the plot stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. HISTORICAL CLOSES
// ============================================================================
pub struct HistoryLineLayer {
    pub label: &'static str,
    pub color: Color32,
}

impl PlotLayer for HistoryLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.is_visible(OverlaySeries::Historical) {
            return;
        }
        let points = ctx.history_points();
        if points.is_empty() {
            return;
        }

        plot_ui.line(
            Line::new(self.label, PlotPoints::new(points.to_vec()))
                .color(self.color)
                .width(PLOT_CONFIG.history_line_width),
        );
    }
}

// ============================================================================
// 2. FORECAST
// ============================================================================
pub struct ForecastLineLayer {
    pub label: &'static str,
}

impl PlotLayer for ForecastLineLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        if !ctx.visibility.is_visible(OverlaySeries::Forecast) {
            return;
        }
        let Some(forecast) = ctx.forecast else {
            return;
        };

        let points: Vec<[f64; 2]> = forecast
            .rows
            .iter()
            .map(|row| [TimeUtils::date_to_plot_x(row.date), row.predicted_close])
            .collect();

        plot_ui.line(
            Line::new(self.label, PlotPoints::new(points.clone()))
                .color(PLOT_CONFIG.forecast_line_color)
                .width(PLOT_CONFIG.forecast_line_width),
        );
        // Same name: grouped with the line in the legend
        plot_ui.points(
            Points::new(self.label, PlotPoints::new(points))
                .color(PLOT_CONFIG.forecast_line_color)
                .radius(PLOT_CONFIG.forecast_marker_radius),
        );
    }
}
