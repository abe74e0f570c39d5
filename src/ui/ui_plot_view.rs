use eframe::egui;
use egui_plot::{AxisHints, Corner, GridInput, GridMark, HPlacement, Legend, Plot, PlotPoint};

use crate::config::plot::PLOT_CONFIG;
use crate::config::FORECAST;
use crate::engine::ForecastResult;
use crate::models::HistoricalSeries;
use crate::ui::app::PlotVisibility;
use crate::ui::config::UI_TEXT;
use crate::ui::utils::format_price;
use crate::utils::{TimeUtils, maths_utils};

use crate::ui::plot_layers::{ForecastLineLayer, HistoryLineLayer, LayerContext, PlotLayer};

/// Plot-space copy of the historical series. The series never changes after
/// load, so this is built on first draw and reused every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct PlotCache {
    pub history: Vec<[f64; 2]>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl PlotCache {
    pub fn from_series(series: &HistoricalSeries) -> Self {
        let history: Vec<[f64; 2]> = series
            .iter()
            .map(|(date, close)| [TimeUtils::date_to_plot_x(date), close])
            .collect();
        let x_range = (
            TimeUtils::date_to_plot_x(series.first_date()),
            TimeUtils::date_to_plot_x(series.last_date()),
        );
        let y_range = maths_utils::finite_min_max(series.closes()).unwrap_or((0.0, 1.0));
        Self {
            history,
            x_range,
            y_range,
        }
    }
}

/// Visible window of a chart, already padded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl ViewBounds {
    fn padded(x: (f64, f64), y: (f64, f64)) -> Self {
        // At least a day either side so a single point is still drawable
        let x = if x.1 > x.0 {
            x
        } else {
            (x.0 - 1.0, x.1 + 1.0)
        };
        Self {
            x,
            y: maths_utils::padded_range(y.0, y.1, PLOT_CONFIG.y_padding_pct),
        }
    }

    /// Bounds covering the trailing history window plus the forecast.
    pub fn overlay(history_tail: &[[f64; 2]], forecast: &ForecastResult) -> Option<Self> {
        let xs: Vec<f64> = history_tail
            .iter()
            .map(|p| p[0])
            .chain(forecast.dates().map(TimeUtils::date_to_plot_x))
            .collect();
        let ys: Vec<f64> = history_tail
            .iter()
            .map(|p| p[1])
            .chain(forecast.values())
            .collect();
        let x = maths_utils::finite_min_max(&xs)?;
        let y = maths_utils::finite_min_max(&ys)?;
        Some(Self::padded(x, y))
    }
}

#[derive(Default)]
pub struct PlotView {
    cache: Option<PlotCache>,
}

impl PlotView {
    pub fn new() -> Self {
        Self { cache: None }
    }

    fn cache_for(&mut self, series: &HistoricalSeries) -> &PlotCache {
        self.cache.get_or_insert_with(|| PlotCache::from_series(series))
    }

    /// Full-history closing price chart.
    pub fn show_history_plot(&mut self, ui: &mut egui::Ui, series: &HistoricalSeries) {
        let cache = self.cache_for(series);
        let bounds = ViewBounds::padded(cache.x_range, cache.y_range);
        let visibility = PlotVisibility::default();

        base_plot("history_plot", PLOT_CONFIG.history_aspect_ratio).show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(bounds.x.0..=bounds.x.1);
            plot_ui.set_plot_bounds_y(bounds.y.0..=bounds.y.1);

            let ctx = LayerContext {
                cache,
                forecast: None,
                visibility: &visibility,
                history_tail: None,
            };
            HistoryLineLayer {
                label: UI_TEXT.history_series_label,
                color: PLOT_CONFIG.history_line_color,
            }
            .render(plot_ui, &ctx);
        });
    }

    /// Trailing history with the forecast drawn after it.
    pub fn show_overlay_plot(
        &mut self,
        ui: &mut egui::Ui,
        series: &HistoricalSeries,
        forecast: &ForecastResult,
        visibility: &PlotVisibility,
    ) {
        let cache = self.cache_for(series);
        let ctx = LayerContext {
            cache,
            forecast: Some(forecast),
            visibility,
            history_tail: Some(FORECAST.overlay_history_points),
        };
        let Some(bounds) = ViewBounds::overlay(ctx.history_points(), forecast) else {
            return;
        };

        base_plot("overlay_plot", PLOT_CONFIG.overlay_aspect_ratio).show(ui, |plot_ui| {
            plot_ui.set_plot_bounds_x(bounds.x.0..=bounds.x.1);
            plot_ui.set_plot_bounds_y(bounds.y.0..=bounds.y.1);

            // Back to front
            let layers: Vec<Box<dyn PlotLayer>> = vec![
                Box::new(HistoryLineLayer {
                    label: UI_TEXT.overlay_history_label,
                    color: PLOT_CONFIG.overlay_history_color,
                }),
                Box::new(ForecastLineLayer {
                    label: UI_TEXT.forecast_series_label,
                }),
            ];
            for layer in layers {
                layer.render(plot_ui, &ctx);
            }
        });
    }
}

fn base_plot(id: &'static str, aspect_ratio: f32) -> Plot<'static> {
    Plot::new(id)
        .view_aspect(aspect_ratio)
        .legend(Legend::default().position(Corner::LeftTop))
        .custom_x_axes(vec![create_x_axis()])
        .custom_y_axes(vec![create_y_axis()])
        .x_grid_spacer(date_grid_spacer)
        .label_formatter(hover_label)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_drag(false)
        .allow_boxed_zoom(false)
}

fn hover_label(name: &str, value: &PlotPoint) -> String {
    let date = TimeUtils::plot_x_to_date(value.x.round())
        .map(TimeUtils::format_date)
        .unwrap_or_default();
    if name.is_empty() {
        format!("{}\n{}", date, format_price(value.y))
    } else {
        format!("{}\n{}\n{}", name, date, format_price(value.y))
    }
}

const DAY_STEPS: [f64; 11] = [
    1.0, 2.0, 7.0, 14.0, 30.0, 61.0, 91.0, 182.0, 365.0, 730.0, 1826.0,
];

/// Smallest tick spacing (in days) that keeps the axis under `max_marks` labels.
pub fn day_step_for_span(span_days: f64, max_marks: f64) -> f64 {
    DAY_STEPS
        .iter()
        .copied()
        .find(|step| span_days / step <= max_marks)
        .unwrap_or_else(|| ((span_days / max_marks) / 365.0).ceil() * 365.0)
}

/// Ticks on whole days only; fractional x values have no date.
fn date_grid_spacer(input: GridInput) -> Vec<GridMark> {
    let (min, max) = input.bounds;
    let step = day_step_for_span(max - min, PLOT_CONFIG.max_date_marks);
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last)
        .map(|i| GridMark {
            value: i as f64 * step,
            step_size: step,
        })
        .collect()
}

fn create_x_axis() -> AxisHints<'static> {
    AxisHints::new_x()
        .label(UI_TEXT.plot_x_axis)
        .formatter(|grid_mark, _range| {
            TimeUtils::plot_x_to_date(grid_mark.value)
                .map(TimeUtils::format_date)
                .unwrap_or_default()
        })
}

fn create_y_axis() -> AxisHints<'static> {
    AxisHints::new_y()
        .label(UI_TEXT.plot_y_axis)
        .formatter(|grid_mark, _range| format!("{:.0}", grid_mark.value))
        .placement(HPlacement::Left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastRequest;
    use crate::engine::ForecastRow;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_step_for_span() {
        assert_eq!(day_step_for_span(5.0, 8.0), 1.0);
        assert_eq!(day_step_for_span(40.0, 8.0), 7.0);
        assert_eq!(day_step_for_span(90.0, 8.0), 14.0);
        assert_eq!(day_step_for_span(10.0 * 365.0, 8.0), 730.0);
        assert_eq!(day_step_for_span(40.0 * 365.0, 8.0), 1826.0);
        assert_eq!(day_step_for_span(100.0 * 365.0, 8.0), 13.0 * 365.0);
    }

    #[test]
    fn test_overlay_bounds_cover_history_and_forecast() {
        let history = vec![
            [TimeUtils::date_to_plot_x(ymd(2019, 8, 8)), 203.0],
            [TimeUtils::date_to_plot_x(ymd(2019, 8, 9)), 201.0],
        ];
        let forecast = ForecastResult {
            request: ForecastRequest::new(ymd(2019, 8, 13), ymd(2019, 8, 14)),
            rows: vec![
                ForecastRow {
                    date: ymd(2019, 8, 13),
                    predicted_close: 210.0,
                },
                ForecastRow {
                    date: ymd(2019, 8, 14),
                    predicted_close: 199.0,
                },
            ],
        };

        let bounds = ViewBounds::overlay(&history, &forecast).unwrap();
        assert_eq!(bounds.x.0, TimeUtils::date_to_plot_x(ymd(2019, 8, 8)));
        assert_eq!(bounds.x.1, TimeUtils::date_to_plot_x(ymd(2019, 8, 14)));
        assert!(bounds.y.0 < 199.0 && bounds.y.1 > 210.0);
    }

    #[test]
    fn test_single_point_still_has_width() {
        let bounds = ViewBounds::padded((100.0, 100.0), (5.0, 5.0));
        assert_eq!(bounds.x, (99.0, 101.0));
        assert!(bounds.y.0 < 5.0 && bounds.y.1 > 5.0);
    }
}
