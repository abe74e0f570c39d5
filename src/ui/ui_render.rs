use eframe::egui::{
    CentralPanel, Color32, Context, Frame, Grid, Key, Label, Margin, RichText, ScrollArea,
    SidePanel, TextStyle, TopBottomPanel, Ui, Window,
};
use std::sync::Arc;

use crate::config::FORECAST;
use crate::engine::{ForecastError, ForecastResult};
use crate::models::HistoricalSeries;
use crate::ui::app::OverlaySeries;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{DateRangeEvent, DateRangePanel, Panel, ViewEvent, ViewPanel};
use crate::ui::utils::{
    colored_heading, forecast_table_cells, format_price, section_heading, spaced_separator,
};
use crate::utils::TimeUtils;

use super::app::ForecastApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl ForecastApp {
    pub(super) fn render_header(&mut self, ctx: &Context) {
        let header_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(12, 8));
        TopBottomPanel::top("header_panel")
            .frame(header_frame)
            .show(ctx, |ui| {
                ui.heading(colored_heading(format!(
                    "📈 {} {}",
                    FORECAST.asset_name, UI_TEXT.title_suffix
                )));
                ui.add_space(4.0);
                ui.label(UI_TEXT.description);
            });
    }

    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let view_events = self.view_panel(ui);
                for event in view_events {
                    self.apply_view_event(event);
                }

                spaced_separator(ui);
                self.render_dataset_info(ui);
            });
    }

    fn render_dataset_info(&self, ui: &mut Ui) {
        let Some(session) = &self.session else {
            return;
        };
        let series = &session.series;
        let value_color = Color32::from_rgb(100, 200, 255);

        section_heading(ui, UI_TEXT.dataset_heading);
        ui.metric("Rows", &series.len().to_string(), value_color);
        ui.metric(
            "From",
            &TimeUtils::format_date(series.first_date()),
            value_color,
        );
        ui.metric("To", &TimeUtils::format_date(series.last_date()), value_color);
        ui.metric("Last close", &format_price(series.last_close()), value_color);
        ui.add_space(6.0);
        ui.metric("Model", &session.model_description, value_color);
        ui.label_subdued(session.model_path.display().to_string());
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::symmetric(12, 8));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("central_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let Some(series) = self.session.as_ref().map(|s| Arc::clone(&s.series))
                        else {
                            return;
                        };

                        if self.show_history_chart {
                            section_heading(ui, UI_TEXT.history_heading);
                            self.plot_view.show_history_plot(ui, &series);
                            spaced_separator(ui);
                        }

                        let date_events = self.date_range_panel(ui);
                        for event in date_events {
                            self.apply_date_event(event);
                        }

                        self.render_forecast_section(ui, &series);
                    });
            });
    }

    fn render_forecast_section(&mut self, ui: &mut Ui, series: &HistoricalSeries) {
        match &self.forecast {
            None => {}
            // Already shown next to the date inputs
            Some(Err(ForecastError::InvalidRange)) => {}
            Some(Err(e)) => {
                ui.add_space(10.0);
                ui.label_error(format!("{} {}", UI_TEXT.forecast_error_prefix, e));
            }
            Some(Ok(result)) => {
                spaced_separator(ui);
                if self.show_forecast_table {
                    section_heading(ui, UI_TEXT.table_heading);
                    Self::render_forecast_table(ui, result);
                    spaced_separator(ui);
                }
                section_heading(ui, UI_TEXT.overlay_heading);
                self.plot_view
                    .show_overlay_plot(ui, series, result, &self.plot_visibility);
            }
        }
    }

    fn render_forecast_table(ui: &mut Ui, result: &ForecastResult) {
        let row_spacing = ui.spacing().item_spacing.y;
        let row_height = ui.text_style_height(&TextStyle::Monospace);
        let column_width = UI_CONFIG.table_column_width;

        ui.horizontal(|ui| {
            ui.add_sized(
                [column_width, row_height],
                Label::new(RichText::new(UI_TEXT.table_date_column).strong()),
            );
            ui.add_sized(
                [column_width, row_height],
                Label::new(RichText::new(UI_TEXT.table_price_column).strong()),
            );
        });

        // Only the rows inside the viewport are laid out each frame
        ScrollArea::vertical()
            .id_salt("forecast_table")
            .max_height(UI_CONFIG.table_max_height)
            .show_rows(ui, row_height, result.len(), |ui, row_range| {
                Grid::new("forecast_table_grid")
                    .num_columns(2)
                    .min_col_width(column_width)
                    .spacing([0.0, row_spacing])
                    .striped(true)
                    .show(ui, |ui| {
                        for row in &result.rows[row_range] {
                            for cell in forecast_table_cells(row) {
                                ui.table_cell(cell);
                            }
                            ui.end_row();
                        }
                    });
            });
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if let Some(session) = &self.session {
                        let file_name = session
                            .data_path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_else(|| session.data_path.display().to_string());
                        ui.metric("📄", &file_name, Color32::from_rgb(180, 200, 255));
                        ui.separator();
                        ui.metric("🧠", &session.model_description, Color32::from_rgb(180, 200, 255));
                        ui.separator();
                    }

                    let request = self.current_request();
                    match request.step_count() {
                        Some(steps) => ui.metric(
                            "🗓 Horizon",
                            &format!("{} days", steps),
                            UI_CONFIG.colors.positive,
                        ),
                        None => ui.label_warning("🗓 Horizon: invalid range"),
                    }

                    if let Some(Ok(result)) = &self.forecast {
                        ui.separator();
                        if let Some(last) = result.last_date() {
                            ui.metric(
                                "🔮 Forecast through",
                                &TimeUtils::format_date(last),
                                UI_CONFIG.colors.positive,
                            );
                        }
                    }

                    ui.separator();
                    ui.label_subdued("Press H for shortcuts");
                });
            });
    }

    pub(super) fn render_load_error(&mut self, ctx: &Context) {
        let message = self.load_error.clone().unwrap_or_default();
        CentralPanel::default()
            .frame(Frame::new().fill(UI_CONFIG.colors.central_panel))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.heading(UI_TEXT.load_error_heading);
                    ui.add_space(10.0);
                    ui.label_error(message);
                    ui.add_space(20.0);
                    ui.label(UI_TEXT.load_error_hint);
                });
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_heading)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.label("Shortcuts are ignored while a date field has focus.");
                ui.add_space(5.0);

                let toggle_historical = format!("Toggle {}", OverlaySeries::Historical);
                let toggle_forecast = format!("Toggle {}", OverlaySeries::Forecast);
                let shortcuts = [
                    ("H", "Toggle this help panel"),
                    ("G", UI_TEXT.generate_button),
                    ("C", UI_TEXT.label_show_history_chart),
                    ("T", UI_TEXT.label_show_table),
                    ("1", toggle_historical.as_str()),
                    ("2", toggle_forecast.as_str()),
                    ("Esc", "Close this panel"),
                ];

                Grid::new("general_shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });
                ui.add_space(10.0);
            });
    }

    fn view_panel(&mut self, ui: &mut Ui) -> Vec<ViewEvent> {
        let mut panel = ViewPanel::new(
            self.plot_visibility,
            self.show_history_chart,
            self.show_forecast_table,
        );
        panel.render(ui)
    }

    fn date_range_panel(&mut self, ui: &mut Ui) -> Vec<DateRangeEvent> {
        let mut panel = DateRangePanel::new(&mut self.start_field, &mut self.end_field);
        panel.render(ui)
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Typing a date must not trigger shortcuts
        if ctx.wants_keyboard_input() {
            return;
        }

        let generate = ctx.input(|i| {
            if i.key_pressed(Key::Num1) {
                self.apply_view_event(ViewEvent::Series(OverlaySeries::Historical));
            }
            if i.key_pressed(Key::Num2) {
                self.apply_view_event(ViewEvent::Series(OverlaySeries::Forecast));
            }
            if i.key_pressed(Key::C) {
                self.apply_view_event(ViewEvent::HistoryChart);
            }
            if i.key_pressed(Key::T) {
                self.apply_view_event(ViewEvent::Table);
            }

            if i.key_pressed(Key::H) {
                self.show_help = !self.show_help;
            }
            if i.key_pressed(Key::Escape) && self.show_help {
                self.show_help = false;
            }

            i.key_pressed(Key::G)
        });

        if generate {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!("Generate requested from keyboard");
            }
            self.generate_forecast();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ForecastRequest;
    use crate::engine::ForecastRow;
    use chrono::{Days, NaiveDate};

    #[test]
    fn test_long_forecast_table_stays_within_viewport() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows: Vec<ForecastRow> = (0..5_000u64)
            .map(|i| ForecastRow {
                date: start.checked_add_days(Days::new(i)).unwrap(),
                predicted_close: 100.0 + i as f64,
            })
            .collect();
        let end = rows[rows.len() - 1].date;
        let result = ForecastResult {
            request: ForecastRequest::new(start, end),
            rows,
        };

        let ctx = Context::default();
        let mut table_height = 0.0;
        let _ = ctx.run(Default::default(), |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                let top = ui.cursor().top();
                ForecastApp::render_forecast_table(ui, &result);
                table_height = ui.cursor().top() - top;
            });
        });

        assert!(table_height > 0.0);
        assert!(
            table_height <= UI_CONFIG.table_max_height + 50.0,
            "table grew to {}",
            table_height
        );
    }
}
