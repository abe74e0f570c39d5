use chrono::{Days, NaiveDate};
use eframe::egui::{Button, TextEdit, Ui};
use strum::IntoEnumIterator;

use crate::ui::app::{OverlaySeries, PlotVisibility};
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{section_heading, spaced_separator};
use crate::utils::TimeUtils;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// A date input backed by free text. The last date that parsed stays in
/// effect while the text is being edited.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateField {
    pub date: NaiveDate,
    pub text: String,
    pub parse_error: bool,
}

impl DateField {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            text: TimeUtils::format_date(date),
            parse_error: false,
        }
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        *self = Self::new(date);
    }

    /// Re-reads `text`. Returns the new date when it parsed and differs.
    pub fn commit_text(&mut self) -> Option<NaiveDate> {
        match TimeUtils::parse_date(&self.text) {
            Some(date) => {
                self.parse_error = false;
                if date != self.date {
                    self.date = date;
                    return Some(date);
                }
                None
            }
            None => {
                self.parse_error = true;
                None
            }
        }
    }

    pub fn shift_days(&mut self, delta: i64) -> Option<NaiveDate> {
        let shifted = if delta >= 0 {
            self.date.checked_add_days(Days::new(delta.unsigned_abs()))
        } else {
            self.date.checked_sub_days(Days::new(delta.unsigned_abs()))
        }?;
        self.set_date(shifted);
        Some(shifted)
    }
}

fn render_date_input(ui: &mut Ui, label: &str, field: &mut DateField) -> Option<NaiveDate> {
    ui.vertical(|ui| {
        ui.label_subheader(label);
        let mut changed = None;
        ui.horizontal(|ui| {
            if ui.small_button("−").clicked() {
                changed = field.shift_days(-1);
            }
            let response = ui.add(
                TextEdit::singleline(&mut field.text)
                    .desired_width(100.0)
                    .hint_text(UI_TEXT.date_format_hint),
            );
            if response.changed() {
                changed = field.commit_text();
            }
            if ui.small_button("+").clicked() {
                changed = field.shift_days(1);
            }
            ui.label_subdued(field.date.format("%a").to_string());
        });
        if field.parse_error {
            ui.label_warning(UI_TEXT.date_format_hint);
        }
        changed
    })
    .inner
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateRangeEvent {
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    Generate,
}

/// Start/end inputs, the inline range error and the generate button.
pub struct DateRangePanel<'a> {
    start: &'a mut DateField,
    end: &'a mut DateField,
}

impl<'a> DateRangePanel<'a> {
    pub fn new(start: &'a mut DateField, end: &'a mut DateField) -> Self {
        Self { start, end }
    }
}

impl<'a> Panel for DateRangePanel<'a> {
    type Event = DateRangeEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.date_range_heading);

        ui.horizontal(|ui| {
            if let Some(date) = render_date_input(ui, UI_TEXT.start_date_label, self.start) {
                events.push(DateRangeEvent::StartDate(date));
            }
            ui.add_space(20.0);
            if let Some(date) = render_date_input(ui, UI_TEXT.end_date_label, self.end) {
                events.push(DateRangeEvent::EndDate(date));
            }
        });

        let is_valid = self.start.date <= self.end.date;
        if !is_valid {
            ui.add_space(5.0);
            ui.label_error(UI_TEXT.invalid_range_message);
        }

        ui.add_space(5.0);
        if ui
            .add_enabled(is_valid, Button::new(UI_TEXT.generate_button))
            .clicked()
        {
            events.push(DateRangeEvent::Generate);
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions && !events.is_empty() {
            log::info!("Date range events: {:?}", events);
        }

        events
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    Series(OverlaySeries),
    HistoryChart,
    Table,
}

/// Panel for view options
pub struct ViewPanel {
    visibility: PlotVisibility,
    show_history_chart: bool,
    show_table: bool,
}

impl ViewPanel {
    pub fn new(visibility: PlotVisibility, show_history_chart: bool, show_table: bool) -> Self {
        Self {
            visibility,
            show_history_chart,
            show_table,
        }
    }
}

impl Panel for ViewPanel {
    type Event = ViewEvent;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.view_options_heading);

        if ui
            .checkbox(&mut self.show_history_chart, UI_TEXT.label_show_history_chart)
            .changed()
        {
            events.push(ViewEvent::HistoryChart);
        }
        if ui
            .checkbox(&mut self.show_table, UI_TEXT.label_show_table)
            .changed()
        {
            events.push(ViewEvent::Table);
        }

        spaced_separator(ui);
        ui.label_subheader(UI_TEXT.overlay_heading);
        for series in OverlaySeries::iter() {
            let mut visible = self.visibility.is_visible(series);
            if ui.checkbox(&mut visible, series.to_string()).changed() {
                self.visibility.toggle(series);
                events.push(ViewEvent::Series(series));
            }
        }

        ui.add_space(20.0);
        events
    }
}
