use eframe::egui::{Color32, RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Dashboard text styles, callable directly on `egui::Ui`.
pub trait UiStyleExt {
    /// Small gray caption, e.g. a weekday next to a date field or a file path.
    fn label_subdued(&mut self, text: impl Into<String>);

    /// `label: value` on one line. Used by the dataset summary and status bar.
    fn metric(&mut self, label: &str, value: &str, color: Color32);

    fn label_subheader(&mut self, text: impl Into<String>);

    /// Failed loads, rejected date ranges and forecast failures.
    fn label_error(&mut self, text: impl Into<String>);

    /// Hints the user can act on, such as the expected date format.
    fn label_warning(&mut self, text: impl Into<String>);

    /// Monospace cell so dates and prices line up down a column.
    fn table_cell(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(Color32::GRAY));
    }

    fn metric(&mut self, label: &str, value: &str, color: Color32) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.label_subdued(format!("{}:", label));
            ui.label(RichText::new(value).small().color(color));
        });
    }

    fn label_subheader(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.subsection_heading));
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.error));
    }

    fn label_warning(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.warning));
    }

    fn table_cell(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).monospace().color(UI_CONFIG.colors.label));
    }
}
