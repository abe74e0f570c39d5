use eframe::{Frame, egui};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::data::LoadedResources;
use crate::domain::ForecastRequest;
use crate::engine::{ForecastEngine, ForecastError, ForecastResult};
use crate::models::{Forecaster, HistoricalSeries};
use crate::ui::config::UI_TEXT;
use crate::ui::ui_panels::{DateField, DateRangeEvent, ViewEvent};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Lines of the historical-vs-forecast overlay that can be hidden.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::EnumIter,
)]
pub enum OverlaySeries {
    Historical,
    Forecast,
}

impl fmt::Display for OverlaySeries {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OverlaySeries::Historical => write!(f, "{}", UI_TEXT.overlay_history_label),
            OverlaySeries::Forecast => write!(f, "{}", UI_TEXT.forecast_series_label),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotVisibility {
    pub historical: bool,
    pub forecast: bool,
}

impl Default for PlotVisibility {
    fn default() -> Self {
        Self {
            historical: true,
            forecast: true,
        }
    }
}

impl PlotVisibility {
    pub fn is_visible(&self, series: OverlaySeries) -> bool {
        match series {
            OverlaySeries::Historical => self.historical,
            OverlaySeries::Forecast => self.forecast,
        }
    }

    pub fn toggle(&mut self, series: OverlaySeries) {
        match series {
            OverlaySeries::Historical => self.historical = !self.historical,
            OverlaySeries::Forecast => self.forecast = !self.forecast,
        }
    }
}

/// Loaded inputs plus the handler built on them. Lives for the whole process.
pub struct Session {
    pub series: Arc<HistoricalSeries>,
    pub engine: ForecastEngine,
    pub model_description: String,
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

impl Session {
    fn from_resources(resources: LoadedResources) -> Self {
        let model: Arc<dyn Forecaster> = resources.model;
        let engine = ForecastEngine::new(model);
        Self {
            series: resources.series,
            model_description: engine.model_description(),
            engine,
            data_path: resources.data_path,
            model_path: resources.model_path,
        }
    }
}

/// Only the view preferences are persisted; everything else is rebuilt from
/// the input files on every start.
#[derive(Deserialize, Serialize)]
#[serde(default)]
pub struct ForecastApp {
    pub(super) plot_visibility: PlotVisibility,
    pub(super) show_history_chart: bool,
    pub(super) show_forecast_table: bool,

    // Runtime-only state
    #[serde(skip)]
    pub(super) session: Option<Session>,
    /// Set when startup failed; the page shows nothing else.
    #[serde(skip)]
    pub(super) load_error: Option<String>,
    #[serde(skip)]
    pub(super) start_field: DateField,
    #[serde(skip)]
    pub(super) end_field: DateField,
    /// Outcome of the last "Generate Forecast"; cleared when a date changes
    #[serde(skip)]
    pub(super) forecast: Option<Result<ForecastResult, ForecastError>>,
    #[serde(skip)]
    pub(super) plot_view: PlotView,
    #[serde(skip)]
    pub(super) show_help: bool,
}

impl Default for ForecastApp {
    fn default() -> Self {
        Self::new_with_initial_state()
    }
}

impl ForecastApp {
    pub fn new(cc: &eframe::CreationContext<'_>, loaded: Result<LoadedResources>) -> Self {
        let mut app: ForecastApp;

        // Attempt to load the persisted view preferences
        if let Some(storage) = cc.storage {
            if let Some(value) = eframe::get_value(storage, eframe::APP_KEY) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted state");
                }
                app = value;
            } else {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No persisted state found. Creating anew.");
                }
                app = ForecastApp::new_with_initial_state();
            }
        } else {
            app = ForecastApp::new_with_initial_state();
        }

        app.attach(loaded);
        app
    }

    pub fn new_with_initial_state() -> Self {
        Self {
            plot_visibility: PlotVisibility::default(),
            show_history_chart: true,
            show_forecast_table: true,
            session: None,
            load_error: None,
            start_field: DateField::default(),
            end_field: DateField::default(),
            forecast: None,
            plot_view: PlotView::new(),
            show_help: false,
        }
    }

    /// Headless constructor: default preferences, no egui storage.
    pub fn from_resources(loaded: Result<LoadedResources>) -> Self {
        let mut app = Self::new_with_initial_state();
        app.attach(loaded);
        app
    }

    fn attach(&mut self, loaded: Result<LoadedResources>) {
        match loaded {
            Ok(resources) => {
                let defaults = ForecastRequest::default_after(resources.series.last_date());
                self.start_field = DateField::new(defaults.start);
                self.end_field = DateField::new(defaults.end);
                self.session = Some(Session::from_resources(resources));
                self.load_error = None;
            }
            Err(e) => {
                self.session = None;
                self.load_error = Some(format!("{:#}", e));
            }
        }
        self.forecast = None;
    }

    pub fn current_request(&self) -> ForecastRequest {
        ForecastRequest::new(self.start_field.date, self.end_field.date)
    }

    pub fn forecast(&self) -> Option<&Result<ForecastResult, ForecastError>> {
        self.forecast.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub(super) fn generate_forecast(&mut self) {
        let Some(session) = &self.session else {
            return;
        };
        let request = self.current_request();
        let outcome = session.engine.handle(&request);
        if let Err(e) = &outcome {
            log::warn!("Forecast {} → {} rejected: {}", request.start, request.end, e);
        }
        self.forecast = Some(outcome);
    }

    pub(super) fn apply_date_event(&mut self, event: DateRangeEvent) {
        match event {
            DateRangeEvent::StartDate(_) | DateRangeEvent::EndDate(_) => {
                // A result always belongs to the range currently shown
                self.forecast = None;
            }
            DateRangeEvent::Generate => self.generate_forecast(),
        }
    }

    pub(super) fn apply_view_event(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::Series(series) => self.plot_visibility.toggle(series),
            ViewEvent::HistoryChart => self.show_history_chart = !self.show_history_chart,
            ViewEvent::Table => self.show_forecast_table = !self.show_forecast_table,
        }
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("View event {:?}", event);
        }
    }
}

impl eframe::App for ForecastApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);

        if self.load_error.is_some() {
            self.render_load_error(ctx);
            return;
        }

        self.handle_global_shortcuts(ctx);

        self.render_header(ctx);
        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }
    }
}
