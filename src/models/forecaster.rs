use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::sarima::SarimaModel;

/// The one capability the dashboard needs from a pre-trained model.
///
/// `forecast(steps)` returns `steps` point predictions in sequence order, one per
/// future period after the end of the model's own training data. Implementations
/// are read-only: calling `forecast` never changes the model.
pub trait Forecaster {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>>;

    /// Short human-readable label (status bar, logs).
    fn describe(&self) -> String;
}

/// Every model kind a model file may contain.
/// A file whose payload matches none of these does not expose `forecast` and is
/// rejected at load time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum ForecastModel {
    Sarima(SarimaModel),
}

impl ForecastModel {
    /// Structural checks run right after deserialization.
    pub fn validate(&self) -> Result<()> {
        match self {
            ForecastModel::Sarima(model) => model.validate(),
        }
    }
}

impl Forecaster for ForecastModel {
    fn forecast(&self, steps: usize) -> Result<Vec<f64>> {
        match self {
            ForecastModel::Sarima(model) => model.forecast(steps),
        }
    }

    fn describe(&self) -> String {
        match self {
            ForecastModel::Sarima(model) => model.describe(),
        }
    }
}
