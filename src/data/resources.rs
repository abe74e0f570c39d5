//! Process-lifetime memoization of the two input files.
//!
//! Init-on-first-use: the first `get_or_load` on a slot reads its file; every
//! later call hands back the same `Arc` without touching the filesystem. A
//! failed load leaves the slot empty.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use anyhow::Result;

use crate::data::historical::load_historical_series;
use crate::data::model_file::ModelFile;
use crate::models::{ForecastModel, Forecaster, HistoricalSeries};

pub struct LoadOnce<T> {
    path: PathBuf,
    cell: OnceLock<Arc<T>>,
}

impl<T> LoadOnce<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cell: OnceLock::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn get_or_load(&self, loader: impl FnOnce(&Path) -> Result<T>) -> Result<Arc<T>> {
        if let Some(value) = self.cell.get() {
            return Ok(Arc::clone(value));
        }
        let loaded = Arc::new(loader(&self.path)?);
        // If another caller won the race, keep theirs so every caller shares one value.
        Ok(Arc::clone(self.cell.get_or_init(|| loaded)))
    }
}

/// Everything the dashboard needs once startup succeeded.
#[derive(Clone)]
pub struct LoadedResources {
    pub series: Arc<HistoricalSeries>,
    pub model: Arc<ForecastModel>,
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

/// The two load-once resources the dashboard runs on.
pub struct ResourceCache {
    series: LoadOnce<HistoricalSeries>,
    model: LoadOnce<ForecastModel>,
}

impl ResourceCache {
    pub fn new(data_path: impl Into<PathBuf>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            series: LoadOnce::new(data_path),
            model: LoadOnce::new(model_path),
        }
    }

    pub fn series(&self) -> Result<Arc<HistoricalSeries>> {
        self.series.get_or_load(load_historical_series)
    }

    pub fn model(&self) -> Result<Arc<ForecastModel>> {
        self.model
            .get_or_load(|path| ModelFile::load_from_path(path).map(|file| file.model))
    }

    /// Data first, then model. Either failure is fatal to the session.
    pub fn load_all(&self) -> Result<LoadedResources> {
        let series = self.series()?;
        let model = self.model()?;
        log::info!(
            "Loaded {} closes ({} → {}) and {} model",
            series.len(),
            series.first_date(),
            series.last_date(),
            model.describe()
        );
        Ok(LoadedResources {
            series,
            model,
            data_path: self.data_path().to_path_buf(),
            model_path: self.model_path().to_path_buf(),
        })
    }

    pub fn data_path(&self) -> &Path {
        self.series.path()
    }

    pub fn model_path(&self) -> &Path {
        self.model.path()
    }
}
