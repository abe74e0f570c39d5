use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::PERSISTENCE;
use crate::models::{ForecastModel, Forecaster};

/// On-disk encoding, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelEncoding {
    /// `.json`: hand-editable, handy for coefficients exported from elsewhere
    Json,
    /// Anything else
    Bincode,
}

impl ModelEncoding {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ModelEncoding::Json,
            _ => ModelEncoding::Bincode,
        }
    }
}

/// Serialized model wrapper.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub description: String,
    pub model: ForecastModel,
}

impl ModelFile {
    pub fn new(model: ForecastModel, description: impl Into<String>) -> Self {
        Self {
            version: PERSISTENCE.model.version,
            timestamp_ms: Utc::now().timestamp_millis(),
            description: description.into(),
            model,
        }
    }

    /// Reads, version-checks and validates a model file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_serde.then(|| {
            log::info!("Reading model from {:?}...", path);
            std::time::Instant::now()
        });

        let file = File::open(path).context(format!("Failed to open model file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let model_file: ModelFile = match ModelEncoding::from_path(path) {
            ModelEncoding::Json => serde_json::from_reader(&mut reader)
                .context(format!("Failed to deserialize JSON model: {:?}", path))?,
            ModelEncoding::Bincode => bincode::deserialize_from(&mut reader)
                .context(format!("Failed to deserialize model: {:?}", path))?,
        };

        if model_file.version != PERSISTENCE.model.version {
            bail!(
                "Model file version mismatch: file v{} vs required v{}",
                model_file.version,
                PERSISTENCE.model.version
            );
        }
        model_file
            .model
            .validate()
            .context(format!("Model in {:?} is not usable", path))?;

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "✅ Model loaded: {} ({}) in {:.3}s",
                model_file.model.describe(),
                model_file.description,
                start.elapsed().as_secs_f64()
            );
        }

        Ok(model_file)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create directory: {}", parent.display()))?;
            }
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        match ModelEncoding::from_path(path) {
            ModelEncoding::Json => serde_json::to_writer_pretty(&mut writer, self)
                .context(format!("Failed to serialize model to: {}", path.display())),
            ModelEncoding::Bincode => bincode::serialize_into(&mut writer, self)
                .context(format!("Failed to serialize model to: {}", path.display())),
        }
    }
}
