//! File persistence and serialization configuration

/// Where the historical price table lives
pub struct HistoricalDataPaths {
    /// CSV read once at startup
    pub csv_path: &'static str,
    pub date_column: &'static str,
    pub close_column: &'static str,
}

/// Where the pre-trained model lives, and which envelope version we accept
pub struct ModelPaths {
    pub model_path: &'static str,
    /// Current version of the model file envelope.
    /// Bump whenever `ModelFile` or any model struct changes shape.
    pub version: f64,
}

/// The Master Persistence Configuration
pub struct PersistenceConfig {
    pub historical: HistoricalDataPaths,
    pub model: ModelPaths,
    /// Path for saving/loading application UI state
    pub app_state_path: &'static str,
}

pub const PERSISTENCE: PersistenceConfig = PersistenceConfig {
    historical: HistoricalDataPaths {
        csv_path: "Appledataset.csv",
        date_column: "Date",
        close_column: "Close",
    },
    model: ModelPaths {
        model_path: "sarima_model.bin",
        version: 1.0,
    },
    app_state_path: ".states.json",
};
