// Data loading and process-lifetime caching
pub mod historical;
pub mod model_file;
pub mod resources;

// Re-export commonly used types
pub use historical::load_historical_series;
pub use model_file::{ModelEncoding, ModelFile};
pub use resources::{LoadOnce, LoadedResources, ResourceCache};
