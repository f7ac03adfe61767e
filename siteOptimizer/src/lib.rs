// Module declarations for the solar site optimizer

// Candidate search pipeline
pub mod core {
    pub mod candidate_generation;
    pub mod refinement;
    pub mod pipeline;
}

// Sun geometry and shadow accumulation
pub mod solar {
    pub mod sun_position;
    pub mod shadow_map;
    pub mod sunlight;
}

// Multi-criteria site scoring
pub mod scoring {
    pub mod criteria;
    pub mod scorer;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod optimizer_config;
}

// Model definitions
pub mod models {
    pub mod site;
    pub mod terrain;
    pub mod obstacle;
    pub mod geospatial;
}

// Scene input
pub mod data {
    pub mod poi;
    pub mod scene_loader;
}

// Analysis and metrics
pub mod analysis {
    pub mod metrics;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod spatial_index;
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

pub mod error;

// Re-export commonly used types
pub use crate::core::pipeline::{OptimizationOutcome, SiteOptimizer};
pub use crate::config::optimizer_config::OptimizerConfig;
pub use crate::data::scene_loader::Scene;
pub use crate::error::{Result, SitingError};
pub use crate::models::site::Site;
