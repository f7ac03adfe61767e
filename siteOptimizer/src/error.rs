use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum SitingError {
    #[error("Invalid geometry: image {width}x{height} is too small for the sampling margins")]
    InvalidGeometry { width: usize, height: usize },
    #[error("Sunlight grid shape {found:?} does not match image shape {expected:?}")]
    GridShapeMismatch {
        expected: (usize, usize),
        found: (usize, usize),
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Processing budget of {budget:?} exceeded after {elapsed:?}")]
    Timeout { elapsed: Duration, budget: Duration },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SitingError>;
