use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::constants::DEFAULT_SLOPE_DEG;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub bbox: [f64; 4], // [min_lat, min_lon, max_lat, max_lon]
}

/// Scene-level geographic context. Only `coordinates` and `slope` feed the optimizer;
/// everything else the collaborator sends is kept in `ancillary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeospatialContext {
    pub coordinates: Coordinates,
    #[serde(default = "default_slope")]
    pub slope: f64, // degrees, representative of the whole scene
    #[serde(flatten)]
    pub ancillary: BTreeMap<String, serde_json::Value>,
}

fn default_slope() -> f64 {
    DEFAULT_SLOPE_DEG
}

impl GeospatialContext {
    pub fn new(coordinates: Coordinates, slope: f64) -> Self {
        Self {
            coordinates,
            slope,
            ancillary: BTreeMap::new(),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.longitude
    }
}
