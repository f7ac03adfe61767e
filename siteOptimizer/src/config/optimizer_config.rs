use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::constants::*;
use crate::error::{Result, SitingError};
use crate::models::geospatial::{Coordinates, GeospatialContext};
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// How offspring produced during refinement receive their score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffspringScoring {
    /// Offspring inherit `parent1.score * offspring_decay` without re-evaluation.
    ParentDecay,
    /// Offspring are re-evaluated with the full multi-criteria scorer.
    Rescore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    pub population_size: usize,
    pub max_generations: usize,
    pub generation_cap: usize,
    pub top_n: usize,
    pub mutation_rate: f64,
    pub mutation_offset: i32,
    pub offspring_decay: f64,
    pub offspring_scoring: OffspringScoring,
    pub min_site_area: f64,      // square meters
    pub max_site_area: f64,      // square meters
    pub min_aspect_ratio: f64,
    pub max_aspect_ratio: f64,
    pub edge_margin: u32,        // pixels kept clear on every image edge
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_generations: DEFAULT_MAX_GENERATIONS,
            generation_cap: GENERATION_CAP,
            top_n: DEFAULT_TOP_N,
            mutation_rate: DEFAULT_MUTATION_RATE,
            mutation_offset: DEFAULT_MUTATION_OFFSET,
            offspring_decay: DEFAULT_OFFSPRING_DECAY,
            offspring_scoring: OffspringScoring::ParentDecay,
            min_site_area: DEFAULT_MIN_SITE_AREA,
            max_site_area: DEFAULT_MAX_SITE_AREA,
            min_aspect_ratio: DEFAULT_MIN_ASPECT_RATIO,
            max_aspect_ratio: DEFAULT_MAX_ASPECT_RATIO,
            edge_margin: DEFAULT_EDGE_MARGIN,
        }
    }
}

impl OptimizationConfig {
    pub fn effective_generations(&self) -> usize {
        self.generation_cap.min(self.max_generations)
    }
}

/// Fallback location used when a scene carries no geospatial context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeospatialConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub bbox: [f64; 4],
    pub default_slope: f64, // degrees
}

impl Default for GeospatialConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            bbox: DEFAULT_GEO_BBOX,
            default_slope: DEFAULT_SLOPE_DEG,
        }
    }
}

impl GeospatialConfig {
    pub fn default_context(&self) -> GeospatialContext {
        GeospatialContext::new(
            Coordinates {
                latitude: self.latitude,
                longitude: self.longitude,
                bbox: self.bbox,
            },
            self.default_slope,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    pub optimization: OptimizationConfig,
    pub geospatial: GeospatialConfig,
    pub processing_timeout_secs: u64,
    pub seed: Option<u64>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            optimization: OptimizationConfig::default(),
            geospatial: GeospatialConfig::default(),
            processing_timeout_secs: DEFAULT_PROCESSING_TIMEOUT_SECS,
            seed: None,
        }
    }
}

impl OptimizerConfig {
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let _timing = logging::start_timing("load_config",
            OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

        let contents = std::fs::read_to_string(path)?;
        let config: OptimizerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn processing_budget(&self) -> Duration {
        Duration::from_secs(self.processing_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        let opt = &self.optimization;

        if opt.population_size < 2 {
            return Err(SitingError::InvalidConfig(format!(
                "population_size must be at least 2, got {}",
                opt.population_size
            )));
        }
        if opt.top_n == 0 {
            return Err(SitingError::InvalidConfig("top_n must be at least 1".to_string()));
        }
        if !(0.0..=1.0).contains(&opt.mutation_rate) {
            return Err(SitingError::InvalidConfig(format!(
                "mutation_rate must lie in [0, 1], got {}",
                opt.mutation_rate
            )));
        }
        if opt.mutation_offset < 0 {
            return Err(SitingError::InvalidConfig(format!(
                "mutation_offset must be non-negative, got {}",
                opt.mutation_offset
            )));
        }
        if !(0.0..=1.0).contains(&opt.offspring_decay) {
            return Err(SitingError::InvalidConfig(format!(
                "offspring_decay must lie in [0, 1], got {}",
                opt.offspring_decay
            )));
        }
        if !(opt.min_site_area > 0.0 && opt.min_site_area < opt.max_site_area) {
            return Err(SitingError::InvalidConfig(format!(
                "site area range [{}, {}) is empty or non-positive",
                opt.min_site_area, opt.max_site_area
            )));
        }
        if !(opt.min_aspect_ratio > 0.0 && opt.min_aspect_ratio < opt.max_aspect_ratio) {
            return Err(SitingError::InvalidConfig(format!(
                "aspect ratio range [{}, {}) is empty or non-positive",
                opt.min_aspect_ratio, opt.max_aspect_ratio
            )));
        }
        if !(-90.0..=90.0).contains(&self.geospatial.latitude) {
            return Err(SitingError::InvalidConfig(format!(
                "latitude {} is outside [-90, 90]",
                self.geospatial.latitude
            )));
        }

        Ok(())
    }
}
