use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::constants::{MAX_ANNUAL_SUNLIGHT_HOURS, OPTIMAL_SUNLIGHT_FRACTION};
use crate::utils::logging::{self, OperationCategory, SolarGeometryType};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunlightStatistics {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std: f64,
    /// Percentage (0-100) of pixels above 80% of the grid maximum.
    pub optimal_area_percentage: f64,
}

/// Annual sunlight-hour grid together with the shadow map it was derived from.
#[derive(Debug, Clone)]
pub struct SunlightGrid {
    shadow_map: Array2<f64>,
    sunlight_hours: Array2<f64>,
    max_hours: f64,
}

impl SunlightGrid {
    /// Converts a shadow probability map with a flat 12 h/day daylight assumption.
    pub fn from_shadow_map(shadow_map: Array2<f64>) -> Self {
        let _timing = logging::start_timing(
            "sunlight_hours",
            OperationCategory::SolarGeometry { subcategory: SolarGeometryType::SunlightHours },
        );

        let sunlight_hours = shadow_map.mapv(|shadow| MAX_ANNUAL_SUNLIGHT_HOURS * (1.0 - shadow));
        let max_hours = sunlight_hours.iter().cloned().fold(0.0_f64, f64::max);

        Self {
            shadow_map,
            sunlight_hours,
            max_hours,
        }
    }

    pub fn shadow_map(&self) -> &Array2<f64> {
        &self.shadow_map
    }

    pub fn hours(&self) -> &Array2<f64> {
        &self.sunlight_hours
    }

    pub fn shape(&self) -> (usize, usize) {
        self.sunlight_hours.dim()
    }

    pub fn max_hours(&self) -> f64 {
        self.max_hours
    }

    /// Pixels receiving more than 80% of the grid maximum.
    pub fn optimal_zones(&self) -> Array2<bool> {
        let threshold = self.max_hours * OPTIMAL_SUNLIGHT_FRACTION;
        self.sunlight_hours.mapv(|hours| hours > threshold)
    }

    pub fn statistics(&self) -> SunlightStatistics {
        let hours = &self.sunlight_hours;
        let count = hours.len();
        if count == 0 {
            return SunlightStatistics {
                mean: 0.0,
                max: 0.0,
                min: 0.0,
                std: 0.0,
                optimal_area_percentage: 0.0,
            };
        }

        let n = count as f64;
        let mean = hours.sum() / n;
        let min = hours.iter().cloned().fold(f64::INFINITY, f64::min);
        let variance = hours.iter().map(|h| (h - mean).powi(2)).sum::<f64>() / n;

        let optimal = self.optimal_zones().iter().filter(|&&zone| zone).count();

        let stats = SunlightStatistics {
            mean,
            max: self.max_hours,
            min,
            std: variance.sqrt(),
            optimal_area_percentage: optimal as f64 / n * 100.0,
        };

        info!(
            "Mean annual sunlight: {:.2} hours, optimal area coverage: {:.2}%",
            stats.mean, stats.optimal_area_percentage
        );

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn unshadowed_grid_is_constant() {
        let grid = SunlightGrid::from_shadow_map(Array2::zeros((4, 6)));
        assert!(grid.hours().iter().all(|&h| h == 12.0 * 365.0));
        let stats = grid.statistics();
        assert_eq!(stats.max, 4380.0);
        assert_eq!(stats.min, 4380.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.optimal_area_percentage, 100.0);
    }

    #[test]
    fn shadow_reduces_hours_proportionally() {
        let grid = SunlightGrid::from_shadow_map(array![[0.0, 0.5], [1.0, 0.25]]);
        assert_eq!(grid.hours()[[0, 1]], 2190.0);
        assert_eq!(grid.hours()[[1, 0]], 0.0);
        let stats = grid.statistics();
        assert_eq!(stats.max, 4380.0);
        assert_eq!(stats.min, 0.0);
        assert!((stats.mean - 4380.0 * 0.5625).abs() < 1e-9);
        // Only the unshadowed pixel clears 80% of the maximum
        assert_eq!(stats.optimal_area_percentage, 25.0);
        assert_eq!(grid.optimal_zones(), array![[true, false], [false, false]]);
        assert_eq!(grid.shadow_map()[[0, 1]], 0.5);
    }
}
