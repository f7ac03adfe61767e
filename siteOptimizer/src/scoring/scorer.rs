// Multi-criteria site scoring
use ndarray::s;
use rayon::prelude::*;
use tracing::info;

use crate::config::constants::*;
use crate::data::poi::PixelPoint;
use crate::error::{Result, SitingError};
use crate::models::geospatial::GeospatialContext;
use crate::models::obstacle::Obstacle;
use crate::models::site::Site;
use crate::models::terrain::{TerrainClass, TerrainRegionSet};
use crate::scoring::criteria::ScoreComponents;
use crate::solar::sunlight::SunlightGrid;
use crate::utils::logging::{self, OperationCategory, SiteSearchType};
use crate::utils::spatial_index::ObstacleIndex;

pub trait SiteEvaluator: Sync {
    fn evaluate(&self, site: Site) -> Site;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainRule {
    pub class: TerrainClass,
    pub score: f64,
}

/// Terrain overrides in priority order: when a center lies in several classes,
/// the last matching rule wins.
pub const TERRAIN_RULES: [TerrainRule; 3] = [
    TerrainRule { class: TerrainClass::BareLand, score: BARE_LAND_SCORE },
    TerrainRule { class: TerrainClass::Water, score: WATER_SCORE },
    TerrainRule { class: TerrainClass::Building, score: BUILDING_SCORE },
];

pub fn accessibility_score(slope: f64) -> f64 {
    if slope < FLAT_SLOPE_LIMIT {
        FLAT_SLOPE_SCORE
    } else if slope < GENTLE_SLOPE_LIMIT {
        GENTLE_SLOPE_SCORE
    } else if slope < MODERATE_SLOPE_LIMIT {
        MODERATE_SLOPE_SCORE
    } else {
        STEEP_SLOPE_SCORE
    }
}

pub fn cost_score(area: f64) -> f64 {
    if area > LARGE_SITE_AREA {
        LARGE_SITE_SCORE
    } else if area > MEDIUM_SITE_AREA {
        MEDIUM_SITE_SCORE
    } else if area > SMALL_SITE_AREA {
        SMALL_SITE_SCORE
    } else {
        TINY_SITE_SCORE
    }
}

pub struct MultiCriteriaScorer<'a> {
    sunlight: &'a SunlightGrid,
    terrain: &'a TerrainRegionSet,
    obstacles: ObstacleIndex,
    accessibility: f64,
}

impl<'a> MultiCriteriaScorer<'a> {
    /// Fails when the sunlight grid was not computed for an image of `image_shape` (height, width).
    pub fn new(
        sunlight: &'a SunlightGrid,
        terrain: &'a TerrainRegionSet,
        obstacles: &[Obstacle],
        geospatial: &GeospatialContext,
        image_shape: (usize, usize),
    ) -> Result<Self> {
        if sunlight.shape() != image_shape {
            return Err(SitingError::GridShapeMismatch {
                expected: image_shape,
                found: sunlight.shape(),
            });
        }

        Ok(Self {
            sunlight,
            terrain,
            obstacles: ObstacleIndex::new(obstacles),
            // Scene-level slope, identical for every site
            accessibility: accessibility_score(geospatial.slope),
        })
    }

    /// Mean sunlight hours under the site's clipped footprint over the grid maximum.
    pub fn sunlight_score(&self, site: &Site) -> f64 {
        let (height, width) = self.sunlight.shape();
        let max_hours = self.sunlight.max_hours();

        match site.footprint().clipped_ranges(height, width) {
            Some(((r0, r1), (c0, c1))) if max_hours > 0.0 => {
                let window = self.sunlight.hours().slice(s![r0..r1, c0..c1]);
                let mean = window.sum() / window.len() as f64;
                (mean / max_hours).clamp(0.0, 1.0)
            }
            _ => DEGENERATE_SUNLIGHT_SCORE,
        }
    }

    pub fn terrain_score(&self, center: &PixelPoint) -> f64 {
        TERRAIN_RULES
            .iter()
            .filter(|rule| self.terrain.any_contains(rule.class, center))
            .last()
            .map(|rule| rule.score)
            .unwrap_or(NEUTRAL_TERRAIN_SCORE)
    }

    pub fn obstacle_score(&self, center: &PixelPoint) -> f64 {
        match self.obstacles.nearest_distance(center) {
            Some(distance) => (distance / OBSTACLE_CLEARANCE_DISTANCE).min(1.0),
            None => NO_OBSTACLE_SCORE,
        }
    }

    pub fn components(&self, site: &Site) -> ScoreComponents {
        let center = site.center();
        ScoreComponents::new(
            self.sunlight_score(site),
            self.terrain_score(&center),
            self.obstacle_score(&center),
            self.accessibility,
            cost_score(site.area()),
        )
    }

    pub fn score_all(&self, sites: Vec<Site>) -> Vec<Site> {
        let _timing = logging::start_timing(
            "score_all",
            OperationCategory::SiteSearch { subcategory: SiteSearchType::Scoring },
        );

        let scored: Vec<Site> = sites.into_par_iter().map(|site| self.evaluate(site)).collect();
        info!("Scored {} candidate sites", scored.len());
        scored
    }
}

impl SiteEvaluator for MultiCriteriaScorer<'_> {
    fn evaluate(&self, site: Site) -> Site {
        let components = self.components(&site);
        site.with_components(components)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::poi::BoundingBox;
    use crate::models::geospatial::Coordinates;
    use crate::models::terrain::TerrainRegion;
    use ndarray::Array2;

    fn context(slope: f64) -> GeospatialContext {
        GeospatialContext::new(
            Coordinates { latitude: 40.7128, longitude: -74.0060, bbox: [0.0; 4] },
            slope,
        )
    }

    fn site_at(x: i32, y: i32) -> Site {
        Site::candidate(0, PixelPoint::new(x, y), 20, 20, 4000.0, 0.0)
    }

    #[test]
    fn rejects_mismatched_grid() {
        let grid = SunlightGrid::from_shadow_map(Array2::zeros((100, 100)));
        let terrain = TerrainRegionSet::new();
        let result = MultiCriteriaScorer::new(&grid, &terrain, &[], &context(0.0), (100, 120));
        assert!(matches!(result, Err(SitingError::GridShapeMismatch { .. })));
    }

    #[test]
    fn slope_bands() {
        assert_eq!(accessibility_score(0.0), 1.0);
        assert_eq!(accessibility_score(5.0), 0.7);
        assert_eq!(accessibility_score(9.99), 0.7);
        assert_eq!(accessibility_score(14.0), 0.4);
        assert_eq!(accessibility_score(15.0), 0.2);
    }

    #[test]
    fn area_bands() {
        assert_eq!(cost_score(9000.0), 1.0);
        assert_eq!(cost_score(8000.0), 0.8);
        assert_eq!(cost_score(5000.1), 0.8);
        assert_eq!(cost_score(3500.0), 0.6);
        assert_eq!(cost_score(3000.0), 0.4);
    }

    #[test]
    fn sunlight_uses_footprint_mean() {
        let mut shadow = Array2::<f64>::zeros((100, 100));
        shadow.slice_mut(s![40..50, 40..60]).fill(1.0);
        let grid = SunlightGrid::from_shadow_map(shadow);
        let terrain = TerrainRegionSet::new();
        let scorer = MultiCriteriaScorer::new(&grid, &terrain, &[], &context(0.0), (100, 100)).unwrap();

        // Footprint rows 40..60, cols 40..60: half of it fully shadowed
        assert!((scorer.sunlight_score(&site_at(50, 50)) - 0.5).abs() < 1e-12);
        assert_eq!(scorer.sunlight_score(&site_at(20, 20)), 1.0);
    }

    #[test]
    fn footprint_outside_grid_is_neutral() {
        let grid = SunlightGrid::from_shadow_map(Array2::zeros((100, 100)));
        let terrain = TerrainRegionSet::new();
        let scorer = MultiCriteriaScorer::new(&grid, &terrain, &[], &context(0.0), (100, 100)).unwrap();
        assert_eq!(scorer.sunlight_score(&site_at(200, 200)), DEGENERATE_SUNLIGHT_SCORE);
    }

    #[test]
    fn terrain_rules_apply_in_order() {
        let region = |bbox| TerrainRegion::from_bbox(bbox);
        let terrain = TerrainRegionSet::new()
            .with_region(TerrainClass::BareLand, region(BoundingBox::new(0, 0, 50, 50)))
            .with_region(TerrainClass::Water, region(BoundingBox::new(25, 0, 50, 50)))
            .with_region(TerrainClass::Building, region(BoundingBox::new(40, 0, 50, 50)));
        let grid = SunlightGrid::from_shadow_map(Array2::zeros((100, 100)));
        let scorer = MultiCriteriaScorer::new(&grid, &terrain, &[], &context(0.0), (100, 100)).unwrap();

        assert_eq!(scorer.terrain_score(&PixelPoint::new(80, 80)), NEUTRAL_TERRAIN_SCORE);
        assert_eq!(scorer.terrain_score(&PixelPoint::new(10, 10)), BARE_LAND_SCORE);
        assert_eq!(scorer.terrain_score(&PixelPoint::new(30, 10)), WATER_SCORE);
        assert_eq!(scorer.terrain_score(&PixelPoint::new(45, 10)), BUILDING_SCORE);
    }

    #[test]
    fn weighted_total_matches_components() {
        let grid = SunlightGrid::from_shadow_map(Array2::zeros((100, 100)));
        let terrain = TerrainRegionSet::new();
        let obstacles = vec![Obstacle::at(PixelPoint::new(50, 80), "pole")];
        let scorer = MultiCriteriaScorer::new(&grid, &terrain, &obstacles, &context(12.0), (100, 100)).unwrap();

        let scored = scorer.evaluate(site_at(50, 50));
        let components = scored.score_components().unwrap();
        assert_eq!(components.obstacles, 0.3);
        assert_eq!(components.accessibility, 0.4);
        assert_eq!(components.cost, 0.6);
        assert!((scored.score() - components.weighted_total()).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&scored.score()));
    }
}
