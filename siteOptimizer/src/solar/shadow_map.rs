use chrono::NaiveDate;
use ndarray::{s, Array2};
use tracing::debug;

use crate::config::constants::{
    BUILDING_SHADOW_INCREMENT, CLASSIFIED_SHADOW_INCREMENT, MIN_ELEVATION_TANGENT,
    SHADOW_FIRST_HOUR, SHADOW_LAST_HOUR, SHADOW_PROJECTION_SCALE, SHADOW_SEMI_AXIS_X,
    SHADOW_SEMI_AXIS_Y,
};
use crate::data::poi::PixelPoint;
use crate::models::terrain::{TerrainClass, TerrainRegionSet};
use crate::solar::sun_position::{SunPosition, SunPositionModel};
use crate::utils::logging::{self, OperationCategory, SolarGeometryType};

/// Offset, in pixels, of a building's shadow footprint from its center for one sun position.
pub fn shadow_offset(position: &SunPosition) -> (f64, f64) {
    let tangent = position.elevation.to_radians().tan().max(MIN_ELEVATION_TANGENT);
    let shadow_length = 1.0 / tangent;
    let azimuth = position.azimuth.to_radians();
    (
        shadow_length * azimuth.cos() * SHADOW_PROJECTION_SCALE,
        shadow_length * azimuth.sin() * SHADOW_PROJECTION_SCALE,
    )
}

/// Accumulates an approximate per-pixel shadow probability for one reference day.
///
/// Coarse model: every building casts a fixed 30x20 px elliptical footprint
/// displaced along the sun's azimuth once per daylight hour, and pre-classified
/// shadow regions add a flat amount over their boxes.
#[derive(Debug, Clone, Copy)]
pub struct ShadowMapBuilder {
    sun_model: SunPositionModel,
}

impl ShadowMapBuilder {
    pub fn new(sun_model: SunPositionModel) -> Self {
        Self { sun_model }
    }

    pub fn sun_model(&self) -> &SunPositionModel {
        &self.sun_model
    }

    pub fn daylight_positions(&self, date: NaiveDate) -> Vec<(u32, SunPosition)> {
        let _timing = logging::start_timing(
            "daylight_positions",
            OperationCategory::SolarGeometry { subcategory: SolarGeometryType::SunPosition },
        );

        (SHADOW_FIRST_HOUR..=SHADOW_LAST_HOUR)
            .map(|hour| (hour, self.sun_model.position(date, hour)))
            .filter(|(hour, position)| {
                debug!(
                    "hour {:02}: azimuth {:.2}, elevation {:.2}",
                    hour, position.azimuth, position.elevation
                );
                position.is_above_horizon()
            })
            .collect()
    }

    pub fn build(
        &self,
        terrain: &TerrainRegionSet,
        height: usize,
        width: usize,
        date: NaiveDate,
    ) -> Array2<f64> {
        let _timing = logging::start_timing(
            "build_shadow_map",
            OperationCategory::SolarGeometry { subcategory: SolarGeometryType::ShadowMap },
        );

        let mut shadow_map = Array2::<f64>::zeros((height, width));
        let buildings = terrain.regions(TerrainClass::Building);
        let mut stamps = 0usize;

        for (_, position) in self.daylight_positions(date) {
            let (dx, dy) = shadow_offset(&position);

            for building in buildings {
                let shadow_center = PixelPoint::new(
                    (building.center.x as f64 + dx).trunc() as i32,
                    (building.center.y as f64 + dy).trunc() as i32,
                );
                if stamp_ellipse(&mut shadow_map, shadow_center, BUILDING_SHADOW_INCREMENT) {
                    stamps += 1;
                }
            }
        }

        for region in terrain.regions(TerrainClass::Shadow) {
            if let Some(((r0, r1), (c0, c1))) = region.bbox.clipped_ranges(height, width) {
                shadow_map
                    .slice_mut(s![r0..r1, c0..c1])
                    .mapv_inplace(|value| value + CLASSIFIED_SHADOW_INCREMENT);
            }
        }

        shadow_map.mapv_inplace(|value| value.clamp(0.0, 1.0));

        debug!(
            "shadow map {}x{}: {} building footprints stamped, {} classified shadow regions",
            width,
            height,
            stamps,
            terrain.count(TerrainClass::Shadow)
        );

        shadow_map
    }
}

/// Adds `increment` to every pixel inside the filled ellipse around `center`.
/// Footprints whose center falls outside the image are skipped entirely.
fn stamp_ellipse(map: &mut Array2<f64>, center: PixelPoint, increment: f64) -> bool {
    let (height, width) = map.dim();
    if center.x < 0 || center.y < 0 || center.x as usize >= width || center.y as usize >= height {
        return false;
    }

    let reach_x = SHADOW_SEMI_AXIS_X as i32;
    let reach_y = SHADOW_SEMI_AXIS_Y as i32;
    let row_start = (center.y - reach_y).max(0);
    let row_end = (center.y + reach_y).min(height as i32 - 1);
    let col_start = (center.x - reach_x).max(0);
    let col_end = (center.x + reach_x).min(width as i32 - 1);

    for row in row_start..=row_end {
        let ny = (row - center.y) as f64 / SHADOW_SEMI_AXIS_Y;
        for col in col_start..=col_end {
            let nx = (col - center.x) as f64 / SHADOW_SEMI_AXIS_X;
            if nx * nx + ny * ny <= 1.0 {
                map[[row as usize, col as usize]] += increment;
            }
        }
    }

    true
}
