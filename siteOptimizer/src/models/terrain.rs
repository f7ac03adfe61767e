use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::poi::{BoundingBox, PixelPoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    Vegetation,
    Water,
    Building,
    Road,
    BareLand,
    Shadow,
}

impl TerrainClass {
    pub const ALL: [TerrainClass; 6] = [
        TerrainClass::Vegetation,
        TerrainClass::Water,
        TerrainClass::Building,
        TerrainClass::Road,
        TerrainClass::BareLand,
        TerrainClass::Shadow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TerrainClass::Vegetation => "vegetation",
            TerrainClass::Water => "water",
            TerrainClass::Building => "building",
            TerrainClass::Road => "road",
            TerrainClass::BareLand => "bare_land",
            TerrainClass::Shadow => "shadow",
        }
    }
}

impl fmt::Display for TerrainClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerrainRegion {
    pub bbox: BoundingBox,
    pub center: PixelPoint,
    #[serde(default)]
    pub area: f64,
}

impl TerrainRegion {
    pub fn from_bbox(bbox: BoundingBox) -> Self {
        let area = ((bbox.x2 - bbox.x1).max(0) as f64) * ((bbox.y2 - bbox.y1).max(0) as f64);
        Self {
            bbox,
            center: bbox.center(),
            area,
        }
    }
}

/// Classified regions of a scene, keyed by class. Absent classes read as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerrainRegionSet {
    regions: HashMap<TerrainClass, Vec<TerrainRegion>>,
}

impl TerrainRegionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_region(&mut self, class: TerrainClass, region: TerrainRegion) {
        self.regions.entry(class).or_default().push(region);
    }

    pub fn with_region(mut self, class: TerrainClass, region: TerrainRegion) -> Self {
        self.add_region(class, region);
        self
    }

    pub fn regions(&self, class: TerrainClass) -> &[TerrainRegion] {
        self.regions.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn any_contains(&self, class: TerrainClass, point: &PixelPoint) -> bool {
        self.regions(class).iter().any(|region| region.bbox.contains(point))
    }

    pub fn count(&self, class: TerrainClass) -> usize {
        self.regions(class).len()
    }
}
