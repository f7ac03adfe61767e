use serde::{Deserialize, Serialize};

use crate::data::poi::{BoundingBox, PixelPoint};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ObstacleRecord")]
pub struct Obstacle {
    pub center: PixelPoint,
    pub bbox: BoundingBox,
    pub class: String,
    pub area: f64,
}

// Only `center` is required on input; a missing box collapses onto the center.
#[derive(Deserialize)]
struct ObstacleRecord {
    center: PixelPoint,
    #[serde(default)]
    bbox: Option<BoundingBox>,
    #[serde(default = "default_class")]
    class: String,
    #[serde(default)]
    area: f64,
}

fn default_class() -> String {
    "unknown".to_string()
}

impl From<ObstacleRecord> for Obstacle {
    fn from(record: ObstacleRecord) -> Self {
        let bbox = record.bbox.unwrap_or_else(|| BoundingBox::point(record.center));
        Self::new(record.center, bbox, record.class, record.area)
    }
}

impl Obstacle {
    pub fn new(center: PixelPoint, bbox: BoundingBox, class: impl Into<String>, area: f64) -> Self {
        Self {
            center,
            bbox,
            class: class.into(),
            area,
        }
    }

    pub fn at(center: PixelPoint, class: impl Into<String>) -> Self {
        Self::new(center, BoundingBox::point(center), class, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_only_obstacle_gets_point_box() {
        let obstacle: Obstacle = serde_json::from_str(r#"{ "center": [10, 12] }"#).unwrap();
        assert_eq!(obstacle.center, PixelPoint::new(10, 12));
        assert_eq!(obstacle.bbox, BoundingBox::new(10, 12, 10, 12));
        assert_eq!(obstacle.class, "unknown");
        assert_eq!(obstacle.area, 0.0);
    }

    #[test]
    fn explicit_box_is_kept() {
        let json = r#"{ "center": [5, 5], "bbox": [0, 0, 10, 10], "class": "tree", "area": 100.0 }"#;
        let obstacle: Obstacle = serde_json::from_str(json).unwrap();
        assert_eq!(obstacle.bbox, BoundingBox::new(0, 0, 10, 10));
        assert_eq!(obstacle.class, "tree");
    }
}
