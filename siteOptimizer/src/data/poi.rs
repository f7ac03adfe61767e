use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &PixelPoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<[i32; 2]> for PixelPoint {
    fn from(value: [i32; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<PixelPoint> for [i32; 2] {
    fn from(point: PixelPoint) -> Self {
        [point.x, point.y]
    }
}

/// Axis-aligned box from `(x1, y1)` to `(x2, y2)`; serialized as `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i32; 4]", into = "[i32; 4]")]
pub struct BoundingBox {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl BoundingBox {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Degenerate box covering a single pixel.
    pub fn point(at: PixelPoint) -> Self {
        Self::new(at.x, at.y, at.x, at.y)
    }

    /// Inclusive on every edge.
    pub fn contains(&self, point: &PixelPoint) -> bool {
        self.x1 <= point.x && point.x <= self.x2 && self.y1 <= point.y && point.y <= self.y2
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new((self.x1 + self.x2) / 2, (self.y1 + self.y2) / 2)
    }

    /// Half-open pixel ranges `(rows, cols)` clipped to an image of the given shape.
    pub fn clipped_ranges(&self, height: usize, width: usize) -> Option<((usize, usize), (usize, usize))> {
        let clip = |lo: i32, hi: i32, limit: usize| {
            let lo = lo.max(0) as usize;
            let hi = (hi.max(0) as usize).min(limit);
            (lo < hi).then_some((lo, hi))
        };
        Some((clip(self.y1, self.y2, height)?, clip(self.x1, self.x2, width)?))
    }
}

impl From<[i32; 4]> for BoundingBox {
    fn from(value: [i32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl From<BoundingBox> for [i32; 4] {
    fn from(bbox: BoundingBox) -> Self {
        [bbox.x1, bbox.y1, bbox.x2, bbox.y2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bbox_contains_is_inclusive() {
        let bbox = BoundingBox::new(10, 10, 20, 20);
        assert!(bbox.contains(&PixelPoint::new(10, 10)));
        assert!(bbox.contains(&PixelPoint::new(20, 20)));
        assert!(!bbox.contains(&PixelPoint::new(21, 15)));
    }

    #[test]
    fn clipped_ranges_drop_out_of_image_boxes() {
        let bbox = BoundingBox::new(-5, 90, 30, 130);
        assert_eq!(bbox.clipped_ranges(100, 100), Some(((90, 100), (0, 30))));
        assert_eq!(BoundingBox::new(120, 0, 140, 10).clipped_ranges(100, 100), None);
    }

    #[test]
    fn points_serialize_as_pairs() {
        let json = serde_json::to_string(&PixelPoint::new(3, 4)).unwrap();
        assert_eq!(json, "[3,4]");
        assert_eq!(PixelPoint::new(0, 0).distance_to(&PixelPoint::new(3, 4)), 5.0);
    }
}
