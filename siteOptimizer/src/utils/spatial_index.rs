use crate::config::constants::OBSTACLE_CELL_SIZE;
use crate::data::poi::PixelPoint;
use crate::models::obstacle::Obstacle;
use std::collections::HashMap;
use std::fmt;

type CellKey = (i64, i64);

/// Uniform-grid bucket index over obstacle centers.
///
/// Nearest-neighbour queries expand square rings of cells around the query cell
/// and stop once no unvisited cell can hold anything closer than the best hit.
#[derive(Clone)]
pub struct ObstacleIndex {
    cell_size: f64,
    buckets: HashMap<CellKey, Vec<PixelPoint>>,
    min_cell: CellKey,
    max_cell: CellKey,
    len: usize,
}

impl fmt::Debug for ObstacleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObstacleIndex")
            .field("cell_size", &self.cell_size)
            .field("buckets", &self.buckets.len())
            .field("len", &self.len)
            .finish()
    }
}

impl ObstacleIndex {
    pub fn new(obstacles: &[Obstacle]) -> Self {
        Self::with_cell_size(obstacles, OBSTACLE_CELL_SIZE)
    }

    pub fn with_cell_size(obstacles: &[Obstacle], cell_size: f64) -> Self {
        let mut index = Self {
            cell_size,
            buckets: HashMap::new(),
            min_cell: (i64::MAX, i64::MAX),
            max_cell: (i64::MIN, i64::MIN),
            len: 0,
        };

        for obstacle in obstacles {
            index.insert(obstacle.center);
        }

        index
    }

    fn cell_of(&self, point: &PixelPoint) -> CellKey {
        (
            (point.x as f64 / self.cell_size).floor() as i64,
            (point.y as f64 / self.cell_size).floor() as i64,
        )
    }

    fn insert(&mut self, point: PixelPoint) {
        let cell = self.cell_of(&point);
        self.min_cell = (self.min_cell.0.min(cell.0), self.min_cell.1.min(cell.1));
        self.max_cell = (self.max_cell.0.max(cell.0), self.max_cell.1.max(cell.1));
        self.buckets.entry(cell).or_default().push(point);
        self.len += 1;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn nearest_distance(&self, point: &PixelPoint) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let (cx, cy) = self.cell_of(point);
        // Ring beyond which no occupied cell exists
        let last_ring = [
            (cx - self.min_cell.0).abs(),
            (self.max_cell.0 - cx).abs(),
            (cy - self.min_cell.1).abs(),
            (self.max_cell.1 - cy).abs(),
        ]
        .into_iter()
        .max()
        .unwrap_or(0);

        let mut best = f64::INFINITY;

        for ring in 0..=last_ring {
            for cell in ring_cells((cx, cy), ring) {
                if let Some(points) = self.buckets.get(&cell) {
                    for other in points {
                        best = best.min(point.distance_to(other));
                    }
                }
            }

            // Anything in ring + 1 or further is at least `ring * cell_size` away
            if best <= ring as f64 * self.cell_size {
                break;
            }
        }

        Some(best)
    }
}

fn ring_cells(center: CellKey, ring: i64) -> Vec<CellKey> {
    let (cx, cy) = center;
    if ring == 0 {
        return vec![center];
    }

    let mut cells = Vec::with_capacity((8 * ring) as usize);
    for dx in -ring..=ring {
        cells.push((cx + dx, cy - ring));
        cells.push((cx + dx, cy + ring));
    }
    for dy in (-ring + 1)..ring {
        cells.push((cx - ring, cy + dy));
        cells.push((cx + ring, cy + dy));
    }
    cells
}
