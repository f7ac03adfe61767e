use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::constants::{
    ACCESSIBILITY_WEIGHT, COST_WEIGHT, OBSTACLE_WEIGHT, SUNLIGHT_WEIGHT, TERRAIN_WEIGHT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    Sunlight,
    Terrain,
    Obstacles,
    Accessibility,
    Cost,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::Sunlight,
        Criterion::Terrain,
        Criterion::Obstacles,
        Criterion::Accessibility,
        Criterion::Cost,
    ];

    pub fn weight(&self) -> f64 {
        match self {
            Criterion::Sunlight => SUNLIGHT_WEIGHT,
            Criterion::Terrain => TERRAIN_WEIGHT,
            Criterion::Obstacles => OBSTACLE_WEIGHT,
            Criterion::Accessibility => ACCESSIBILITY_WEIGHT,
            Criterion::Cost => COST_WEIGHT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Sunlight => "sunlight",
            Criterion::Terrain => "terrain",
            Criterion::Obstacles => "obstacles",
            Criterion::Accessibility => "accessibility",
            Criterion::Cost => "cost",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn total_weight() -> f64 {
    Criterion::ALL.iter().map(Criterion::weight).sum()
}

/// Per-criterion sub-scores, each clamped to [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponents {
    pub sunlight: f64,
    pub terrain: f64,
    pub obstacles: f64,
    pub accessibility: f64,
    pub cost: f64,
}

impl ScoreComponents {
    pub fn new(sunlight: f64, terrain: f64, obstacles: f64, accessibility: f64, cost: f64) -> Self {
        Self {
            sunlight: sunlight.clamp(0.0, 1.0),
            terrain: terrain.clamp(0.0, 1.0),
            obstacles: obstacles.clamp(0.0, 1.0),
            accessibility: accessibility.clamp(0.0, 1.0),
            cost: cost.clamp(0.0, 1.0),
        }
    }

    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Sunlight => self.sunlight,
            Criterion::Terrain => self.terrain,
            Criterion::Obstacles => self.obstacles,
            Criterion::Accessibility => self.accessibility,
            Criterion::Cost => self.cost,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ALL.into_iter().map(move |criterion| (criterion, self.get(criterion)))
    }

    pub fn weighted_total(&self) -> f64 {
        self.iter().map(|(criterion, value)| criterion.weight() * value).sum()
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.sunlight * factor,
            self.terrain * factor,
            self.obstacles * factor,
            self.accessibility * factor,
            self.cost * factor,
        )
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.iter()
            .map(|(criterion, value)| (criterion.as_str().to_string(), value))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let fixed_point = (total_weight() * 10_000.0).round() as i64;
        assert_eq!(fixed_point, 10_000);
    }

    #[test]
    fn components_are_clamped() {
        let components = ScoreComponents::new(1.4, -0.2, 0.5, 1.0, 0.0);
        assert_eq!(components.sunlight, 1.0);
        assert_eq!(components.terrain, 0.0);
        assert!(components.weighted_total() <= 1.0);
    }

    #[test]
    fn all_ones_score_one() {
        let components = ScoreComponents::new(1.0, 1.0, 1.0, 1.0, 1.0);
        assert!((components.weighted_total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn map_has_every_criterion() {
        let map = ScoreComponents::default().to_map();
        let keys: Vec<_> = map.keys().cloned().collect();
        assert_eq!(keys, vec!["accessibility", "cost", "obstacles", "sunlight", "terrain"]);
    }
}
