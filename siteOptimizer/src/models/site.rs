use serde::{Deserialize, Serialize};

use crate::data::poi::{BoundingBox, PixelPoint};
use crate::scoring::criteria::ScoreComponents;

/// Where a site's score and breakdown came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    #[default]
    Unscored,
    Evaluated,
    /// Decayed copy of a parent's breakdown; values need not sit on any criterion's steps.
    Inherited,
}

/// Rectangular candidate placement.
///
/// A site is a value: each stage (generation, scoring, refinement) produces a new
/// `Site` through one of the consuming constructors below rather than editing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    id: usize,
    center: PixelPoint,
    width: u32,     // pixels
    height: u32,    // pixels
    area: f64,      // square meters
    rotation: f64,  // degrees, carried but not used by scoring
    score: f64,
    score_components: Option<ScoreComponents>,
    #[serde(default)]
    score_source: ScoreSource,
}

impl Site {
    pub fn candidate(
        id: usize,
        center: PixelPoint,
        width: u32,
        height: u32,
        area: f64,
        rotation: f64,
    ) -> Self {
        Self {
            id,
            center,
            width,
            height,
            area,
            rotation,
            score: 0.0,
            score_components: None,
            score_source: ScoreSource::Unscored,
        }
    }

    /// Elementwise mean of two parents; integer fields are truncated.
    pub fn offspring(id: usize, parent1: &Site, parent2: &Site) -> Self {
        let mean_i32 = |a: i32, b: i32| ((a as f64 + b as f64) / 2.0).trunc() as i32;
        let center = PixelPoint::new(
            mean_i32(parent1.center.x, parent2.center.x),
            mean_i32(parent1.center.y, parent2.center.y),
        );

        Self::candidate(
            id,
            center,
            (parent1.width + parent2.width) / 2,
            (parent1.height + parent2.height) / 2,
            (parent1.area + parent2.area) / 2.0,
            (parent1.rotation + parent2.rotation) / 2.0,
        )
    }

    pub fn with_center(self, center: PixelPoint) -> Self {
        Self { center, ..self }
    }

    /// Attaches evaluated components; the score is their weighted total.
    pub fn with_components(self, components: ScoreComponents) -> Self {
        Self {
            score: components.weighted_total(),
            score_components: Some(components),
            score_source: ScoreSource::Evaluated,
            ..self
        }
    }

    /// Takes `parent.score * decay` without evaluating this site.
    ///
    /// The parent's components are scaled by the same factor so the stored
    /// breakdown still sums to the stored score.
    pub fn with_inherited_score(self, parent: &Site, decay: f64) -> Self {
        Self {
            score: parent.score * decay,
            score_components: parent.score_components.map(|components| components.scaled(decay)),
            score_source: ScoreSource::Inherited,
            ..self
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn center(&self) -> PixelPoint {
        self.center
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn score_components(&self) -> Option<&ScoreComponents> {
        self.score_components.as_ref()
    }

    pub fn score_source(&self) -> ScoreSource {
        self.score_source
    }

    pub fn is_scored(&self) -> bool {
        self.score_components.is_some()
    }

    pub fn footprint(&self) -> BoundingBox {
        let half_w = (self.width / 2) as i32;
        let half_h = (self.height / 2) as i32;
        BoundingBox::new(
            self.center.x - half_w,
            self.center.y - half_h,
            self.center.x + half_w,
            self.center.y + half_h,
        )
    }
}

pub fn sort_by_score_desc(sites: &mut [Site]) {
    sites.sort_by(|a, b| b.score.total_cmp(&a.score));
}
