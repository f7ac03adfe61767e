use serde::{Deserialize, Serialize};

use crate::models::site::Site;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationMetrics {
    pub average_score: f64,
    pub min_score: f64,
    pub max_score: f64,
    pub total_candidates_evaluated: usize,
    pub top_candidates_selected: usize,
    pub generations_run: usize,
}

impl OptimizationMetrics {
    pub fn from_top_sites(top_sites: &[Site], total_candidates_evaluated: usize, generations_run: usize) -> Self {
        let scores: Vec<f64> = top_sites.iter().map(Site::score).collect();
        let (average_score, min_score, max_score) = if scores.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                scores.iter().sum::<f64>() / scores.len() as f64,
                scores.iter().cloned().fold(f64::INFINITY, f64::min),
                scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            )
        };

        Self {
            average_score,
            min_score,
            max_score,
            total_candidates_evaluated,
            top_candidates_selected: top_sites.len(),
            generations_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::poi::PixelPoint;
    use crate::scoring::criteria::ScoreComponents;

    #[test]
    fn summarizes_scores() {
        let sites: Vec<Site> = [0.2, 0.6, 1.0]
            .iter()
            .enumerate()
            .map(|(id, &v)| {
                Site::candidate(id, PixelPoint::new(0, 0), 1, 1, 1.0, 0.0)
                    .with_components(ScoreComponents::new(v, v, v, v, v))
            })
            .collect();
        let metrics = OptimizationMetrics::from_top_sites(&sites, 40, 3);
        assert!((metrics.average_score - 0.6).abs() < 1e-9);
        assert!((metrics.min_score - 0.2).abs() < 1e-9);
        assert!((metrics.max_score - 1.0).abs() < 1e-9);
        assert_eq!(metrics.total_candidates_evaluated, 40);
        assert_eq!(metrics.top_candidates_selected, 3);
    }

    #[test]
    fn empty_selection_is_zeroed() {
        let metrics = OptimizationMetrics::from_top_sites(&[], 0, 0);
        assert_eq!(metrics.max_score, 0.0);
        assert_eq!(metrics.top_candidates_selected, 0);
    }
}
