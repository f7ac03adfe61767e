use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::metrics::OptimizationMetrics;
use crate::config::optimizer_config::OptimizerConfig;
use crate::core::candidate_generation::CandidateSiteGenerator;
use crate::core::refinement::PopulationRefiner;
use crate::data::scene_loader::Scene;
use crate::error::{Result, SitingError};
use crate::models::geospatial::GeospatialContext;
use crate::models::site::{sort_by_score_desc, Site};
use crate::scoring::scorer::MultiCriteriaScorer;
use crate::solar::shadow_map::ShadowMapBuilder;
use crate::solar::sun_position::SunPositionModel;
use crate::solar::sunlight::{SunlightGrid, SunlightStatistics};
use crate::utils::logging::{self, OperationCategory};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub candidate_sites: Vec<Site>,
    /// Scored initial population, before refinement.
    pub all_candidates: Vec<Site>,
    pub metrics: OptimizationMetrics,
    pub sunlight_statistics: SunlightStatistics,
    pub optimal_zones: Array2<bool>,
    pub reference_date: NaiveDate,
}

pub fn default_reference_date() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole-run budget; a run past it is abandoned rather than returned partially.
struct Deadline {
    start: Instant,
    budget: Duration,
}

impl Deadline {
    fn new(budget: Duration) -> Self {
        Self { start: Instant::now(), budget }
    }

    fn check(&self) -> Result<()> {
        let elapsed = self.start.elapsed();
        if elapsed > self.budget {
            return Err(SitingError::Timeout { elapsed, budget: self.budget });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SiteOptimizer {
    config: OptimizerConfig,
    show_progress: bool,
}

impl SiteOptimizer {
    pub fn new(config: OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, show_progress: false })
    }

    pub fn with_progress(self, show_progress: bool) -> Self {
        Self { show_progress, ..self }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn geospatial_context(&self, scene: &Scene) -> GeospatialContext {
        scene
            .geospatial
            .clone()
            .unwrap_or_else(|| self.config.geospatial.default_context())
    }

    pub fn analyze_sunlight(
        &self,
        scene: &Scene,
        geospatial: &GeospatialContext,
        reference_date: NaiveDate,
    ) -> SunlightGrid {
        let sun_model = SunPositionModel::new(geospatial.latitude(), geospatial.longitude());
        let (height, width) = scene.shape();
        let shadow_map = ShadowMapBuilder::new(sun_model).build(&scene.terrain, height, width, reference_date);
        SunlightGrid::from_shadow_map(shadow_map)
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        scene: &Scene,
        reference_date: NaiveDate,
        rng: &mut R,
    ) -> Result<OptimizationOutcome> {
        let _timing = logging::start_timing("optimize_sites", OperationCategory::Pipeline);
        let deadline = Deadline::new(self.config.processing_budget());
        let opt = &self.config.optimization;
        let (height, width) = scene.shape();

        let generator = CandidateSiteGenerator::new(opt);
        generator.check_geometry(height, width)?;

        let geospatial = self.geospatial_context(scene);
        info!(
            "Optimizing {}x{} scene at lat={:.4}, lon={:.4} for {}",
            width,
            height,
            geospatial.latitude(),
            geospatial.longitude(),
            reference_date
        );

        let sunlight = self.analyze_sunlight(scene, &geospatial, reference_date);
        let sunlight_statistics = sunlight.statistics();
        let optimal_zones = sunlight.optimal_zones();
        deadline.check()?;

        let candidates = generator.generate(height, width, opt.population_size, rng)?;
        let scorer = MultiCriteriaScorer::new(
            &sunlight,
            &scene.terrain,
            &scene.obstacles,
            &geospatial,
            (height, width),
        )?;
        let scored = scorer.score_all(candidates);
        deadline.check()?;

        let mut refiner = PopulationRefiner::new(opt, &scored);
        let generations = refiner.generations();
        let progress = self.progress_bar(generations);

        let all_candidates = scored.clone();
        let mut population = scored;
        for generation in 0..generations {
            let (next, stats) = refiner.run_generation(population, rng, &scorer);
            population = next;
            progress.set_message(format!("gen {}: {} mutated", generation + 1, stats.mutated));
            progress.inc(1);
            deadline.check()?;
        }
        progress.finish_and_clear();

        sort_by_score_desc(&mut population);
        population.truncate(opt.top_n);

        let metrics = OptimizationMetrics::from_top_sites(&population, refiner.evaluated_count(), generations);
        info!(
            "Selected top {} sites: best {:.4}, mean {:.4}",
            metrics.top_candidates_selected, metrics.max_score, metrics.average_score
        );

        Ok(OptimizationOutcome {
            candidate_sites: population,
            all_candidates,
            metrics,
            sunlight_statistics,
            optimal_zones,
            reference_date,
        })
    }

    fn progress_bar(&self, generations: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(generations as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style);
        }
        pb
    }
}
